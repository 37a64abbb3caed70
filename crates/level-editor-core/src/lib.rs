//! Level Editor Core Library
//!
//! Interactive 2D scene editing: pointer selection with click cycling and
//! marquee picking, five gizmos (translate, rotate, scale, polygon points,
//! rectangle resize) and data-only undo transactions.
//!
//! The editing core is engine-agnostic and driven once per frame through
//! [`SceneEditor::update`]. The [`bevy`](crate::bevy) module wires it into a
//! Bevy app as resources, messages and systems.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod camera;
pub mod config;
pub mod draw;
pub mod editor;
pub mod geometry;
pub mod gizmo;
pub mod input;
pub mod scene;
pub mod selection;
pub mod undo;

// Bevy integration
pub mod bevy;

#[cfg(test)]
mod test_utils;

pub use camera::{CameraProjection, OrthoCamera};
pub use config::{ConfigError, EditorConfig, SnapConfig};
pub use draw::{DebugDraw, GizmoColors, NullDraw};
pub use editor::{EditorFrame, FrameOutcome, SceneEditor};
pub use gizmo::{DragSession, Gizmo, GizmoKind};
pub use input::{CursorKind, Modifiers, PointerState};
pub use scene::{AreaLight, Collider, ColliderShape, EntityId, EntityTable, Renderable, SceneEntity, Transform2d};
pub use selection::{SelectionMode, SelectionSet};
pub use undo::{UndoAction, UndoError, UndoHistory, UndoStore};
