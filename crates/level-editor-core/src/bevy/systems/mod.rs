//! Systems for the level editor.
//!
//! Organized by functionality:
//! - input: Cursor tracking, camera sync, pointer sampling, hotkeys
//! - editor: Editor frame, UI requests, message publishing, state sync
//! - render: Gizmos-based scene and overlay drawing

pub mod editor;
pub mod input;
pub mod render;

pub use editor::*;
pub use input::*;
pub use render::*;
