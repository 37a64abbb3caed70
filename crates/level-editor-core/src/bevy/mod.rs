//! Bevy integration for the level editor core.
//!
//! The editing core stays engine-agnostic; this module stores its state in
//! resources, feeds it pointer input once per frame, and publishes results
//! as messages and through the shared [`EditorStateStore`].

pub mod events;
pub mod plugin;
pub mod resources;
pub mod state_store;
pub mod systems;

#[cfg(test)]
mod test_utils;

pub use events::*;
pub use plugin::{EditorSet, LevelEditorHeadlessPlugin, LevelEditorPlugin};
pub use resources::*;
pub use state_store::{EditorStateStore, EditorStateSummary, HistoryRequest};
