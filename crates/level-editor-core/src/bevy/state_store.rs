//! Thread-safe editor state shared with UI code outside the ECS.
//!
//! Inspector panels read a [`EditorStateSummary`] snapshot and queue requests
//! (select entities, switch mode, undo/redo) that Bevy systems drain once per
//! frame.

use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::RwLock;

use crate::scene::EntityId;
use crate::selection::SelectionMode;

/// Snapshot of editor state for UI consumption.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorStateSummary {
    pub selected: Vec<EntityId>,
    pub mode: SelectionMode,
    pub is_dragging: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Label of the most recent undoable action.
    pub last_action: Option<String>,
}

/// Undo/redo request queued by UI code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRequest {
    Undo,
    Redo,
}

#[derive(Default)]
struct EditorStateStoreInner {
    summary: EditorStateSummary,
    version: u64,
    /// Pending selection from UI.
    pending_selection: Option<Vec<EntityId>>,
    /// Pending mode switch from UI.
    pending_mode: Option<SelectionMode>,
    pending_history: Vec<HistoryRequest>,
}

/// Editor state store shared between Bevy and UI code.
#[derive(Resource, Clone, Default)]
pub struct EditorStateStore {
    inner: Arc<RwLock<EditorStateStoreInner>>,
}

impl EditorStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self) -> EditorStateSummary {
        self.inner.read().summary.clone()
    }

    pub fn selected(&self) -> Vec<EntityId> {
        self.inner.read().summary.selected.clone()
    }

    pub fn mode(&self) -> SelectionMode {
        self.inner.read().summary.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.read().summary.is_dragging
    }

    /// Get version for change detection.
    pub fn get_version(&self) -> u64 {
        self.inner.read().version
    }

    /// Replace the selection (from UI).
    pub fn request_selection(&self, ids: Vec<EntityId>) {
        self.inner.write().pending_selection = Some(ids);
    }

    /// Switch editing mode (from UI).
    pub fn request_mode(&self, mode: SelectionMode) {
        self.inner.write().pending_mode = Some(mode);
    }

    pub fn request_undo(&self) {
        self.inner.write().pending_history.push(HistoryRequest::Undo);
    }

    pub fn request_redo(&self) {
        self.inner.write().pending_history.push(HistoryRequest::Redo);
    }

    /// Take pending selection (called by Bevy systems).
    pub fn take_pending_selection(&self) -> Option<Vec<EntityId>> {
        self.inner.write().pending_selection.take()
    }

    /// Take pending mode (called by Bevy systems).
    pub fn take_pending_mode(&self) -> Option<SelectionMode> {
        self.inner.write().pending_mode.take()
    }

    /// Take pending undo/redo requests in order (called by Bevy systems).
    pub fn take_pending_history(&self) -> Vec<HistoryRequest> {
        std::mem::take(&mut self.inner.write().pending_history)
    }

    /// Update the snapshot from Bevy. The version only moves on change.
    pub fn sync_from_bevy(&self, summary: EditorStateSummary) {
        let mut inner = self.inner.write();
        if inner.summary != summary {
            inner.summary = summary;
            inner.version += 1;
        }
    }
}
