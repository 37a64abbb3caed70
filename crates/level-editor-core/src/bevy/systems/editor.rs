//! Systems driving the [`SceneEditor`](crate::editor::SceneEditor) once per
//! frame and publishing its results.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::bevy::events::{
    ColliderChangedEvent, HistoryAppliedEvent, ModeChangedEvent, SelectionChangedEvent,
    UndoPushedEvent,
};
use crate::bevy::resources::{
    DrawQueue, EditorCursor, EditorScene, EditorSelection, EditorView, PointerRes, SceneEditorRes,
    UndoHistoryRes,
};
use crate::bevy::state_store::{EditorStateStore, EditorStateSummary, HistoryRequest};
use crate::config::EditorConfig;
use crate::editor::EditorFrame;
use crate::selection::SelectionMode;
use crate::undo::UndoDirection;

/// Mutable editor state shared by the editing systems.
#[derive(SystemParam)]
pub struct EditorData<'w> {
    pub scene: ResMut<'w, EditorScene>,
    pub selection: ResMut<'w, EditorSelection>,
    pub editor: ResMut<'w, SceneEditorRes>,
    pub history: ResMut<'w, UndoHistoryRes>,
}

impl EditorData<'_> {
    /// Switch the editing mode, cancelling any drag in progress.
    pub fn switch_mode(&mut self, mode: SelectionMode, events: &mut MessageWriter<ModeChangedEvent>) {
        if self.editor.set_mode(mode) {
            tracing::info!("[editor] mode: {}", mode.label());
            events.write(ModeChangedEvent { mode });
        }
    }

    /// Apply one undo/redo step. Ignored while a drag is in progress.
    pub fn apply_history(
        &mut self,
        request: HistoryRequest,
        events: &mut MessageWriter<HistoryAppliedEvent>,
    ) {
        if self.editor.is_dragging() {
            tracing::debug!("[editor] {:?} ignored while dragging", request);
            return;
        }

        let direction = match request {
            HistoryRequest::Undo => UndoDirection::Undo,
            HistoryRequest::Redo => UndoDirection::Redo,
        };
        let table = &mut self.scene.0;
        let result = match direction {
            UndoDirection::Undo => self.history.undo(table),
            UndoDirection::Redo => self.history.redo(table),
        };

        match result {
            Ok(Some(action)) => {
                tracing::info!("[editor] {:?}: {}", direction, action.label);
                events.write(HistoryAppliedEvent {
                    direction,
                    label: action.label.clone(),
                });
            }
            Ok(None) => {
                tracing::debug!("[editor] nothing to {:?}", direction);
            }
            Err(err) => {
                tracing::warn!("[editor] {:?} partially applied: {}", direction, err);
            }
        }
    }
}

/// Drain selection, mode and history requests queued by UI code.
pub fn apply_store_requests(
    store: Res<EditorStateStore>,
    mut data: EditorData,
    mut selection_events: MessageWriter<SelectionChangedEvent>,
    mut mode_events: MessageWriter<ModeChangedEvent>,
    mut history_events: MessageWriter<HistoryAppliedEvent>,
) {
    if let Some(ids) = store.take_pending_selection() {
        let before = data.selection.0.clone();
        let table = &data.scene.0;
        let existing: Vec<_> = ids.into_iter().filter(|id| table.contains(*id)).collect();
        data.selection.set_many(existing, false);

        if data.selection.0 != before {
            let selection = &data.selection.0;
            selection_events.write(SelectionChangedEvent {
                selected: selection.ids().to_vec(),
                inspector: selection.primary(),
                focus: selection.centroid(&data.scene.0),
            });
        }
    }

    if let Some(mode) = store.take_pending_mode() {
        data.switch_mode(mode, &mut mode_events);
    }

    for request in store.take_pending_history() {
        data.apply_history(request, &mut history_events);
    }
}

/// Run one editor frame against the sampled pointer.
#[allow(clippy::too_many_arguments)]
pub fn run_scene_editor(
    data: EditorData,
    pointer: Res<PointerRes>,
    view: Res<EditorView>,
    config: Res<EditorConfig>,
    mut queue: ResMut<DrawQueue>,
    mut cursor: ResMut<EditorCursor>,
    mut selection_events: MessageWriter<SelectionChangedEvent>,
    mut undo_events: MessageWriter<UndoPushedEvent>,
) {
    let EditorData {
        mut scene,
        mut selection,
        mut editor,
        mut history,
    } = data;

    queue.clear();
    let outcome = editor.update(EditorFrame {
        table: &mut scene.0,
        selection: &mut selection.0,
        pointer: &pointer.0,
        camera: &*view,
        config: &*config,
        draw: &mut *queue,
        undo: &mut history.0,
    });

    if cursor.0 != outcome.cursor {
        cursor.0 = outcome.cursor;
    }

    for label in outcome.committed {
        undo_events.write(UndoPushedEvent { label });
    }

    if outcome.selection_changed {
        selection_events.write(SelectionChangedEvent {
            selected: selection.ids().to_vec(),
            inspector: outcome.inspector,
            focus: outcome.focus,
        });
    }
}

/// Forward collider change notifications from the scene.
pub fn emit_collider_changes(
    mut scene: ResMut<EditorScene>,
    mut events: MessageWriter<ColliderChangedEvent>,
) {
    for entity in scene.take_collider_changes() {
        events.write(ColliderChangedEvent { entity });
    }
}

/// Publish the editor snapshot to the shared store.
pub fn sync_editor_state_to_store(
    store: Res<EditorStateStore>,
    selection: Res<EditorSelection>,
    editor: Res<SceneEditorRes>,
    history: Res<UndoHistoryRes>,
) {
    store.sync_from_bevy(EditorStateSummary {
        selected: selection.ids().to_vec(),
        mode: editor.mode(),
        is_dragging: editor.is_dragging(),
        can_undo: history.can_undo(),
        can_redo: history.can_redo(),
        last_action: history.last().map(|action| action.label.clone()),
    });
}
