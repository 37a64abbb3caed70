//! Input handling systems for the editor.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::bevy::events::{HistoryAppliedEvent, ModeChangedEvent};
use crate::bevy::resources::{CursorScreenPosition, EditorView, PointerRes};
use crate::bevy::state_store::HistoryRequest;
use crate::config::EditorConfig;
use crate::input::{Modifiers, PointerState};
use crate::selection::SelectionMode;

use super::editor::EditorData;

/// Mode hotkeys, in [`SelectionMode::ALL`] order.
const MODE_KEYS: [KeyCode; 4] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4];

/// System to track the cursor in window pixels.
pub fn track_cursor_position(
    mut cursor: ResMut<CursorScreenPosition>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let position = window.cursor_position();
    if cursor.0 != position {
        cursor.0 = position;
    }
}

/// System to mirror the primary 2D camera into [`EditorView`].
pub fn sync_editor_view(
    mut view: ResMut<EditorView>,
    config: Res<EditorConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform, &Projection), With<Camera2d>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, transform, projection)) = camera_query.single() else {
        view.camera = None;
        return;
    };

    let scale = match projection {
        Projection::Orthographic(ortho) => ortho.scale,
        _ => 1.0,
    };

    let view = &mut *view;
    view.ortho.center = transform.translation().truncate();
    view.ortho.zoom = if scale > f32::EPSILON { 1.0 / scale } else { 1.0 };
    view.ortho.viewport = window.size();
    view.ortho.y_down = config.y_axis_down;
    view.camera = Some((camera.clone(), *transform));
}

/// System to sample mouse and keyboard into the frame's [`PointerState`].
///
/// Shift extends the selection, Alt mirrors rectangle resizes.
pub fn sample_pointer(
    mut pointer: ResMut<PointerRes>,
    cursor: Res<CursorScreenPosition>,
    view: Res<EditorView>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
) {
    // Keep the last known position while the cursor is outside the window
    let screen = cursor.0.unwrap_or(pointer.screen);

    let mut sample = PointerState::at(screen, &*view, time.elapsed_secs_f64());
    sample.pressed = mouse_button.just_pressed(MouseButton::Left);
    sample.down = mouse_button.pressed(MouseButton::Left);
    sample.released = mouse_button.just_released(MouseButton::Left);
    sample.escape = keyboard.just_pressed(KeyCode::Escape);
    sample.modifiers = Modifiers {
        additive: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        mirror: keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
    };

    pointer.0 = sample;
}

/// System to handle mode and undo/redo hotkeys.
///
/// - `1`..`4`: Normal, Resize, Rotate, Collider Resize
/// - Ctrl+Z: undo
/// - Ctrl+Y / Ctrl+Shift+Z: redo
pub fn handle_editor_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut data: EditorData,
    mut mode_events: MessageWriter<ModeChangedEvent>,
    mut history_events: MessageWriter<HistoryAppliedEvent>,
) {
    let ctrl = keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]);
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    if ctrl {
        if keyboard.just_pressed(KeyCode::KeyZ) {
            let request = if shift {
                HistoryRequest::Redo
            } else {
                HistoryRequest::Undo
            };
            data.apply_history(request, &mut history_events);
        } else if keyboard.just_pressed(KeyCode::KeyY) {
            data.apply_history(HistoryRequest::Redo, &mut history_events);
        }
        return;
    }

    for (key, mode) in MODE_KEYS.into_iter().zip(SelectionMode::ALL) {
        if keyboard.just_pressed(key) {
            data.switch_mode(mode, &mut mode_events);
        }
    }
}
