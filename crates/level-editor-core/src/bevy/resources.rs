//! ECS resources holding the editor state.

use bevy::prelude::*;

use crate::camera::{CameraProjection, OrthoCamera};
use crate::draw::DebugDraw;
use crate::editor::SceneEditor;
use crate::input::{CursorKind, PointerState};
use crate::scene::EntityTable;
use crate::selection::SelectionSet;
use crate::undo::UndoHistory;

/// The edited scene.
#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct EditorScene(pub EntityTable);

/// Current selection, primary entity first.
#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct EditorSelection(pub SelectionSet);

/// Gizmos, drag session and selection tool.
#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct SceneEditorRes(pub SceneEditor);

/// Undo/redo history fed by completed drags.
#[derive(Resource, Debug, Default, Clone, Deref, DerefMut)]
pub struct UndoHistoryRes(pub UndoHistory);

/// Camera mapping used by the editor.
///
/// In windowed apps the primary 2D camera is mirrored here and conversions go
/// through [`Camera::viewport_to_world_2d`] and [`Camera::world_to_viewport`],
/// so picking agrees with what Bevy renders. `ortho` tracks the same center
/// and scale and is used when the camera is absent or cannot convert yet
/// (headless apps, the first frame before its viewport is known).
#[derive(Resource, Debug, Clone)]
pub struct EditorView {
    pub ortho: OrthoCamera,
    pub camera: Option<(Camera, GlobalTransform)>,
}

impl EditorView {
    pub fn new(ortho: OrthoCamera) -> Self {
        Self { ortho, camera: None }
    }
}

impl Default for EditorView {
    fn default() -> Self {
        // Bevy world space is Y-up
        Self::new(OrthoCamera {
            y_down: false,
            ..OrthoCamera::default()
        })
    }
}

impl CameraProjection for EditorView {
    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        self.camera
            .as_ref()
            .and_then(|(camera, transform)| camera.world_to_viewport(transform, world.extend(0.0)).ok())
            .unwrap_or_else(|| self.ortho.world_to_screen(world))
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        self.camera
            .as_ref()
            .and_then(|(camera, transform)| camera.viewport_to_world_2d(transform, screen).ok())
            .unwrap_or_else(|| self.ortho.screen_to_world(screen))
    }

    fn zoom(&self) -> f32 {
        self.ortho.zoom()
    }
}

/// Cursor position in window pixels (top-left origin), `None` when the
/// cursor is outside the window.
#[derive(Resource, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct CursorScreenPosition(pub Option<Vec2>);

/// Pointer sample for the current frame.
#[derive(Resource, Debug, Default, Clone, Copy, Deref, DerefMut)]
pub struct PointerRes(pub PointerState);

/// Cursor shape requested by the editor this frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq, Deref, DerefMut)]
pub struct EditorCursor(pub CursorKind);

/// One recorded debug-draw primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Line { start: Vec2, end: Vec2, color: Color },
    Rect { rect: Rect, color: Color },
    HollowRect { rect: Rect, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Arrow { start: Vec2, end: Vec2, head_size: f32, color: Color },
}

/// Debug-draw output of the editor for the current frame.
///
/// Filled by the logic systems (headless-safe) and flushed to Bevy
/// `Gizmos` by the rendering plugin.
#[derive(Resource, Debug, Default, Clone)]
pub struct DrawQueue {
    pub commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, DrawCommand> {
        self.commands.drain(..)
    }
}

impl DebugDraw for DrawQueue {
    fn line(&mut self, start: Vec2, end: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { start, end, color });
    }

    fn rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn hollow_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::HollowRect { rect, color });
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn arrow(&mut self, start: Vec2, end: Vec2, head_size: f32, color: Color) {
        self.commands.push(DrawCommand::Arrow {
            start,
            end,
            head_size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_view_falls_back_to_ortho_without_camera_viewport() {
        let ortho = OrthoCamera {
            y_down: false,
            ..OrthoCamera::new(Vec2::new(10.0, 0.0), 4.0, Vec2::new(200.0, 100.0))
        };
        let mut view = EditorView::new(ortho);
        let screen = Vec2::new(140.0, 30.0);
        assert_eq!(view.screen_to_world(screen), Vec2::new(20.0, 5.0));

        // A camera that has never rendered has no viewport size to convert with
        view.camera = Some((Camera::default(), GlobalTransform::IDENTITY));
        assert_eq!(view.screen_to_world(screen), Vec2::new(20.0, 5.0));
        assert_eq!(view.world_to_screen(Vec2::new(20.0, 5.0)), screen);
        assert_eq!(view.zoom(), 4.0);
    }
}
