//! Test helpers for driving gizmos frame by frame without a host.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};

use crate::camera::OrthoCamera;
use crate::config::EditorConfig;
use crate::draw::DebugDraw;
use crate::gizmo::{DragSession, Gizmo, GizmoContext};
use crate::input::{CursorKind, Modifiers, PointerState};
use crate::scene::EntityTable;
use crate::selection::SelectionSet;
use crate::undo::UndoAction;

/// Debug-draw sink that counts primitives.
#[derive(Debug, Default)]
pub(crate) struct RecordingDraw {
    pub lines: usize,
    pub rects: usize,
    pub hollow_rects: Vec<Rect>,
    pub circles: usize,
    pub arrows: usize,
}

impl DebugDraw for RecordingDraw {
    fn line(&mut self, _: Vec2, _: Vec2, _: Color) {
        self.lines += 1;
    }

    fn rect(&mut self, _: Rect, _: Color) {
        self.rects += 1;
    }

    fn hollow_rect(&mut self, rect: Rect, _: Color) {
        self.hollow_rects.push(rect);
    }

    fn circle(&mut self, _: Vec2, _: f32, _: Color) {
        self.circles += 1;
    }

    fn arrow(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {
        self.arrows += 1;
    }
}

/// Identity camera: screen coordinates equal world coordinates.
pub(crate) fn identity_camera() -> OrthoCamera {
    OrthoCamera::new(Vec2::ZERO, 1.0, Vec2::ZERO)
}

/// Pointer sample at a world position (identity camera).
pub(crate) fn pointer_at(world: Vec2) -> PointerState {
    PointerState {
        screen: world,
        world,
        ..PointerState::default()
    }
}

/// Everything a gizmo needs, owned, for single-gizmo tests.
pub(crate) struct GizmoHarness {
    pub table: EntityTable,
    pub selection: SelectionSet,
    pub camera: OrthoCamera,
    pub config: EditorConfig,
    pub draw: RecordingDraw,
    pub undo: Vec<UndoAction>,
    pub session: DragSession,
    pub cursor: CursorKind,
}

impl GizmoHarness {
    pub fn new(table: EntityTable) -> Self {
        Self {
            table,
            selection: SelectionSet::new(),
            camera: identity_camera(),
            config: EditorConfig::default(),
            draw: RecordingDraw::default(),
            undo: Vec::new(),
            session: DragSession::None,
            cursor: CursorKind::Default,
        }
    }

    /// Run one frame of a gizmo with the given pointer sample.
    pub fn frame(&mut self, gizmo: &mut dyn Gizmo, pointer: PointerState) {
        self.cursor = CursorKind::Default;
        let mut ctx = GizmoContext {
            table: &mut self.table,
            selection: &self.selection,
            pointer: &pointer,
            camera: &self.camera,
            config: &self.config,
            draw: &mut self.draw,
            undo: &mut self.undo,
            session: &mut self.session,
            cursor: &mut self.cursor,
        };
        gizmo.update(&mut ctx);
    }

    /// Press at `from`, move through `path`, release at the last point.
    pub fn drag(&mut self, gizmo: &mut dyn Gizmo, from: Vec2, path: &[Vec2], modifiers: Modifiers) {
        self.frame(gizmo, pointer_at(from).with_modifiers(modifiers));
        self.frame(gizmo, pointer_at(from).with_modifiers(modifiers).pressed());
        for point in path {
            self.frame(gizmo, pointer_at(*point).with_modifiers(modifiers).held());
        }
        let end = path.last().copied().unwrap_or(from);
        self.frame(gizmo, pointer_at(end).with_modifiers(modifiers).released());
    }
}
