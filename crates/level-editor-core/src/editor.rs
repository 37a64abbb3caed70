//! Per-frame orchestration of gizmos and selection.
//!
//! [`SceneEditor`] owns one instance of every gizmo, the single
//! [`DragSession`], and the selection tool. Each frame it dispatches to the
//! gizmos of the current [`SelectionMode`] and then, when no handle is under
//! the pointer, to click/marquee selection.

use bevy::math::{Rect, Vec2};

use crate::camera::CameraProjection;
use crate::config::EditorConfig;
use crate::draw::{DebugDraw, GizmoColors};
use crate::gizmo::{
    self, DragSession, Gizmo, GizmoContext, GizmoKind, PolygonPointGizmo, RectResizeGizmo,
    RotateGizmo, ScaleGizmo, TranslateGizmo,
};
use crate::input::{CursorKind, PointerState};
use crate::scene::{EntityId, EntityTable, SceneEntity};
use crate::selection::{pick_candidates, SelectionMode, SelectionSet, SelectionTool};
use crate::undo::{UndoAction, UndoStore};

/// Borrowed host state for one editor frame.
pub struct EditorFrame<'a> {
    pub table: &'a mut EntityTable,
    pub selection: &'a mut SelectionSet,
    pub pointer: &'a PointerState,
    pub camera: &'a dyn CameraProjection,
    pub config: &'a EditorConfig,
    pub draw: &'a mut dyn DebugDraw,
    pub undo: &'a mut dyn UndoStore,
}

/// What the host should react to after a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutcome {
    pub cursor: CursorKind,
    /// Camera-follow target after a selection change.
    pub focus: Option<Vec2>,
    /// Entity the inspector should show.
    pub inspector: Option<EntityId>,
    pub selection_changed: bool,
    /// Labels of undo actions pushed this frame.
    pub committed: Vec<String>,
}

/// Forwards pushes and remembers their labels.
struct LabelRecorder<'a> {
    inner: &'a mut dyn UndoStore,
    labels: Vec<String>,
}

impl UndoStore for LabelRecorder<'_> {
    fn push(&mut self, action: UndoAction) {
        self.labels.push(action.label.clone());
        self.inner.push(action);
    }
}

#[derive(Debug, Default, Clone)]
struct GizmoSet {
    translate: TranslateGizmo,
    rotate: RotateGizmo,
    scale: ScaleGizmo,
    polygon: PolygonPointGizmo,
    rect_resize: RectResizeGizmo,
}

impl GizmoSet {
    fn get(&self, kind: GizmoKind) -> &dyn Gizmo {
        match kind {
            GizmoKind::Translate => &self.translate,
            GizmoKind::Rotate => &self.rotate,
            GizmoKind::Scale => &self.scale,
            GizmoKind::PolygonPoint => &self.polygon,
            GizmoKind::RectangleResize => &self.rect_resize,
        }
    }

    fn get_mut(&mut self, kind: GizmoKind) -> &mut dyn Gizmo {
        match kind {
            GizmoKind::Translate => &mut self.translate,
            GizmoKind::Rotate => &mut self.rotate,
            GizmoKind::Scale => &mut self.scale,
            GizmoKind::PolygonPoint => &mut self.polygon,
            GizmoKind::RectangleResize => &mut self.rect_resize,
        }
    }

    fn reset_all(&mut self) {
        self.translate.reset();
        self.rotate.reset();
        self.scale.reset();
        self.polygon.reset();
        self.rect_resize.reset();
    }
}

#[derive(Debug, Default, Clone)]
pub struct SceneEditor {
    mode: SelectionMode,
    session: DragSession,
    gizmos: GizmoSet,
    selection_tool: SelectionTool,
}

impl SceneEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_active()
    }

    pub fn is_box_selecting(&self) -> bool {
        self.selection_tool.is_box_selecting()
    }

    /// Any gizmo of the current mode is hovered or dragging. Box selection is
    /// suppressed while this holds.
    pub fn is_mouse_over_gizmo(&self) -> bool {
        self.mode
            .gizmos()
            .iter()
            .any(|kind| self.gizmos.get(*kind).is_mouse_over(&self.session))
    }

    /// Switch mode. A drag in progress is cancelled. Returns whether the mode
    /// changed.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::debug!("[editor] mode {:?} -> {:?}", self.mode, mode);
        self.cancel();
        self.mode = mode;
        true
    }

    /// Escape: drop hover, the drag session, the pending selection press and
    /// the click cycle. Entities are not touched and nothing is pushed.
    pub fn cancel(&mut self) {
        gizmo::cancel(&mut self.session);
        self.gizmos.reset_all();
        self.selection_tool.cancel();
    }

    pub fn update(&mut self, frame: EditorFrame<'_>) -> FrameOutcome {
        let EditorFrame {
            table,
            selection,
            pointer,
            camera,
            config,
            draw,
            undo,
        } = frame;
        let mut outcome = FrameOutcome::default();

        if selection.retain_existing(table) {
            outcome.selection_changed = true;
        }

        if pointer.escape {
            self.cancel();
            draw_selection(table, selection, draw);
            return outcome;
        }

        draw_selection(table, selection, draw);

        let mut recorder = LabelRecorder {
            inner: undo,
            labels: Vec::new(),
        };
        let mut cursor = CursorKind::Default;
        for kind in self.mode.gizmos() {
            let mut ctx = GizmoContext {
                table: &mut *table,
                selection: &*selection,
                pointer,
                camera,
                config,
                draw: &mut *draw,
                undo: &mut recorder,
                session: &mut self.session,
                cursor: &mut cursor,
            };
            self.gizmos.get_mut(*kind).update(&mut ctx);
        }
        outcome.committed = recorder.labels;

        // A marquee that started off-gizmo keeps running until release even
        // when it crosses a handle
        if self.selection_tool.is_active() || !self.is_mouse_over_gizmo() {
            if !self.selection_tool.is_active() && !self.session.is_active() {
                draw_hover(table, selection, pointer, config, draw);
            }
            let picked = self
                .selection_tool
                .update(pointer, table, selection, config, draw);
            outcome.selection_changed |= picked.changed;
            outcome.focus = picked.focus;
            outcome.inspector = picked.inspector;
        }

        outcome.cursor = cursor;
        outcome
    }
}

/// Outline used for selection and hover highlights.
fn entity_outline(entity: &SceneEntity) -> Option<Rect> {
    let position = entity.position();
    entity
        .physical_bounds()
        .or_else(|| entity.renderable.map(|r| r.world_bounds(position)))
}

fn draw_outline(entity: &SceneEntity, color: bevy::color::Color, draw: &mut dyn DebugDraw) {
    match entity_outline(entity) {
        Some(rect) => draw.hollow_rect(rect, color),
        None => draw.circle(entity.position(), 4.0, color),
    }
}

fn draw_selection(table: &EntityTable, selection: &SelectionSet, draw: &mut dyn DebugDraw) {
    for id in selection.ids() {
        if let Some(entity) = table.get(*id).filter(|e| e.has_valid_position()) {
            draw_outline(entity, GizmoColors::SELECTED, draw);
        }
    }
}

/// Outline the entity a click would pick.
fn draw_hover(
    table: &EntityTable,
    selection: &SelectionSet,
    pointer: &PointerState,
    config: &EditorConfig,
    draw: &mut dyn DebugDraw,
) {
    let Some(id) = pick_candidates(table, pointer.world, config).first().copied() else {
        return;
    };
    if selection.contains(id) {
        return;
    }
    if let Some(entity) = table.get(id) {
        draw_outline(entity, GizmoColors::HOVER, draw);
    }
}
