//! Gizmo state machines.
//!
//! Every gizmo runs the same three-phase session once per frame:
//! - Hover: compute handle geometry from the selection and zoom, hit-test
//! - Press -> drag: snapshot press-time values, then each frame write
//!   `start value + (mouse now - mouse at press)`
//! - Release -> commit: diff snapshot against final values and push one undo
//!   action when anything changed
//!
//! The drag itself lives in a single host-owned [`DragSession`], so "is
//! anything dragging" is one check and two gizmos can never drag at once.

mod polygon;
mod rect_resize;
mod rotate;
mod scale;
pub mod snap;
mod translate;

pub use polygon::*;
pub use rect_resize::*;
pub use rotate::*;
pub use scale::*;
pub use translate::*;

use bevy::math::{Rect, Vec2};

use crate::camera::CameraProjection;
use crate::config::EditorConfig;
use crate::draw::DebugDraw;
use crate::input::{CursorKind, PointerState};
use crate::scene::{EntityId, EntityTable};
use crate::selection::SelectionSet;
use crate::undo::{FieldValue, UndoAction, UndoStore};

/// The closed set of gizmo variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoKind {
    Translate,
    Rotate,
    Scale,
    PolygonPoint,
    RectangleResize,
}

/// Axis constraint of a linear handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Both,
}

impl Axis {
    /// Zero out the components this axis does not move.
    pub fn constrain(self, delta: Vec2) -> Vec2 {
        match self {
            Axis::X => Vec2::new(delta.x, 0.0),
            Axis::Y => Vec2::new(0.0, delta.y),
            Axis::Both => delta,
        }
    }

    pub fn moves_x(self) -> bool {
        matches!(self, Axis::X | Axis::Both)
    }

    pub fn moves_y(self) -> bool {
        matches!(self, Axis::Y | Axis::Both)
    }
}

/// Handle sizes in world units for the current zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMetrics {
    /// Axis handle length.
    pub length: f32,
    /// Pick distance for axis handles.
    pub tolerance: f32,
    /// Half size of center squares and end knobs.
    pub knob: f32,
    pub rotate_radius: f32,
    /// Pick radius for points and rectangle handles.
    pub point_radius: f32,
    /// Unit vector of the on-screen "up" direction in world space.
    pub up: Vec2,
}

impl HandleMetrics {
    pub fn new(zoom: f32, config: &EditorConfig) -> Self {
        let zoom = if zoom.is_finite() && zoom > f32::EPSILON {
            zoom
        } else {
            1.0
        };
        let length = (config.handle_length_px / zoom)
            .clamp(config.handle_world_min, config.handle_world_max);
        let world_per_px = length / config.handle_length_px;
        Self {
            length,
            tolerance: config.hit_tolerance_px * world_per_px,
            knob: config.hit_tolerance_px * world_per_px,
            rotate_radius: config.rotate_radius_px * world_per_px,
            point_radius: config.point_radius_px * world_per_px,
            up: if config.y_axis_down { Vec2::NEG_Y } else { Vec2::Y },
        }
    }

    /// Square of half size `knob` around `center`.
    pub fn knob_rect(&self, center: Vec2) -> Rect {
        Rect::from_center_half_size(center, Vec2::splat(self.knob))
    }
}

/// Rectangle-resize target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectTarget {
    pub entity: EntityId,
    pub kind: RectTargetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RectTargetKind {
    BoxCollider,
    AreaLight,
}

/// The one drag in progress, if any.
///
/// Snapshots are keyed by [`EntityId`]; an entity removed mid-drag stops
/// resolving and is skipped instead of dangling.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragSession {
    #[default]
    None,
    Translate {
        axis: Axis,
        press_mouse: Vec2,
        start: Vec<(EntityId, Vec2)>,
    },
    Rotate {
        center: Vec2,
        press_angle: f32,
        start: Vec<(EntityId, f32)>,
    },
    ScaleAxis {
        x: bool,
        y: bool,
        press_mouse: Vec2,
        start: Vec<(EntityId, Vec2)>,
    },
    PolygonPoint {
        entity: EntityId,
        index: usize,
        /// Collider world center captured at press, fixed for the drag.
        center: Vec2,
        start: Vec2,
    },
    RectangleHandle {
        target: RectTarget,
        handle: RectHandle,
        press_mouse: Vec2,
        start_rect: Rect,
        start: FieldValue,
    },
}

impl DragSession {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragSession::None)
    }

    /// Gizmo owning this session.
    pub fn kind(&self) -> Option<GizmoKind> {
        match self {
            DragSession::None => None,
            DragSession::Translate { .. } => Some(GizmoKind::Translate),
            DragSession::Rotate { .. } => Some(GizmoKind::Rotate),
            DragSession::ScaleAxis { .. } => Some(GizmoKind::Scale),
            DragSession::PolygonPoint { .. } => Some(GizmoKind::PolygonPoint),
            DragSession::RectangleHandle { .. } => Some(GizmoKind::RectangleResize),
        }
    }

    /// Undo verb and press-time values for commit.
    fn into_snapshot(self) -> Option<(&'static str, Vec<(EntityId, FieldValue)>)> {
        match self {
            DragSession::None => None,
            DragSession::Translate { start, .. } => Some((
                "Move",
                start
                    .into_iter()
                    .map(|(id, p)| (id, FieldValue::Position { value: p.to_array() }))
                    .collect(),
            )),
            DragSession::Rotate { start, .. } => Some((
                "Rotate",
                start
                    .into_iter()
                    .map(|(id, r)| (id, FieldValue::Rotation { value: r }))
                    .collect(),
            )),
            DragSession::ScaleAxis { start, .. } => Some((
                "Scale",
                start
                    .into_iter()
                    .map(|(id, s)| (id, FieldValue::Scale { value: s.to_array() }))
                    .collect(),
            )),
            DragSession::PolygonPoint {
                entity,
                index,
                start,
                ..
            } => Some((
                "Edit points of",
                vec![(
                    entity,
                    FieldValue::PolygonPoint {
                        index,
                        point: start.to_array(),
                    },
                )],
            )),
            DragSession::RectangleHandle { target, start, .. } => {
                Some(("Resize", vec![(target.entity, start)]))
            }
        }
    }
}

/// Everything a gizmo reads and writes during one frame.
pub struct GizmoContext<'a> {
    pub table: &'a mut EntityTable,
    pub selection: &'a SelectionSet,
    pub pointer: &'a PointerState,
    pub camera: &'a dyn CameraProjection,
    pub config: &'a EditorConfig,
    pub draw: &'a mut dyn DebugDraw,
    pub undo: &'a mut dyn UndoStore,
    pub session: &'a mut DragSession,
    pub cursor: &'a mut CursorKind,
}

impl GizmoContext<'_> {
    pub fn metrics(&self) -> HandleMetrics {
        HandleMetrics::new(self.camera.zoom(), self.config)
    }

    /// Centroid of the selected entities with valid positions.
    pub fn anchor(&self) -> Option<Vec2> {
        self.selection.centroid(self.table)
    }
}

/// Shared contract of the five gizmos.
///
/// Implementors supply hover, press, drag and drawing hooks; the provided
/// [`Gizmo::update`] sequences them and commits the undo transaction.
pub trait Gizmo {
    fn kind(&self) -> GizmoKind;

    /// Whether a handle is under the pointer.
    fn is_hovered(&self) -> bool;

    /// Recompute the hovered handle.
    fn refresh_hover(&mut self, ctx: &GizmoContext<'_>, metrics: &HandleMetrics);

    /// Build a session for the hovered handle, `None` when nothing is
    /// hovered or there is nothing to manipulate.
    fn begin_drag(&self, ctx: &GizmoContext<'_>) -> Option<DragSession>;

    /// Write drag results for the current pointer position.
    fn apply_drag(&self, ctx: &mut GizmoContext<'_>);

    /// Draw handles and set the cursor.
    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics);

    /// Forget hover state.
    fn clear_hover(&mut self);

    fn is_dragging(&self, session: &DragSession) -> bool {
        session.kind() == Some(self.kind())
    }

    /// Hovered or dragging. The host suppresses marquee selection while true.
    fn is_mouse_over(&self, session: &DragSession) -> bool {
        self.is_hovered() || self.is_dragging(session)
    }

    /// Force-clear hover. Does not touch entities or the undo store.
    fn reset(&mut self) {
        self.clear_hover();
    }

    /// Run one frame: hover, press, drag, release, draw.
    fn update(&mut self, ctx: &mut GizmoContext<'_>) {
        let metrics = ctx.metrics();

        if ctx.session.is_active() {
            // Hover is frozen while any gizmo drags
            if !self.is_dragging(ctx.session) {
                self.clear_hover();
            }
        } else {
            self.refresh_hover(ctx, &metrics);
            if self.is_hovered() && ctx.pointer.pressed {
                if let Some(session) = self.begin_drag(ctx) {
                    tracing::debug!("[gizmo] {:?} drag started", self.kind());
                    *ctx.session = session;
                }
            }
        }

        if self.is_dragging(ctx.session) {
            self.apply_drag(ctx);
            // Covers a release in the same frame as the press
            if !ctx.pointer.down {
                commit(ctx);
            }
        }

        self.draw(ctx, &metrics);
    }
}

/// End the current session, pushing an undo action if anything changed.
pub fn commit(ctx: &mut GizmoContext<'_>) {
    let session = std::mem::take(ctx.session);
    let Some((verb, snapshot)) = session.into_snapshot() else {
        return;
    };
    match UndoAction::from_snapshot(verb, &snapshot, ctx.table) {
        Some(action) => {
            tracing::debug!("[gizmo] commit '{}'", action.label);
            ctx.undo.push(action);
        }
        None => tracing::debug!("[gizmo] drag ended without changes"),
    }
}

/// End the current session without an undo action. Entities keep whatever
/// values the drag wrote so far.
pub fn cancel(session: &mut DragSession) {
    if let Some(kind) = std::mem::take(session).kind() {
        tracing::debug!("[gizmo] {:?} drag cancelled", kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_scale_with_zoom_and_clamp() {
        let config = EditorConfig::default();
        let normal = HandleMetrics::new(1.0, &config);
        assert!((normal.length - 60.0).abs() < 1e-4);
        assert!((normal.tolerance - 6.0).abs() < 1e-4);

        let zoomed_in = HandleMetrics::new(2.0, &config);
        assert!((zoomed_in.length - 30.0).abs() < 1e-4);

        // Extreme zoom clamps to the configured bounds
        let far_in = HandleMetrics::new(1000.0, &config);
        assert!((far_in.length - config.handle_world_min).abs() < 1e-4);
        let far_out = HandleMetrics::new(0.001, &config);
        assert!((far_out.length - config.handle_world_max).abs() < 1e-3);
    }

    #[test]
    fn test_axis_constrain() {
        let delta = Vec2::new(3.0, -4.0);
        assert_eq!(Axis::X.constrain(delta), Vec2::new(3.0, 0.0));
        assert_eq!(Axis::Y.constrain(delta), Vec2::new(0.0, -4.0));
        assert_eq!(Axis::Both.constrain(delta), delta);
    }

    #[test]
    fn test_session_kind() {
        assert_eq!(DragSession::None.kind(), None);
        let session = DragSession::Rotate {
            center: Vec2::ZERO,
            press_angle: 0.0,
            start: Vec::new(),
        };
        assert!(session.is_active());
        assert_eq!(session.kind(), Some(GizmoKind::Rotate));
    }

    #[test]
    fn test_cancel_drops_session_without_touching_entities() {
        use crate::scene::SceneEntity;

        let mut table = EntityTable::new();
        table.insert(SceneEntity::new(EntityId(1), "crate").at(Vec2::new(5.0, 5.0)));
        let mut session = DragSession::Translate {
            axis: Axis::Both,
            press_mouse: Vec2::ZERO,
            start: vec![(EntityId(1), Vec2::new(5.0, 5.0))],
        };
        table.get_mut(EntityId(1)).unwrap().transform.position = Vec2::new(50.0, 0.0);

        cancel(&mut session);
        assert!(!session.is_active());
        assert_eq!(table.get(EntityId(1)).unwrap().position(), Vec2::new(50.0, 0.0));

        // Idempotent
        cancel(&mut session);
        assert!(!session.is_active());
    }
}
