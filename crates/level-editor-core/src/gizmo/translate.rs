//! Move gizmo: X and Y axis arrows plus a free-move center square.

use bevy::math::Vec2;

use super::snap::snap_position;
use super::{Axis, DragSession, Gizmo, GizmoContext, GizmoKind, HandleMetrics};
use crate::draw::{handle_color, GizmoColors};
use crate::geometry::{point_in_square, point_to_segment_distance};
use crate::input::CursorKind;

#[derive(Debug, Default, Clone)]
pub struct TranslateGizmo {
    hovered: Option<Axis>,
}

impl TranslateGizmo {
    pub fn hovered(&self) -> Option<Axis> {
        self.hovered
    }
}

/// Hit-test the shared axis-handle layout (translate and scale).
pub(super) fn hit_test_axes(center: Vec2, point: Vec2, metrics: &HandleMetrics) -> Option<Axis> {
    // Center square first, the whole square is clickable
    if point_in_square(point, center, metrics.knob) {
        return Some(Axis::Both);
    }
    let x_end = center + Vec2::X * metrics.length;
    if point_to_segment_distance(point, center, x_end) <= metrics.tolerance {
        return Some(Axis::X);
    }
    let y_end = center + metrics.up * metrics.length;
    if point_to_segment_distance(point, center, y_end) <= metrics.tolerance {
        return Some(Axis::Y);
    }
    None
}

impl Gizmo for TranslateGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Translate
    }

    fn is_hovered(&self) -> bool {
        self.hovered.is_some()
    }

    fn refresh_hover(&mut self, ctx: &GizmoContext<'_>, metrics: &HandleMetrics) {
        self.hovered = ctx
            .anchor()
            .and_then(|center| hit_test_axes(center, ctx.pointer.world, metrics));
    }

    fn begin_drag(&self, ctx: &GizmoContext<'_>) -> Option<DragSession> {
        let axis = self.hovered?;
        let start: Vec<_> = ctx.selection.valid_positions(ctx.table).collect();
        if start.is_empty() {
            return None;
        }
        Some(DragSession::Translate {
            axis,
            press_mouse: ctx.pointer.world,
            start,
        })
    }

    fn apply_drag(&self, ctx: &mut GizmoContext<'_>) {
        let DragSession::Translate {
            axis,
            press_mouse,
            start,
        } = &*ctx.session
        else {
            return;
        };
        let delta = axis.constrain(ctx.pointer.world - *press_mouse);
        if !delta.is_finite() {
            return;
        }
        for (id, origin) in start {
            let Some(entity) = ctx.table.get_mut(*id) else {
                continue;
            };
            entity.transform.position =
                snap_position(*origin + delta, axis.moves_x(), axis.moves_y(), &ctx.config.snap);
        }
    }

    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics) {
        let Some(center) = ctx.anchor() else {
            return;
        };
        let active = match &*ctx.session {
            DragSession::Translate { axis, .. } => Some(*axis),
            _ => None,
        };
        let head = metrics.knob * 1.5;

        for (axis, dir, base) in [
            (Axis::X, Vec2::X, GizmoColors::X_AXIS),
            (Axis::Y, metrics.up, GizmoColors::Y_AXIS),
        ] {
            let color = handle_color(base, self.hovered == Some(axis), active == Some(axis));
            ctx.draw.arrow(center, center + dir * metrics.length, head, color);
        }

        let free_color = handle_color(
            GizmoColors::FREE,
            self.hovered == Some(Axis::Both),
            active == Some(Axis::Both),
        );
        ctx.draw.hollow_rect(metrics.knob_rect(center), free_color);

        if self.hovered.is_some() || active.is_some() {
            *ctx.cursor = CursorKind::Move;
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
