//! Scale gizmo with per-axis and uniform handles.

use bevy::math::Vec2;

use super::translate::hit_test_axes;
use super::{Axis, DragSession, Gizmo, GizmoContext, GizmoKind, HandleMetrics};
use crate::draw::{handle_color, GizmoColors};
use crate::input::CursorKind;

/// Scale gizmo: per-axis handles ending in square knobs, plus a center knob
/// that scales both axes.
#[derive(Debug, Default, Clone)]
pub struct ScaleGizmo {
    hovered: Option<Axis>,
}

impl ScaleGizmo {
    pub fn hovered(&self) -> Option<Axis> {
        self.hovered
    }
}

fn cursor_for(axis: Axis) -> CursorKind {
    match axis {
        Axis::X => CursorKind::ResizeHorizontal,
        Axis::Y => CursorKind::ResizeVertical,
        Axis::Both => CursorKind::ResizeMainDiagonal,
    }
}

impl Gizmo for ScaleGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Scale
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
        let start: Vec<_> = ctx
            .selection
            .valid_positions(ctx.table)
            .filter_map(|(id, _)| {
                let scale = ctx.table.get(id)?.transform.scale;
                scale.is_finite().then_some((id, scale))
            })
            .collect();
        if start.is_empty() {
            return None;
        }
        Some(DragSession::ScaleAxis {
            x: axis.moves_x(),
            y: axis.moves_y(),
            press_mouse: ctx.pointer.world,
            start,
        })
    }

    fn apply_drag(&self, ctx: &mut GizmoContext<'_>) {
        let DragSession::ScaleAxis {
            x,
            y,
            press_mouse,
            start,
        } = &*ctx.session
        else {
            return;
        };
        let config = ctx.config;
        let damping = if config.scale_damping > 0.0 {
            config.scale_damping
        } else {
            1.0
        };
        // Dragging toward the on-screen "up" grows the Y scale
        let y_sign = if config.y_axis_down { -1.0 } else { 1.0 };
        let delta = (ctx.pointer.world - *press_mouse) / damping;
        if !delta.is_finite() {
            return;
        }
        let delta = Vec2::new(
            if *x { delta.x } else { 0.0 },
            if *y { delta.y * y_sign } else { 0.0 },
        );
        for (id, origin) in start {
            if let Some(entity) = ctx.table.get_mut(*id) {
                entity.transform.scale = (*origin + delta).max(Vec2::splat(config.min_scale));
            }
        }
    }

    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics) {
        let Some(center) = ctx.anchor() else {
            return;
        };
        let active = match &*ctx.session {
            DragSession::ScaleAxis { x, y, .. } => match (x, y) {
                (true, true) => Some(Axis::Both),
                (true, false) => Some(Axis::X),
                (false, true) => Some(Axis::Y),
                (false, false) => None,
            },
            _ => None,
        };

        for (axis, dir, base) in [
            (Axis::X, Vec2::X, GizmoColors::X_AXIS),
            (Axis::Y, metrics.up, GizmoColors::Y_AXIS),
        ] {
            let color = handle_color(base, self.hovered == Some(axis), active == Some(axis));
            let end = center + dir * metrics.length;
            ctx.draw.line(center, end, color);
            ctx.draw.rect(metrics.knob_rect(end), color);
        }

        let both_color = handle_color(
            GizmoColors::SCALE,
            self.hovered == Some(Axis::Both),
            active == Some(Axis::Both),
        );
        ctx.draw.rect(metrics.knob_rect(center), both_color);

        if let Some(axis) = active.or(self.hovered) {
            *ctx.cursor = cursor_for(axis);
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
