//! Rotate gizmo: a circular handle turning the selection about its centroid.

use bevy::math::Vec2;

use super::snap::snap_angle;
use super::{DragSession, Gizmo, GizmoContext, GizmoKind, HandleMetrics};
use crate::draw::{handle_color, GizmoColors};
use crate::geometry::wrap_angle;
use crate::input::CursorKind;

/// Rotate gizmo: one circular handle around the selection centroid.
#[derive(Debug, Default, Clone)]
pub struct RotateGizmo {
    hovered: bool,
}

impl Gizmo for RotateGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::Rotate
    }

    fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn refresh_hover(&mut self, ctx: &GizmoContext<'_>, metrics: &HandleMetrics) {
        self.hovered = ctx.anchor().is_some_and(|center| {
            ctx.pointer.world.distance(center) <= metrics.rotate_radius + metrics.tolerance
        });
    }

    fn begin_drag(&self, ctx: &GizmoContext<'_>) -> Option<DragSession> {
        let center = ctx.anchor()?;
        let start: Vec<_> = ctx
            .selection
            .valid_positions(ctx.table)
            .filter_map(|(id, _)| {
                let rotation = ctx.table.get(id)?.transform.rotation;
                rotation.is_finite().then_some((id, rotation))
            })
            .collect();
        if start.is_empty() {
            return None;
        }
        Some(DragSession::Rotate {
            center,
            // Pressing on the exact center gives a zero vector, to_angle is 0
            press_angle: (ctx.pointer.world - center).to_angle(),
            start,
        })
    }

    fn apply_drag(&self, ctx: &mut GizmoContext<'_>) {
        let DragSession::Rotate {
            center,
            press_angle,
            start,
        } = &*ctx.session
        else {
            return;
        };
        let offset = ctx.pointer.world - *center;
        if offset.length_squared() < f32::EPSILON {
            // Angle is undefined at the pivot, keep the last value
            return;
        }
        let delta = wrap_angle(offset.to_angle() - press_angle);
        for (id, origin) in start {
            if let Some(entity) = ctx.table.get_mut(*id) {
                entity.transform.rotation = snap_angle(origin + delta, &ctx.config.snap);
            }
        }
    }

    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics) {
        let Some(center) = ctx.anchor() else {
            return;
        };
        let active = self.is_dragging(ctx.session);
        let color = handle_color(GizmoColors::ROTATE, self.hovered, active);
        ctx.draw.circle(center, metrics.rotate_radius, color);

        // Spoke showing the primary entity's current angle
        let primary_rotation = ctx
            .selection
            .primary()
            .and_then(|id| ctx.table.get(id))
            .map(|entity| entity.transform.rotation)
            .filter(|r| r.is_finite());
        if let Some(rotation) = primary_rotation {
            let spoke = Vec2::from_angle(rotation) * metrics.rotate_radius;
            ctx.draw.line(center, center + spoke, color);
        }

        if self.hovered || active {
            *ctx.cursor = CursorKind::Rotate;
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = false;
    }
}
