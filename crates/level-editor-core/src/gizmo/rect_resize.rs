//! Rectangle-resize gizmo for box colliders and rectangular area lights.
//!
//! Each target rectangle gets eight handles: four corners and four edge
//! midpoints. Two resize policies:
//! - vertex (default): the opposite corner or edge stays fixed in world space
//! - mirrored (modifier held): the rectangle grows symmetrically about its
//!   press-time center
//!
//! Both policies always work from the press-time rectangle, so a long drag
//! never accumulates drift.

use bevy::math::{Rect, Vec2};

use super::snap::snap_position;
use super::{DragSession, Gizmo, GizmoContext, GizmoKind, HandleMetrics, RectTarget, RectTargetKind};
use crate::draw::{handle_color, GizmoColors};
use crate::geometry::point_to_segment_distance;
use crate::input::CursorKind;
use crate::scene::{ColliderShape, EntityTable};
use crate::selection::SelectionSet;
use crate::undo::{FieldKind, FieldValue};

/// One of the eight handles of a rectangle, named as seen on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectHandle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl RectHandle {
    pub const ALL: [RectHandle; 8] = [
        RectHandle::TopLeft,
        RectHandle::Top,
        RectHandle::TopRight,
        RectHandle::Right,
        RectHandle::BottomRight,
        RectHandle::Bottom,
        RectHandle::BottomLeft,
        RectHandle::Left,
    ];

    /// Direction of the handle from the rectangle center, each component
    /// -1, 0 or 1 in world space.
    pub fn signs(self, y_axis_down: bool) -> Vec2 {
        let (x, top) = match self {
            RectHandle::TopLeft => (-1.0, 1.0),
            RectHandle::Top => (0.0, 1.0),
            RectHandle::TopRight => (1.0, 1.0),
            RectHandle::Right => (1.0, 0.0),
            RectHandle::BottomRight => (1.0, -1.0),
            RectHandle::Bottom => (0.0, -1.0),
            RectHandle::BottomLeft => (-1.0, -1.0),
            RectHandle::Left => (-1.0, 0.0),
        };
        // Screen top is min y in a y-down world
        let y = if y_axis_down { -top } else { top };
        Vec2::new(x, y)
    }

    pub fn is_corner(self) -> bool {
        matches!(
            self,
            RectHandle::TopLeft
                | RectHandle::TopRight
                | RectHandle::BottomRight
                | RectHandle::BottomLeft
        )
    }

    pub fn cursor(self) -> CursorKind {
        match self {
            RectHandle::TopLeft | RectHandle::BottomRight => CursorKind::ResizeMainDiagonal,
            RectHandle::TopRight | RectHandle::BottomLeft => CursorKind::ResizeAntiDiagonal,
            RectHandle::Left | RectHandle::Right => CursorKind::ResizeHorizontal,
            RectHandle::Top | RectHandle::Bottom => CursorKind::ResizeVertical,
        }
    }

    /// World position of this handle on `rect`.
    pub fn position(self, rect: Rect, y_axis_down: bool) -> Vec2 {
        rect.center() + self.signs(y_axis_down) * rect.half_size()
    }
}

/// Solve the resized rectangle for a handle moved to `moved`.
///
/// `signs` comes from [`RectHandle::signs`]; axes with a zero sign keep
/// their press-time extent. Every edge ends up at least `min_edge` long.
pub fn resize_rect(start: Rect, signs: Vec2, moved: Vec2, mirrored: bool, min_edge: f32) -> Rect {
    let min_edge = min_edge.max(0.0);
    let center = start.center();
    let mut min = start.min;
    let mut max = start.max;

    for axis in 0..2 {
        let sign = signs[axis];
        if sign == 0.0 {
            continue;
        }
        if mirrored {
            let half = ((moved[axis] - center[axis]) * sign).max(min_edge / 2.0);
            min[axis] = center[axis] - half;
            max[axis] = center[axis] + half;
        } else if sign > 0.0 {
            // Min side is the fixed anchor
            max[axis] = moved[axis].max(min[axis] + min_edge);
        } else {
            min[axis] = moved[axis].min(max[axis] - min_edge);
        }
    }

    Rect { min, max }
}

/// Box colliders and area lights of the selection with their world rects.
fn rect_targets(table: &EntityTable, selection: &SelectionSet) -> Vec<(RectTarget, Rect)> {
    let mut targets = Vec::new();
    for (id, position) in selection.valid_positions(table) {
        let Some(entity) = table.get(id) else {
            continue;
        };
        if let Some(rect) = entity.collider.as_ref().and_then(|c| c.box_rect(position)) {
            targets.push((
                RectTarget {
                    entity: id,
                    kind: RectTargetKind::BoxCollider,
                },
                rect,
            ));
        }
        if let Some(light) = entity.light {
            targets.push((
                RectTarget {
                    entity: id,
                    kind: RectTargetKind::AreaLight,
                },
                light.bounds(position),
            ));
        }
    }
    targets
}

fn field_kind(kind: RectTargetKind) -> FieldKind {
    match kind {
        RectTargetKind::BoxCollider => FieldKind::BoxCollider,
        RectTargetKind::AreaLight => FieldKind::AreaLight,
    }
}

/// Write a resized rectangle back to its target.
fn write_rect(table: &mut EntityTable, target: RectTarget, rect: Rect) {
    let Some(entity) = table.get_mut(target.entity) else {
        return;
    };
    match target.kind {
        RectTargetKind::BoxCollider => {
            let position = entity.position();
            let changed = match entity.collider.as_mut() {
                Some(collider) if matches!(collider.shape, ColliderShape::Box { .. }) => {
                    collider.box_rect(position) != Some(rect) && collider.set_box_rect(position, rect)
                }
                _ => false,
            };
            if changed {
                table.notify_collider_changed(target.entity);
            }
        }
        RectTargetKind::AreaLight => {
            if let Some(light) = entity.light.as_mut() {
                let size = rect.size();
                light.width = size.x;
                light.height = size.y;
                entity.transform.position = rect.center();
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct RectResizeGizmo {
    hovered: Option<(RectTarget, RectHandle)>,
}

impl RectResizeGizmo {
    pub fn hovered(&self) -> Option<(RectTarget, RectHandle)> {
        self.hovered
    }

    fn hit_test(
        targets: &[(RectTarget, Rect)],
        point: Vec2,
        metrics: &HandleMetrics,
        y_axis_down: bool,
    ) -> Option<(RectTarget, RectHandle)> {
        // Corners win over edges, across all targets
        for (target, rect) in targets {
            for handle in RectHandle::ALL.into_iter().filter(|h| h.is_corner()) {
                if handle.position(*rect, y_axis_down).distance(point) <= metrics.point_radius {
                    return Some((*target, handle));
                }
            }
        }
        for (target, rect) in targets {
            for (handle, a, b) in [
                (RectHandle::Top, RectHandle::TopLeft, RectHandle::TopRight),
                (RectHandle::Right, RectHandle::TopRight, RectHandle::BottomRight),
                (RectHandle::Bottom, RectHandle::BottomRight, RectHandle::BottomLeft),
                (RectHandle::Left, RectHandle::BottomLeft, RectHandle::TopLeft),
            ] {
                let start = a.position(*rect, y_axis_down);
                let end = b.position(*rect, y_axis_down);
                if point_to_segment_distance(point, start, end) <= metrics.tolerance {
                    return Some((*target, handle));
                }
            }
        }
        None
    }
}

impl Gizmo for RectResizeGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::RectangleResize
    }

    fn is_hovered(&self) -> bool {
        self.hovered.is_some()
    }

    fn refresh_hover(&mut self, ctx: &GizmoContext<'_>, metrics: &HandleMetrics) {
        let targets = rect_targets(ctx.table, ctx.selection);
        self.hovered = Self::hit_test(&targets, ctx.pointer.world, metrics, ctx.config.y_axis_down);
    }

    fn begin_drag(&self, ctx: &GizmoContext<'_>) -> Option<DragSession> {
        let (target, handle) = self.hovered?;
        let start_rect = rect_targets(ctx.table, ctx.selection)
            .into_iter()
            .find_map(|(t, rect)| (t == target).then_some(rect))?;
        let entity = ctx.table.get(target.entity)?;
        let start = FieldValue::read(field_kind(target.kind), entity)?;
        Some(DragSession::RectangleHandle {
            target,
            handle,
            press_mouse: ctx.pointer.world,
            start_rect,
            start,
        })
    }

    fn apply_drag(&self, ctx: &mut GizmoContext<'_>) {
        let DragSession::RectangleHandle {
            target,
            handle,
            press_mouse,
            start_rect,
            ..
        } = &*ctx.session
        else {
            return;
        };
        let (target, start_rect) = (*target, *start_rect);
        let config = ctx.config;
        let signs = handle.signs(config.y_axis_down);

        let moved = handle.position(start_rect, config.y_axis_down) + (ctx.pointer.world - *press_mouse);
        let moved = snap_position(moved, signs.x != 0.0, signs.y != 0.0, &config.snap);
        if !moved.is_finite() {
            return;
        }
        let rect = resize_rect(
            start_rect,
            signs,
            moved,
            ctx.pointer.modifiers.mirror,
            config.min_rect_edge,
        );
        write_rect(ctx.table, target, rect);
    }

    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics) {
        let y_down = ctx.config.y_axis_down;
        let active = match &*ctx.session {
            DragSession::RectangleHandle { target, handle, .. } => Some((*target, *handle)),
            _ => None,
        };
        for (target, rect) in rect_targets(ctx.table, ctx.selection) {
            ctx.draw.hollow_rect(rect, GizmoColors::SELECTED);
            for handle in RectHandle::ALL {
                let key = Some((target, handle));
                let color =
                    handle_color(GizmoColors::RECT_HANDLE, self.hovered == key, active == key);
                ctx.draw.rect(metrics.knob_rect(handle.position(rect, y_down)), color);
            }
        }
        if let Some((_, handle)) = active.or(self.hovered) {
            *ctx.cursor = handle.cursor();
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
