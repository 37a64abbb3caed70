//! Vertex editing for polygon colliders.
//!
//! Each vertex of every selected polygon collider gets a point handle. The
//! pick radius is in screen pixels, so it shrinks in world units as the
//! camera zooms in.

use bevy::math::Vec2;

use super::{DragSession, Gizmo, GizmoContext, GizmoKind, HandleMetrics};
use crate::draw::{handle_color, GizmoColors};
use crate::input::CursorKind;
use crate::scene::{ColliderShape, EntityId, EntityTable};
use crate::selection::SelectionSet;

/// Polygon-point gizmo: drags single vertices of polygon colliders.
#[derive(Debug, Default, Clone)]
pub struct PolygonPointGizmo {
    hovered: Option<(EntityId, usize)>,
}

impl PolygonPointGizmo {
    pub fn hovered(&self) -> Option<(EntityId, usize)> {
        self.hovered
    }
}

/// Polygon collider of a selected entity in world space.
struct WorldPolygon {
    entity: EntityId,
    center: Vec2,
    points: Vec<Vec2>,
}

fn selected_polygons(table: &EntityTable, selection: &SelectionSet) -> Vec<WorldPolygon> {
    selection
        .valid_positions(table)
        .filter_map(|(id, position)| {
            let collider = table.get(id)?.collider.as_ref()?;
            let ColliderShape::Polygon { points } = &collider.shape else {
                return None;
            };
            let center = collider.world_center(position);
            Some(WorldPolygon {
                entity: id,
                center,
                points: points.iter().map(|p| center + *p).collect(),
            })
        })
        .collect()
}

impl Gizmo for PolygonPointGizmo {
    fn kind(&self) -> GizmoKind {
        GizmoKind::PolygonPoint
    }

    fn is_hovered(&self) -> bool {
        self.hovered.is_some()
    }

    fn refresh_hover(&mut self, ctx: &GizmoContext<'_>, metrics: &HandleMetrics) {
        let mouse = ctx.pointer.world;
        let mut best: Option<((EntityId, usize), f32)> = None;
        for polygon in selected_polygons(ctx.table, ctx.selection) {
            for (index, point) in polygon.points.iter().enumerate() {
                let dist = point.distance(mouse);
                if dist > metrics.point_radius {
                    continue;
                }
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some(((polygon.entity, index), dist));
                }
            }
        }
        self.hovered = best.map(|(hit, _)| hit);
    }

    fn begin_drag(&self, ctx: &GizmoContext<'_>) -> Option<DragSession> {
        let (entity, index) = self.hovered?;
        let polygon = selected_polygons(ctx.table, ctx.selection)
            .into_iter()
            .find(|p| p.entity == entity)?;
        let start = *polygon.points.get(index)? - polygon.center;
        Some(DragSession::PolygonPoint {
            entity,
            index,
            center: polygon.center,
            start,
        })
    }

    fn apply_drag(&self, ctx: &mut GizmoContext<'_>) {
        let DragSession::PolygonPoint {
            entity,
            index,
            center,
            ..
        } = &*ctx.session
        else {
            return;
        };
        let (entity, index) = (*entity, *index);
        let local = ctx.pointer.world - *center;
        if !local.is_finite() {
            return;
        }
        let slot = match ctx
            .table
            .get_mut(entity)
            .and_then(|e| e.collider.as_mut())
            .map(|c| &mut c.shape)
        {
            Some(ColliderShape::Polygon { points }) => points.get_mut(index),
            _ => None,
        };
        let Some(slot) = slot else {
            return;
        };
        if *slot != local {
            *slot = local;
            ctx.table.notify_collider_changed(entity);
        }
    }

    fn draw(&self, ctx: &mut GizmoContext<'_>, metrics: &HandleMetrics) {
        let active = match &*ctx.session {
            DragSession::PolygonPoint { entity, index, .. } => Some((*entity, *index)),
            _ => None,
        };
        for polygon in selected_polygons(ctx.table, ctx.selection) {
            let count = polygon.points.len();
            for (index, point) in polygon.points.iter().enumerate() {
                if count > 1 {
                    let next = polygon.points[(index + 1) % count];
                    ctx.draw.line(*point, next, GizmoColors::SELECTED);
                }
                let key = Some((polygon.entity, index));
                let color = handle_color(GizmoColors::POINT, self.hovered == key, active == key);
                ctx.draw.circle(*point, metrics.point_radius, color);
            }
        }
        if self.hovered.is_some() || active.is_some() {
            *ctx.cursor = CursorKind::Crosshair;
        }
    }

    fn clear_hover(&mut self) {
        self.hovered = None;
    }
}
