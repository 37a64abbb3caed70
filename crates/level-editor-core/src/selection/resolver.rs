//! Point and marquee picking.
//!
//! Point picks walk four tiers in strict order and concatenate them, so the
//! first non-empty tier gives the default pick while the full list stays
//! available for click cycling:
//!
//! 1. colliders containing the point, nearest collider center first
//! 2. selectable sprites containing the point, front-most layer first
//! 3. area lights containing the point, nearest light center first
//! 4. bare entities (no collider, sprite or light) near the point

use bevy::math::{Rect, Vec2};

use crate::config::EditorConfig;
use crate::geometry::{coverage, is_valid_point, rects_intersect};
use crate::scene::{EntityId, EntityTable, SceneEntity};

/// Entities eligible for any kind of picking.
fn pickable(table: &EntityTable) -> impl Iterator<Item = &SceneEntity> {
    table.iter().filter(|entity| {
        if !entity.selectable {
            return false;
        }
        if !entity.has_valid_position() {
            tracing::debug!("[selection] skipping {} with invalid position", entity.id);
            return false;
        }
        true
    })
}

fn sort_by_distance(tier: &mut [(EntityId, f32)]) {
    tier.sort_by(|a, b| a.1.total_cmp(&b.1));
}

/// Ordered candidates under a world point.
pub fn pick_candidates(table: &EntityTable, point: Vec2, config: &EditorConfig) -> Vec<EntityId> {
    if !is_valid_point(point) {
        return Vec::new();
    }

    let mut colliders = Vec::new();
    let mut sprites = Vec::new();
    let mut lights = Vec::new();
    let mut bare = Vec::new();

    for entity in pickable(table) {
        let position = entity.position();

        if let Some(collider) = &entity.collider {
            let bounds = collider.bounds(position);
            if bounds.contains(point) {
                colliders.push((entity.id, point.distance(bounds.center())));
            }
        }

        if let Some(renderable) = entity.renderable.filter(|r| r.selectable) {
            if renderable.world_bounds(position).contains(point) {
                sprites.push((entity.id, renderable.render_layer, point.distance(position)));
            }
        }

        if let Some(light) = entity.light {
            let bounds = light.bounds(position);
            if bounds.contains(point) {
                lights.push((entity.id, point.distance(bounds.center())));
            }
        }

        if entity.collider.is_none() && entity.renderable.is_none() && entity.light.is_none() {
            let distance = point.distance(position);
            if distance <= config.fallback_pick_radius {
                bare.push((entity.id, distance));
            }
        }
    }

    sort_by_distance(&mut colliders);
    sprites.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.total_cmp(&b.2)));
    sort_by_distance(&mut lights);
    sort_by_distance(&mut bare);

    let ordered = colliders
        .into_iter()
        .map(|(id, _)| id)
        .chain(sprites.into_iter().map(|(id, _, _)| id))
        .chain(lights.into_iter().map(|(id, _)| id))
        .chain(bare.into_iter().map(|(id, _)| id));

    let mut candidates: Vec<EntityId> = Vec::new();
    for id in ordered {
        if !candidates.contains(&id) {
            candidates.push(id);
        }
    }
    candidates
}

/// Entities selected by a marquee rectangle (corners in any order).
///
/// Only entities with a collider or an area light qualify; plain sprites are
/// left out so marquee selection targets physical and light objects. An
/// entity qualifies when the rectangle covers at least
/// `config.coverage_threshold` of its bounds.
pub fn box_pick(table: &EntityTable, area: Rect, config: &EditorConfig) -> Vec<EntityId> {
    let area = Rect::from_corners(area.min, area.max);
    if !(is_valid_point(area.min) && is_valid_point(area.max)) {
        return Vec::new();
    }

    pickable(table)
        .filter_map(|entity| {
            let bounds = entity.physical_bounds()?;
            if !rects_intersect(bounds, area) {
                return None;
            }
            (coverage(bounds, area) >= config.coverage_threshold).then_some(entity.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AreaLight, Collider, Renderable};

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    #[test]
    fn test_tiers_are_concatenated_in_order() {
        let mut table = EntityTable::new();
        table.insert(SceneEntity::new(EntityId(1), "marker").at(Vec2::new(2.0, 0.0)));
        table.insert(
            SceneEntity::new(EntityId(2), "lamp")
                .at(Vec2::ZERO)
                .with_light(AreaLight::new(20.0, 20.0)),
        );
        table.insert(
            SceneEntity::new(EntityId(3), "tree")
                .at(Vec2::ZERO)
                .with_renderable(Renderable::new(0, Vec2::splat(20.0))),
        );
        table.insert(
            SceneEntity::new(EntityId(4), "wall")
                .at(Vec2::ZERO)
                .with_collider(Collider::boxed(20.0, 20.0)),
        );

        let candidates = pick_candidates(&table, Vec2::new(1.0, 1.0), &config());
        assert_eq!(candidates, vec![EntityId(4), EntityId(3), EntityId(2), EntityId(1)]);
    }

    #[test]
    fn test_collider_tier_sorted_by_center_distance() {
        let mut table = EntityTable::new();
        table.insert(
            SceneEntity::new(EntityId(1), "far")
                .at(Vec2::new(8.0, 0.0))
                .with_collider(Collider::boxed(20.0, 20.0)),
        );
        table.insert(
            SceneEntity::new(EntityId(2), "near")
                .at(Vec2::ZERO)
                .with_collider(Collider::boxed(20.0, 20.0)),
        );
        let candidates = pick_candidates(&table, Vec2::new(1.0, 0.0), &config());
        assert_eq!(candidates, vec![EntityId(2), EntityId(1)]);
    }

    #[test]
    fn test_sprite_tier_prefers_lower_layer_then_distance() {
        let mut table = EntityTable::new();
        table.insert(
            SceneEntity::new(EntityId(1), "back")
                .at(Vec2::ZERO)
                .with_renderable(Renderable::new(5, Vec2::splat(30.0))),
        );
        table.insert(
            SceneEntity::new(EntityId(2), "front-far")
                .at(Vec2::new(6.0, 0.0))
                .with_renderable(Renderable::new(1, Vec2::splat(30.0))),
        );
        table.insert(
            SceneEntity::new(EntityId(3), "front-near")
                .at(Vec2::new(1.0, 0.0))
                .with_renderable(Renderable::new(1, Vec2::splat(30.0))),
        );
        let mut hidden = Renderable::new(0, Vec2::splat(30.0));
        hidden.selectable = false;
        table.insert(SceneEntity::new(EntityId(4), "background").with_renderable(hidden));

        let candidates = pick_candidates(&table, Vec2::ZERO, &config());
        assert_eq!(candidates, vec![EntityId(3), EntityId(2), EntityId(1)]);
    }

    #[test]
    fn test_fallback_radius_and_exclusions() {
        let mut table = EntityTable::new();
        table.insert(SceneEntity::new(EntityId(1), "inside").at(Vec2::new(15.0, 0.0)));
        table.insert(SceneEntity::new(EntityId(2), "outside").at(Vec2::new(17.0, 0.0)));
        table.insert(SceneEntity::new(EntityId(3), "locked").at(Vec2::ZERO).unselectable());
        table.insert(SceneEntity::new(EntityId(4), "broken").at(Vec2::new(f32::NAN, 0.0)));

        let candidates = pick_candidates(&table, Vec2::ZERO, &config());
        assert_eq!(candidates, vec![EntityId(1)]);
    }

    #[test]
    fn test_box_pick_coverage_threshold() {
        let mut table = EntityTable::new();
        table.insert(
            SceneEntity::new(EntityId(1), "wall")
                .at(Vec2::new(5.0, 5.0))
                .with_collider(Collider::boxed(10.0, 10.0)),
        );

        // Exactly 40% covered
        let picked = box_pick(&table, Rect::new(6.0, 0.0, 20.0, 10.0), &config());
        assert_eq!(picked, vec![EntityId(1)]);

        // Just under 40% covered
        let picked = box_pick(&table, Rect::new(6.0001, 0.0, 20.0, 10.0), &config());
        assert!(picked.is_empty());
    }

    #[test]
    fn test_box_pick_ignores_sprites_and_normalizes_rect() {
        let mut table = EntityTable::new();
        table.insert(
            SceneEntity::new(EntityId(1), "sprite")
                .at(Vec2::new(5.0, 5.0))
                .with_renderable(Renderable::new(0, Vec2::splat(4.0))),
        );
        table.insert(
            SceneEntity::new(EntityId(2), "lamp")
                .at(Vec2::new(5.0, 5.0))
                .with_light(AreaLight::new(4.0, 4.0)),
        );
        let area = Rect {
            min: Vec2::new(10.0, 10.0),
            max: Vec2::new(0.0, 0.0),
        };
        assert_eq!(box_pick(&table, area, &config()), vec![EntityId(2)]);
    }
}
