//! Scene entities as seen by the editing core.
//!
//! The scene itself (storage, prefabs, persistence) belongs to the host. The
//! core only reads entity geometry and writes transform, collider and light
//! fields in place, always through stable [`EntityId`]s.

use std::collections::BTreeMap;
use std::fmt;

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::{bounds_of, is_valid_point};

/// Stable identifier of a scene entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Position, rotation (radians) and scale of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2d {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2d {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

/// Collider geometry, in world units relative to the collider center.
///
/// Colliders are axis-aligned and are not affected by the entity's rotation
/// or scale.
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// Four corners, counter-clockwise starting at the min corner.
    Box { points: [Vec2; 4] },
    Polygon { points: Vec<Vec2> },
    Circle { radius: f32 },
}

/// Collider attached to an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset of the collider center from the entity position.
    pub offset: Vec2,
}

impl Collider {
    pub fn boxed(width: f32, height: f32) -> Self {
        Self {
            shape: ColliderShape::Box {
                points: box_points(Vec2::new(width, height) / 2.0),
            },
            offset: Vec2::ZERO,
        }
    }

    pub fn polygon(points: Vec<Vec2>) -> Self {
        Self {
            shape: ColliderShape::Polygon { points },
            offset: Vec2::ZERO,
        }
    }

    pub fn circle(radius: f32) -> Self {
        Self {
            shape: ColliderShape::Circle { radius },
            offset: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space center of the collider.
    pub fn world_center(&self, entity_position: Vec2) -> Vec2 {
        entity_position + self.offset
    }

    /// World-space axis-aligned bounds.
    pub fn bounds(&self, entity_position: Vec2) -> Rect {
        let center = self.world_center(entity_position);
        match &self.shape {
            ColliderShape::Box { points } => local_bounds(points, center),
            ColliderShape::Polygon { points } => local_bounds(points, center),
            ColliderShape::Circle { radius } => {
                Rect::from_center_half_size(center, Vec2::splat(radius.abs()))
            }
        }
    }

    /// World rectangle of a box collider, `None` for other shapes.
    pub fn box_rect(&self, entity_position: Vec2) -> Option<Rect> {
        match self.shape {
            ColliderShape::Box { .. } => Some(self.bounds(entity_position)),
            _ => None,
        }
    }

    /// Rewrite a box collider so that it covers `rect` in world space.
    ///
    /// Returns `false` (and leaves the collider untouched) for other shapes.
    pub fn set_box_rect(&mut self, entity_position: Vec2, rect: Rect) -> bool {
        let ColliderShape::Box { points } = &mut self.shape else {
            return false;
        };
        *points = box_points(rect.half_size());
        self.offset = rect.center() - entity_position;
        true
    }
}

fn box_points(half: Vec2) -> [Vec2; 4] {
    [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ]
}

fn local_bounds(points: &[Vec2], center: Vec2) -> Rect {
    match bounds_of(points) {
        Some(local) => Rect {
            min: local.min + center,
            max: local.max + center,
        },
        None => Rect::from_center_size(center, Vec2::ZERO),
    }
}

/// Rectangular area light centered on its entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaLight {
    pub width: f32,
    pub height: f32,
}

impl AreaLight {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn bounds(&self, entity_position: Vec2) -> Rect {
        Rect::from_center_size(entity_position, self.size().abs())
    }
}

/// Sprite-like visual of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    /// Lower layers are drawn later, so they appear in front.
    pub render_layer: i32,
    /// Bounds relative to the entity position.
    pub bounds: Rect,
    pub selectable: bool,
}

impl Renderable {
    pub fn new(render_layer: i32, size: Vec2) -> Self {
        Self {
            render_layer,
            bounds: Rect::from_center_size(Vec2::ZERO, size),
            selectable: true,
        }
    }

    pub fn world_bounds(&self, entity_position: Vec2) -> Rect {
        Rect {
            min: self.bounds.min + entity_position,
            max: self.bounds.max + entity_position,
        }
    }
}

/// A placed object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEntity {
    pub id: EntityId,
    pub name: String,
    pub selectable: bool,
    pub transform: Transform2d,
    pub collider: Option<Collider>,
    pub light: Option<AreaLight>,
    pub renderable: Option<Renderable>,
}

impl SceneEntity {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            selectable: true,
            transform: Transform2d::default(),
            collider: None,
            light: None,
            renderable: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: Vec2) -> Self {
        self.transform.position = position;
        self
    }

    #[must_use]
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: AreaLight) -> Self {
        self.light = Some(light);
        self
    }

    #[must_use]
    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    #[must_use]
    pub fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn has_valid_position(&self) -> bool {
        is_valid_point(self.transform.position)
    }

    /// Bounds used for marquee selection: collider first, then area light.
    pub fn physical_bounds(&self) -> Option<Rect> {
        let position = self.position();
        self.collider
            .as_ref()
            .map(|c| c.bounds(position))
            .or_else(|| self.light.map(|l| l.bounds(position)))
    }
}

/// Id-keyed entity table shared between the host and the editing core.
///
/// A removed entity simply stops resolving; anything holding its id (drag
/// snapshots, undo records) drops it instead of dangling.
#[derive(Debug, Default, Clone)]
pub struct EntityTable {
    entities: BTreeMap<EntityId, SceneEntity>,
    next_id: u64,
    collider_changes: Vec<EntityId>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next free id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert (or replace) an entity, keyed by its own id.
    pub fn insert(&mut self, entity: SceneEntity) -> EntityId {
        let id = entity.id;
        self.next_id = self.next_id.max(id.0 + 1);
        self.entities.insert(id, entity);
        id
    }

    /// Create an entity with a fresh id and return it for further setup.
    pub fn spawn(&mut self, name: impl Into<String>) -> &mut SceneEntity {
        let id = self.allocate_id();
        self.entities
            .entry(id)
            .or_insert_with(|| SceneEntity::new(id, name))
    }

    pub fn remove(&mut self, id: EntityId) -> Option<SceneEntity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&SceneEntity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.values()
    }

    /// Display name of an entity, falling back to its id.
    pub fn name_of(&self, id: EntityId) -> String {
        self.get(id)
            .map_or_else(|| id.to_string(), |e| e.name.clone())
    }

    /// Record that an entity's collider geometry changed so the host's
    /// collision system can refresh it.
    pub fn notify_collider_changed(&mut self, id: EntityId) {
        if !self.collider_changes.contains(&id) {
            self.collider_changes.push(id);
        }
    }

    /// Take pending collider change notifications.
    pub fn take_collider_changes(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.collider_changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_collider_bounds_follow_offset() {
        let collider = Collider::boxed(10.0, 4.0).with_offset(Vec2::new(5.0, 0.0));
        let bounds = collider.bounds(Vec2::new(100.0, 100.0));
        assert_eq!(bounds.min, Vec2::new(100.0, 98.0));
        assert_eq!(bounds.max, Vec2::new(110.0, 102.0));
    }

    #[test]
    fn test_set_box_rect_rewrites_points_and_offset() {
        let mut collider = Collider::boxed(10.0, 10.0);
        let position = Vec2::new(5.0, 5.0);
        assert!(collider.set_box_rect(position, Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert_eq!(collider.offset, Vec2::new(5.0, 5.0));
        let bounds = collider.bounds(position);
        assert_eq!(bounds.min, Vec2::ZERO);
        assert_eq!(bounds.max, Vec2::new(20.0, 20.0));

        let mut circle = Collider::circle(3.0);
        assert!(!circle.set_box_rect(position, Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_physical_bounds_prefers_collider() {
        let entity = SceneEntity::new(EntityId(1), "lamp")
            .at(Vec2::new(10.0, 10.0))
            .with_light(AreaLight::new(40.0, 40.0))
            .with_collider(Collider::boxed(2.0, 2.0));
        let bounds = entity.physical_bounds().unwrap();
        assert_eq!(bounds.size(), Vec2::new(2.0, 2.0));

        let light_only = SceneEntity::new(EntityId(2), "glow").with_light(AreaLight::new(4.0, 6.0));
        assert_eq!(light_only.physical_bounds().unwrap().size(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_table_ids_and_collider_notifications() {
        let mut table = EntityTable::new();
        table.insert(SceneEntity::new(EntityId(7), "crate"));
        let spawned = table.spawn("barrel").id;
        assert_eq!(spawned, EntityId(8));
        assert_eq!(table.name_of(EntityId(7)), "crate");
        assert_eq!(table.name_of(EntityId(99)), "#99");

        table.notify_collider_changed(spawned);
        table.notify_collider_changed(spawned);
        assert_eq!(table.take_collider_changes(), vec![spawned]);
        assert!(table.take_collider_changes().is_empty());
    }
}
