//! Data-only undo records and the interpreter that applies them.
//!
//! A completed drag turns into one [`UndoAction`]: a list of
//! `{entity, before, after}` field changes plus a label. Actions hold no live
//! references, so they can be stored, serialized and replayed against an
//! [`EntityTable`] at any later time.

use std::collections::VecDeque;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::{ColliderShape, EntityId, EntityTable, SceneEntity};

/// Maximum number of undo steps kept by default.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Errors raised while applying an undo record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UndoError {
    #[error("Entity {0} no longer exists")]
    EntityNotFound(EntityId),
    #[error("Entity {entity} has no {field} to restore")]
    FieldMismatch { entity: EntityId, field: &'static str },
}

/// Which field of an entity a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Position,
    Rotation,
    Scale,
    PolygonPoint(usize),
    BoxCollider,
    AreaLight,
}

/// Captured value of one entity field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    Position { value: [f32; 2] },
    Rotation { value: f32 },
    Scale { value: [f32; 2] },
    PolygonPoint { index: usize, point: [f32; 2] },
    BoxCollider { offset: [f32; 2], points: [[f32; 2]; 4] },
    AreaLight { position: [f32; 2], width: f32, height: f32 },
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Position { .. } => FieldKind::Position,
            FieldValue::Rotation { .. } => FieldKind::Rotation,
            FieldValue::Scale { .. } => FieldKind::Scale,
            FieldValue::PolygonPoint { index, .. } => FieldKind::PolygonPoint(*index),
            FieldValue::BoxCollider { .. } => FieldKind::BoxCollider,
            FieldValue::AreaLight { .. } => FieldKind::AreaLight,
        }
    }

    /// Read the current value of a field, `None` when the entity lacks it.
    pub fn read(kind: FieldKind, entity: &SceneEntity) -> Option<FieldValue> {
        let transform = &entity.transform;
        match kind {
            FieldKind::Position => Some(FieldValue::Position {
                value: transform.position.to_array(),
            }),
            FieldKind::Rotation => Some(FieldValue::Rotation {
                value: transform.rotation,
            }),
            FieldKind::Scale => Some(FieldValue::Scale {
                value: transform.scale.to_array(),
            }),
            FieldKind::PolygonPoint(index) => match &entity.collider.as_ref()?.shape {
                ColliderShape::Polygon { points } => Some(FieldValue::PolygonPoint {
                    index,
                    point: points.get(index)?.to_array(),
                }),
                _ => None,
            },
            FieldKind::BoxCollider => {
                let collider = entity.collider.as_ref()?;
                match &collider.shape {
                    ColliderShape::Box { points } => Some(FieldValue::BoxCollider {
                        offset: collider.offset.to_array(),
                        points: points.map(|p| p.to_array()),
                    }),
                    _ => None,
                }
            }
            FieldKind::AreaLight => {
                let light = entity.light?;
                Some(FieldValue::AreaLight {
                    position: transform.position.to_array(),
                    width: light.width,
                    height: light.height,
                })
            }
        }
    }

    /// Write this value into an entity. Returns whether collider geometry
    /// changed.
    pub fn write(&self, entity: &mut SceneEntity) -> Result<bool, UndoError> {
        let id = entity.id;
        match self {
            FieldValue::Position { value } => {
                entity.transform.position = Vec2::from_array(*value);
                Ok(false)
            }
            FieldValue::Rotation { value } => {
                entity.transform.rotation = *value;
                Ok(false)
            }
            FieldValue::Scale { value } => {
                entity.transform.scale = Vec2::from_array(*value);
                Ok(false)
            }
            FieldValue::PolygonPoint { index, point } => {
                let slot = match entity.collider.as_mut().map(|c| &mut c.shape) {
                    Some(ColliderShape::Polygon { points }) => points.get_mut(*index),
                    _ => None,
                };
                let Some(slot) = slot else {
                    return Err(UndoError::FieldMismatch {
                        entity: id,
                        field: "polygon point",
                    });
                };
                *slot = Vec2::from_array(*point);
                Ok(true)
            }
            FieldValue::BoxCollider { offset, points } => {
                let Some(collider) = entity.collider.as_mut() else {
                    return Err(UndoError::FieldMismatch {
                        entity: id,
                        field: "box collider",
                    });
                };
                let ColliderShape::Box { points: current } = &mut collider.shape else {
                    return Err(UndoError::FieldMismatch {
                        entity: id,
                        field: "box collider",
                    });
                };
                *current = points.map(Vec2::from_array);
                collider.offset = Vec2::from_array(*offset);
                Ok(true)
            }
            FieldValue::AreaLight {
                position,
                width,
                height,
            } => {
                let Some(light) = entity.light.as_mut() else {
                    return Err(UndoError::FieldMismatch {
                        entity: id,
                        field: "area light",
                    });
                };
                light.width = *width;
                light.height = *height;
                entity.transform.position = Vec2::from_array(*position);
                Ok(false)
            }
        }
    }
}

/// One captured field change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub entity: EntityId,
    pub before: FieldValue,
    pub after: FieldValue,
}

impl FieldChange {
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Direction in which an action is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoDirection {
    Undo,
    Redo,
}

/// A single undoable transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoAction {
    pub label: String,
    /// Entity the host should focus when the action is replayed.
    pub primary: Option<EntityId>,
    pub changes: Vec<FieldChange>,
}

impl UndoAction {
    /// Build an action by diffing press-time values against the table.
    ///
    /// Entities that no longer resolve, or no longer carry the captured
    /// field, are dropped. Returns `None` when nothing changed; otherwise the
    /// action covers every captured entity so undo restores them uniformly.
    pub fn from_snapshot(
        verb: &str,
        snapshot: &[(EntityId, FieldValue)],
        table: &EntityTable,
    ) -> Option<UndoAction> {
        let mut changes = Vec::with_capacity(snapshot.len());
        for (id, before) in snapshot {
            let Some(entity) = table.get(*id) else {
                tracing::debug!("[undo] dropping {} from snapshot: entity removed", id);
                continue;
            };
            let Some(after) = FieldValue::read(before.kind(), entity) else {
                tracing::debug!("[undo] dropping {} from snapshot: field removed", id);
                continue;
            };
            changes.push(FieldChange {
                entity: *id,
                before: before.clone(),
                after,
            });
        }

        if changes.iter().all(FieldChange::is_noop) {
            return None;
        }

        let mut names: Vec<String> = Vec::new();
        for change in &changes {
            let name = table.name_of(change.entity);
            if !names.contains(&name) {
                names.push(name);
            }
        }

        Some(UndoAction {
            label: format!("{verb} {}", names.join(", ")),
            primary: changes.first().map(|c| c.entity),
            changes,
        })
    }

    /// Apply every change in the given direction.
    ///
    /// Changes whose entity cannot be resolved are skipped; the first such
    /// failure is returned after all other changes have been applied.
    pub fn apply(&self, table: &mut EntityTable, direction: UndoDirection) -> Result<usize, UndoError> {
        let mut applied = 0;
        let mut first_error = None;
        let ordered: Box<dyn Iterator<Item = &FieldChange>> = match direction {
            UndoDirection::Undo => Box::new(self.changes.iter().rev()),
            UndoDirection::Redo => Box::new(self.changes.iter()),
        };

        for change in ordered {
            let value = match direction {
                UndoDirection::Undo => &change.before,
                UndoDirection::Redo => &change.after,
            };
            let result = match table.get_mut(change.entity) {
                Some(entity) => value.write(entity),
                None => Err(UndoError::EntityNotFound(change.entity)),
            };
            match result {
                Ok(collider_changed) => {
                    if collider_changed {
                        table.notify_collider_changed(change.entity);
                    }
                    applied += 1;
                }
                Err(err) => {
                    tracing::warn!("[undo] {:?} '{}': {}", direction, self.label, err);
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(applied),
        }
    }
}

/// Sink for completed transactions.
pub trait UndoStore {
    fn push(&mut self, action: UndoAction);
}

impl UndoStore for Vec<UndoAction> {
    fn push(&mut self, action: UndoAction) {
        Vec::push(self, action);
    }
}

/// Bounded undo/redo history.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    undo_stack: VecDeque<UndoAction>,
    redo_stack: Vec<UndoAction>,
    max_history: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::with_max_history(DEFAULT_MAX_HISTORY)
    }
}

impl UndoHistory {
    pub fn with_max_history(max_history: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_history: max_history.max(1),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// The most recent undoable action.
    pub fn last(&self) -> Option<&UndoAction> {
        self.undo_stack.back()
    }

    /// Undo the most recent action. Returns it, or `None` when the history is
    /// empty. The action moves to the redo stack even when some of its
    /// entities failed to resolve.
    pub fn undo(&mut self, table: &mut EntityTable) -> Result<Option<&UndoAction>, UndoError> {
        let Some(action) = self.undo_stack.pop_back() else {
            return Ok(None);
        };
        let result = action.apply(table, UndoDirection::Undo);
        self.redo_stack.push(action);
        result?;
        Ok(self.redo_stack.last())
    }

    /// Redo the most recently undone action.
    pub fn redo(&mut self, table: &mut EntityTable) -> Result<Option<&UndoAction>, UndoError> {
        let Some(action) = self.redo_stack.pop() else {
            return Ok(None);
        };
        let result = action.apply(table, UndoDirection::Redo);
        self.undo_stack.push_back(action);
        result?;
        Ok(self.undo_stack.back())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl UndoStore for UndoHistory {
    fn push(&mut self, action: UndoAction) {
        tracing::debug!("[undo] push '{}' ({} changes)", action.label, action.changes.len());
        self.undo_stack.push_back(action);
        while self.undo_stack.len() > self.max_history {
            self.undo_stack.pop_front();
        }
        // New actions invalidate the redo branch
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AreaLight, Collider, SceneEntity};

    fn table() -> EntityTable {
        let mut table = EntityTable::new();
        table.insert(SceneEntity::new(EntityId(1), "crate").at(Vec2::new(1.0, 2.0)));
        table.insert(
            SceneEntity::new(EntityId(2), "lamp")
                .at(Vec2::new(5.0, 5.0))
                .with_light(AreaLight::new(4.0, 4.0)),
        );
        table.insert(
            SceneEntity::new(EntityId(3), "rock")
                .with_collider(Collider::polygon(vec![Vec2::ZERO, Vec2::X, Vec2::Y])),
        );
        table
    }

    #[test]
    fn test_unchanged_snapshot_builds_nothing() {
        let table = table();
        let snapshot = vec![(
            EntityId(1),
            FieldValue::Position { value: [1.0, 2.0] },
        )];
        assert!(UndoAction::from_snapshot("Move", &snapshot, &table).is_none());
    }

    #[test]
    fn test_snapshot_keeps_unchanged_entities_and_labels_names() {
        let mut table = table();
        let snapshot = vec![
            (EntityId(1), FieldValue::Position { value: [1.0, 2.0] }),
            (EntityId(2), FieldValue::Position { value: [5.0, 5.0] }),
        ];
        table.get_mut(EntityId(2)).unwrap().transform.position = Vec2::new(9.0, 9.0);

        let action = UndoAction::from_snapshot("Move", &snapshot, &table).expect("action");
        assert_eq!(action.label, "Move crate, lamp");
        assert_eq!(action.primary, Some(EntityId(1)));
        assert_eq!(action.changes.len(), 2);
    }

    #[test]
    fn test_removed_entity_is_dropped_at_commit() {
        let mut table = table();
        let snapshot = vec![
            (EntityId(1), FieldValue::Position { value: [0.0, 0.0] }),
            (EntityId(2), FieldValue::Position { value: [0.0, 0.0] }),
        ];
        table.remove(EntityId(1));

        let action = UndoAction::from_snapshot("Move", &snapshot, &table).expect("action");
        assert_eq!(action.changes.len(), 1);
        assert_eq!(action.changes[0].entity, EntityId(2));
    }

    #[test]
    fn test_history_undo_redo() {
        let mut table = table();
        let mut history = UndoHistory::default();
        let snapshot = vec![(EntityId(3), FieldValue::PolygonPoint { index: 1, point: [1.0, 0.0] })];
        if let Some(ColliderShape::Polygon { points }) =
            table.get_mut(EntityId(3)).unwrap().collider.as_mut().map(|c| &mut c.shape)
        {
            points[1] = Vec2::new(3.0, 0.0);
        }
        history.push(UndoAction::from_snapshot("Edit point", &snapshot, &table).unwrap());

        let label = history.undo(&mut table).unwrap().map(|a| a.label.clone());
        assert_eq!(label.as_deref(), Some("Edit point rock"));
        let read = FieldValue::read(FieldKind::PolygonPoint(1), table.get(EntityId(3)).unwrap());
        assert_eq!(read, Some(FieldValue::PolygonPoint { index: 1, point: [1.0, 0.0] }));
        assert_eq!(table.take_collider_changes(), vec![EntityId(3)]);
        assert!(history.can_redo());

        history.redo(&mut table).unwrap();
        let read = FieldValue::read(FieldKind::PolygonPoint(1), table.get(EntityId(3)).unwrap());
        assert_eq!(read, Some(FieldValue::PolygonPoint { index: 1, point: [3.0, 0.0] }));
        assert!(!history.can_redo());
        assert!(history.undo(&mut EntityTable::new()).is_err());
    }

    #[test]
    fn test_history_is_bounded_and_push_clears_redo() {
        let mut table = table();
        let mut history = UndoHistory::with_max_history(2);
        for i in 0..3 {
            history.push(UndoAction {
                label: format!("step {i}"),
                primary: None,
                changes: vec![FieldChange {
                    entity: EntityId(1),
                    before: FieldValue::Rotation { value: 0.0 },
                    after: FieldValue::Rotation { value: 1.0 },
                }],
            });
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().label, "step 2");

        history.undo(&mut table).unwrap();
        assert!(history.can_redo());
        history.push(UndoAction {
            label: "other".to_string(),
            primary: None,
            changes: Vec::new(),
        });
        assert!(!history.can_redo());
    }

    #[test]
    fn test_action_serializes() {
        let action = UndoAction {
            label: "Resize lamp".to_string(),
            primary: Some(EntityId(2)),
            changes: vec![FieldChange {
                entity: EntityId(2),
                before: FieldValue::AreaLight { position: [5.0, 5.0], width: 4.0, height: 4.0 },
                after: FieldValue::AreaLight { position: [6.0, 5.0], width: 6.0, height: 4.0 },
            }],
        };
        let json = serde_json::to_string(&action).expect("Failed to serialize");
        let loaded: UndoAction = serde_json::from_str(&json).expect("Failed to deserialize");
        assert_eq!(loaded, action);
    }
}
