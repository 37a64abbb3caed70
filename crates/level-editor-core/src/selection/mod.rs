//! Selection state, resolution and click disambiguation.
//!
//! - [`SelectionSet`]: ordered selected ids, first is primary
//! - [`resolver`]: point and marquee picking
//! - [`CandidateCycle`]: repeated clicks cycle through overlapping entities
//! - [`SelectionTool`]: pointer interaction producing clicks and marquees

mod cycle;
pub mod resolver;
mod tool;

pub use cycle::*;
pub use resolver::{box_pick, pick_candidates};
pub use tool::*;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::centroid;
use crate::gizmo::GizmoKind;
use crate::scene::{EntityId, EntityTable};

/// Editing mode, switched by hotkey. Gates which gizmos are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    Normal,
    Resize,
    Rotate,
    ColliderResize,
}

impl SelectionMode {
    pub const ALL: [SelectionMode; 4] = [
        SelectionMode::Normal,
        SelectionMode::Resize,
        SelectionMode::Rotate,
        SelectionMode::ColliderResize,
    ];

    /// Gizmos active in this mode, in dispatch order.
    pub fn gizmos(self) -> &'static [GizmoKind] {
        match self {
            SelectionMode::Normal => &[GizmoKind::Translate],
            SelectionMode::Resize => &[GizmoKind::Scale],
            SelectionMode::Rotate => &[GizmoKind::Rotate],
            SelectionMode::ColliderResize => &[GizmoKind::PolygonPoint, GizmoKind::RectangleResize],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SelectionMode::Normal => "Move",
            SelectionMode::Resize => "Scale",
            SelectionMode::Rotate => "Rotate",
            SelectionMode::ColliderResize => "Edit Shape",
        }
    }
}

/// Ordered, duplicate-free list of selected entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// Entity used to anchor single-entity gizmos and camera follow.
    pub fn primary(&self) -> Option<EntityId> {
        self.ids.first().copied()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Select an entity.
    ///
    /// Without `additive` the selection is replaced. With `additive` the
    /// entity is appended if missing. `exclusive` makes it the primary entity.
    pub fn set_selected(&mut self, id: EntityId, additive: bool, exclusive: bool) {
        if !additive {
            self.ids.clear();
        }
        if exclusive {
            self.ids.retain(|e| *e != id);
            self.ids.insert(0, id);
        } else if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    /// Replace the selection with a single entity.
    pub fn select_only(&mut self, id: EntityId) {
        self.set_selected(id, false, false);
    }

    /// Replace (or extend, when `additive`) the selection with many entities.
    pub fn set_many<I>(&mut self, ids: I, additive: bool)
    where
        I: IntoIterator<Item = EntityId>,
    {
        if !additive {
            self.ids.clear();
        }
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn deselect_all(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that no longer resolve. Returns whether anything was removed.
    pub fn retain_existing(&mut self, table: &EntityTable) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| table.contains(*id));
        self.ids.len() != before
    }

    /// Positions of selected entities that exist and have a finite position.
    pub fn valid_positions<'a>(&'a self, table: &'a EntityTable) -> impl Iterator<Item = (EntityId, Vec2)> + 'a {
        self.ids.iter().filter_map(move |id| {
            let entity = table.get(*id)?;
            entity.has_valid_position().then(|| (*id, entity.position()))
        })
    }

    /// Centroid of valid selected positions.
    pub fn centroid(&self, table: &EntityTable) -> Option<Vec2> {
        centroid(self.valid_positions(table).map(|(_, p)| p))
    }
}
