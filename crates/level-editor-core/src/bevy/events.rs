//! Messages published by the editor systems.

use bevy::prelude::*;

use crate::scene::EntityId;
use crate::selection::SelectionMode;
use crate::undo::UndoDirection;

/// Message fired when the selection changes.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SelectionChangedEvent {
    /// New selection, primary entity first.
    pub selected: Vec<EntityId>,
    /// Entity the inspector should show.
    pub inspector: Option<EntityId>,
    /// Camera-follow target.
    pub focus: Option<Vec2>,
}

/// Message fired when collider geometry of an entity was rewritten.
///
/// Hosts with a physics backend rebuild the entity's collider on this.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColliderChangedEvent {
    pub entity: EntityId,
}

/// Message fired when a completed drag pushed an undo action.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct UndoPushedEvent {
    pub label: String,
}

/// Message fired after an undo or redo was applied.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct HistoryAppliedEvent {
    pub direction: UndoDirection,
    pub label: String,
}

/// Message fired when the editing mode changes.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChangedEvent {
    pub mode: SelectionMode,
}
