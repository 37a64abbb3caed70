//! Pointer-driven selection: point clicks with cycling, and box drags.

use bevy::math::{Rect, Vec2};

use super::{box_pick, pick_candidates, CandidateCycle, SelectionSet};
use crate::config::EditorConfig;
use crate::draw::{DebugDraw, GizmoColors};
use crate::input::PointerState;
use crate::scene::{EntityId, EntityTable};

/// What a frame of selection interaction produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionOutcome {
    pub changed: bool,
    /// Suggested camera-follow target.
    pub focus: Option<Vec2>,
    /// Entity the inspector should show.
    pub inspector: Option<EntityId>,
}

/// Press tracked by the selection tool.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    screen: Vec2,
    world: Vec2,
}

/// Click and marquee selection.
///
/// A press that travels further than `box_drag_threshold_px` on screen
/// becomes a marquee; otherwise the release is a click resolved through the
/// candidate cycle.
#[derive(Debug, Clone, Default)]
pub struct SelectionTool {
    press: Option<Press>,
    box_active: bool,
    cycle: CandidateCycle,
}

impl SelectionTool {
    /// A press is in flight. The host keeps feeding the tool until release,
    /// even if the pointer crosses a gizmo handle.
    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    pub fn is_box_selecting(&self) -> bool {
        self.box_active
    }

    pub fn cycle(&self) -> &CandidateCycle {
        &self.cycle
    }

    /// Drop the pending press and the click cycle.
    pub fn cancel(&mut self) {
        self.press = None;
        self.box_active = false;
        self.cycle.reset();
    }

    /// Current marquee in world space, if a box drag is active.
    pub fn marquee(&self, pointer: &PointerState) -> Option<Rect> {
        let press = self.press.filter(|_| self.box_active)?;
        Some(Rect::from_corners(press.world, pointer.world))
    }

    pub fn update(
        &mut self,
        pointer: &PointerState,
        table: &EntityTable,
        selection: &mut SelectionSet,
        config: &EditorConfig,
        draw: &mut dyn DebugDraw,
    ) -> SelectionOutcome {
        if pointer.escape {
            self.cancel();
            return SelectionOutcome::default();
        }

        if pointer.pressed {
            self.press = Some(Press {
                screen: pointer.screen,
                world: pointer.world,
            });
            self.box_active = false;
        }

        let Some(press) = self.press else {
            return SelectionOutcome::default();
        };

        if !self.box_active && press.screen.distance(pointer.screen) > config.box_drag_threshold_px {
            self.box_active = true;
            self.cycle.reset();
            tracing::debug!("[selection] box drag started");
        }

        if let Some(marquee) = self.marquee(pointer) {
            draw.hollow_rect(marquee, GizmoColors::MARQUEE);
        }

        if !pointer.released && pointer.down {
            return SelectionOutcome::default();
        }

        // Released (or the button went up while we were not looking)
        self.press = None;
        let before = selection.clone();
        let additive = pointer.modifiers.additive;
        let mut outcome = SelectionOutcome::default();

        if std::mem::take(&mut self.box_active) {
            let area = Rect::from_corners(press.world, pointer.world);
            let picked = box_pick(table, area, config);
            tracing::debug!("[selection] box picked {} entities", picked.len());
            if let Some(first) = picked.first().copied() {
                outcome.inspector = Some(first);
                outcome.focus = table.get(first).map(|e| e.position());
                selection.set_many(picked, additive);
            } else if !additive {
                selection.deselect_all();
            }
        } else {
            let picked = self.cycle.click(
                pointer.screen,
                pointer.time,
                config,
                || pick_candidates(table, pointer.world, config),
                |id| table.contains(id),
            );
            match picked {
                Some(id) => {
                    selection.set_selected(id, additive, false);
                    outcome.inspector = Some(id);
                    outcome.focus = selection.centroid(table);
                }
                None if !additive => selection.deselect_all(),
                None => {}
            }
        }

        outcome.changed = *selection != before;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::scene::{Collider, SceneEntity};
    use crate::test_utils::{pointer_at, RecordingDraw};

    fn stacked_table() -> EntityTable {
        let mut table = EntityTable::new();
        for (id, name) in [(1, "a"), (2, "b"), (3, "c")] {
            table.insert(
                SceneEntity::new(EntityId(id), name)
                    .at(Vec2::new(100.0, 100.0))
                    .with_collider(Collider::boxed(20.0, 20.0)),
            );
        }
        table.insert(
            SceneEntity::new(EntityId(4), "far")
                .at(Vec2::new(300.0, 300.0))
                .with_collider(Collider::boxed(20.0, 20.0)),
        );
        table
    }

    struct Fixture {
        tool: SelectionTool,
        table: EntityTable,
        selection: SelectionSet,
        config: EditorConfig,
        draw: RecordingDraw,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                tool: SelectionTool::default(),
                table: stacked_table(),
                selection: SelectionSet::new(),
                config: EditorConfig::default(),
                draw: RecordingDraw::default(),
            }
        }

        fn frame(&mut self, pointer: PointerState) -> SelectionOutcome {
            self.tool.update(
                &pointer,
                &self.table,
                &mut self.selection,
                &self.config,
                &mut self.draw,
            )
        }

        fn click(&mut self, at: Vec2, time: f64, modifiers: Modifiers) -> SelectionOutcome {
            let mut pointer = pointer_at(at).with_modifiers(modifiers);
            pointer.time = time;
            self.frame(pointer.pressed());
            self.frame(pointer.released())
        }
    }

    #[test]
    fn test_clicks_cycle_through_stack() {
        let mut f = Fixture::new();
        let at = Vec2::new(101.0, 100.0);
        let mut picked = Vec::new();
        for i in 0..4 {
            let outcome = f.click(at, f64::from(i) * 0.2, Modifiers::default());
            assert!(outcome.changed);
            picked.push(f.selection.primary());
        }
        let first = picked[0];
        assert_eq!(picked[3], first);
        assert_ne!(picked[1], first);
        assert_ne!(picked[2], picked[1]);
        assert_eq!(f.selection.len(), 1);
    }

    #[test]
    fn test_miss_click_deselects_unless_additive() {
        let mut f = Fixture::new();
        f.click(Vec2::new(300.0, 300.0), 0.0, Modifiers::default());
        assert_eq!(f.selection.ids(), &[EntityId(4)]);

        let additive = Modifiers {
            additive: true,
            ..Modifiers::default()
        };
        let outcome = f.click(Vec2::new(600.0, 600.0), 1.0, additive);
        assert!(!outcome.changed);
        assert_eq!(f.selection.len(), 1);

        let outcome = f.click(Vec2::new(600.0, 600.0), 2.0, Modifiers::default());
        assert!(outcome.changed);
        assert!(f.selection.is_empty());
    }

    #[test]
    fn test_additive_click_extends() {
        let mut f = Fixture::new();
        f.click(Vec2::new(300.0, 300.0), 0.0, Modifiers::default());
        let additive = Modifiers {
            additive: true,
            ..Modifiers::default()
        };
        let outcome = f.click(Vec2::new(100.0, 100.0), 5.0, additive);
        assert_eq!(f.selection.len(), 2);
        assert_eq!(f.selection.primary(), Some(EntityId(4)));
        assert!(outcome.focus.is_some());
    }

    #[test]
    fn test_marquee_selects_covered_entities() {
        let mut f = Fixture::new();
        f.frame(pointer_at(Vec2::new(50.0, 50.0)).pressed());
        f.frame(pointer_at(Vec2::new(52.0, 52.0)).held());
        assert!(!f.tool.is_box_selecting());
        f.frame(pointer_at(Vec2::new(150.0, 150.0)).held());
        assert!(f.tool.is_box_selecting());
        assert_eq!(f.draw.hollow_rects.len(), 1);

        let outcome = f.frame(pointer_at(Vec2::new(150.0, 150.0)).released());
        assert_eq!(f.selection.ids(), &[EntityId(1), EntityId(2), EntityId(3)]);
        assert_eq!(outcome.inspector, Some(EntityId(1)));
        assert_eq!(outcome.focus, Some(Vec2::new(100.0, 100.0)));
        assert!(!f.tool.is_active());
    }

    #[test]
    fn test_box_drag_resets_click_cycle() {
        let mut f = Fixture::new();
        let at = Vec2::new(100.0, 100.0);
        f.click(at, 0.0, Modifiers::default());
        assert!(!f.tool.cycle().is_empty());

        f.frame(pointer_at(at).pressed());
        f.frame(pointer_at(at + Vec2::new(40.0, 0.0)).held());
        assert!(f.tool.cycle().is_empty());
    }

    #[test]
    fn test_escape_cancels_pending_press() {
        let mut f = Fixture::new();
        f.frame(pointer_at(Vec2::new(50.0, 50.0)).pressed());
        f.frame(pointer_at(Vec2::new(150.0, 150.0)).held());
        let mut escape = pointer_at(Vec2::new(150.0, 150.0)).held();
        escape.escape = true;
        f.frame(escape);
        assert!(!f.tool.is_active());

        let outcome = f.frame(pointer_at(Vec2::new(150.0, 150.0)).released());
        assert_eq!(outcome, SelectionOutcome::default());
        assert!(f.selection.is_empty());
    }
}
