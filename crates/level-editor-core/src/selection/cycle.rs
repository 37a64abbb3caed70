//! Click cycling through overlapping candidates.

use bevy::math::Vec2;

use crate::config::EditorConfig;
use crate::scene::EntityId;

/// Click-cycling state for overlapping entities.
///
/// A click close enough in space and time to the previous one advances
/// through the retained candidate list instead of resolving again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateCycle {
    candidates: Vec<EntityId>,
    cursor: usize,
    last_click_screen: Option<Vec2>,
    last_click_time: f64,
}

impl CandidateCycle {
    pub fn candidates(&self) -> &[EntityId] {
        &self.candidates
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn reset(&mut self) {
        self.candidates.clear();
        self.cursor = 0;
        self.last_click_screen = None;
    }

    /// Whether a click at `screen`/`time` continues the current cycle.
    pub fn is_continuation(&self, screen: Vec2, time: f64, config: &EditorConfig) -> bool {
        let Some(last) = self.last_click_screen else {
            return false;
        };
        if self.candidates.is_empty() {
            return false;
        }
        let elapsed = time - self.last_click_time;
        last.distance(screen) <= config.cycle_distance_px
            && (0.0..=config.cycle_timeout_secs).contains(&elapsed)
    }

    /// Register a click and return the entity it selects.
    ///
    /// `resolve` produces a fresh ordered candidate list when the click does
    /// not continue the cycle; `exists` filters out entities removed since the
    /// list was built. A click resolving to nothing resets the cycle.
    pub fn click<R, E>(
        &mut self,
        screen: Vec2,
        time: f64,
        config: &EditorConfig,
        resolve: R,
        exists: E,
    ) -> Option<EntityId>
    where
        R: FnOnce() -> Vec<EntityId>,
        E: Fn(EntityId) -> bool,
    {
        let continuing = self.is_continuation(screen, time, config);
        if continuing {
            let current = self.candidates.get(self.cursor).copied();
            self.candidates.retain(|id| exists(*id));
            // Keep the cursor on the current candidate if it survived
            self.cursor = current
                .and_then(|id| self.candidates.iter().position(|c| *c == id))
                .unwrap_or(self.candidates.len().saturating_sub(1));
        }

        if continuing && !self.candidates.is_empty() {
            self.cursor = (self.cursor + 1) % self.candidates.len();
        } else {
            self.candidates = resolve();
            self.cursor = 0;
        }

        if self.candidates.is_empty() {
            self.reset();
            return None;
        }

        self.last_click_screen = Some(screen);
        self.last_click_time = time;
        let picked = self.candidates[self.cursor];
        tracing::debug!(
            "[selection] click picked {} ({}/{})",
            picked,
            self.cursor + 1,
            self.candidates.len()
        );
        Some(picked)
    }
}
