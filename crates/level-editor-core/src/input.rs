//! Per-frame pointer sample and cursor feedback.

use bevy::math::Vec2;

use crate::camera::CameraProjection;

/// Modifier keys relevant to editing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Add to the selection instead of replacing it.
    pub additive: bool,
    /// Resize rectangles symmetrically about their center.
    pub mirror: bool,
}

/// Pointer state sampled once per frame.
///
/// Input is polled, not queued: a press and a release landing in the same
/// frame are both set and both handled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub screen: Vec2,
    pub world: Vec2,
    /// Primary button went down this frame.
    pub pressed: bool,
    /// Primary button is held.
    pub down: bool,
    /// Primary button went up this frame.
    pub released: bool,
    pub modifiers: Modifiers,
    /// Escape went down this frame.
    pub escape: bool,
    /// Seconds since an arbitrary epoch, used for click cycling.
    pub time: f64,
}

impl PointerState {
    /// Idle pointer at a screen position, with the world position derived
    /// from the camera.
    pub fn at(screen: Vec2, camera: &dyn CameraProjection, time: f64) -> Self {
        Self {
            screen,
            world: camera.screen_to_world(screen),
            time,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn pressed(mut self) -> Self {
        self.pressed = true;
        self.down = true;
        self
    }

    #[must_use]
    pub fn held(mut self) -> Self {
        self.down = true;
        self
    }

    #[must_use]
    pub fn released(mut self) -> Self {
        self.released = true;
        self.down = false;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Cursor shape requested from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorKind {
    #[default]
    Default,
    Move,
    Rotate,
    ResizeHorizontal,
    ResizeVertical,
    /// Top-left to bottom-right diagonal.
    ResizeMainDiagonal,
    /// Top-right to bottom-left diagonal.
    ResizeAntiDiagonal,
    Crosshair,
}
