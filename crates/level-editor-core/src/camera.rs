//! Camera projection consumed by the editor.

use bevy::math::Vec2;

/// World <-> screen mapping supplied by the host camera.
pub trait CameraProjection {
    fn world_to_screen(&self, world: Vec2) -> Vec2;
    fn screen_to_world(&self, screen: Vec2) -> Vec2;
    /// Screen pixels per world unit.
    fn zoom(&self) -> f32;
}

/// Orthographic camera with a top-left screen origin.
///
/// `y_down` selects the world convention: `true` when world Y grows in the
/// same direction as screen Y, `false` for a Y-up world such as Bevy's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    /// World position shown at the viewport center.
    pub center: Vec2,
    pub zoom: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    pub y_down: bool,
}

impl OrthoCamera {
    pub fn new(center: Vec2, zoom: f32, viewport: Vec2) -> Self {
        Self {
            center,
            zoom,
            viewport,
            y_down: true,
        }
    }

    fn safe_zoom(&self) -> f32 {
        if self.zoom.is_finite() && self.zoom > f32::EPSILON {
            self.zoom
        } else {
            1.0
        }
    }
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0, Vec2::new(1280.0, 720.0))
    }
}

impl CameraProjection for OrthoCamera {
    fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let mut offset = (world - self.center) * self.safe_zoom();
        if !self.y_down {
            offset.y = -offset.y;
        }
        self.viewport / 2.0 + offset
    }

    fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let mut offset = (screen - self.viewport / 2.0) / self.safe_zoom();
        if !self.y_down {
            offset.y = -offset.y;
        }
        self.center + offset
    }

    fn zoom(&self) -> f32 {
        self.safe_zoom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_mapping() {
        let camera = OrthoCamera::new(Vec2::new(100.0, 50.0), 2.0, Vec2::new(800.0, 600.0));
        assert_eq!(camera.screen_to_world(Vec2::new(400.0, 300.0)), Vec2::new(100.0, 50.0));
        assert_eq!(camera.screen_to_world(Vec2::new(420.0, 310.0)), Vec2::new(110.0, 55.0));
        assert_eq!(camera.world_to_screen(Vec2::new(110.0, 55.0)), Vec2::new(420.0, 310.0));
    }

    #[test]
    fn test_y_up_world_flips_vertical_axis() {
        let camera = OrthoCamera {
            y_down: false,
            ..OrthoCamera::new(Vec2::ZERO, 1.0, Vec2::new(200.0, 200.0))
        };
        assert_eq!(camera.screen_to_world(Vec2::new(100.0, 90.0)), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_degenerate_zoom_falls_back_to_one() {
        let camera = OrthoCamera::new(Vec2::ZERO, 0.0, Vec2::ZERO);
        assert_eq!(camera.zoom(), 1.0);
    }
}
