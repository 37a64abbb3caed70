//! Debug-draw primitives consumed for gizmo visualization.

use bevy::color::Color;
use bevy::math::{Rect, Vec2};

/// Stateless immediate-mode drawing supplied by the host. All coordinates are
/// world space.
pub trait DebugDraw {
    fn line(&mut self, start: Vec2, end: Vec2, color: Color);
    /// Filled rectangle.
    fn rect(&mut self, rect: Rect, color: Color);
    fn hollow_rect(&mut self, rect: Rect, color: Color);
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Line with an arrow head of `head_size` at `end`.
    fn arrow(&mut self, start: Vec2, end: Vec2, head_size: f32, color: Color);
}

/// Drawing sink that discards everything (headless hosts).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDraw;

impl DebugDraw for NullDraw {
    fn line(&mut self, _: Vec2, _: Vec2, _: Color) {}
    fn rect(&mut self, _: Rect, _: Color) {}
    fn hollow_rect(&mut self, _: Rect, _: Color) {}
    fn circle(&mut self, _: Vec2, _: f32, _: Color) {}
    fn arrow(&mut self, _: Vec2, _: Vec2, _: f32, _: Color) {}
}

/// Colors for gizmo rendering.
pub struct GizmoColors;

impl GizmoColors {
    pub const X_AXIS: Color = Color::srgb(0.9, 0.2, 0.2);
    pub const Y_AXIS: Color = Color::srgb(0.2, 0.9, 0.2);
    pub const FREE: Color = Color::srgb(0.9, 0.9, 0.9);
    pub const ROTATE: Color = Color::srgb(0.2, 0.5, 0.9);
    pub const SCALE: Color = Color::srgb(0.9, 0.6, 0.2);
    pub const POINT: Color = Color::srgb(0.9, 0.4, 0.9);
    pub const RECT_HANDLE: Color = Color::srgb(0.0, 0.8, 0.8);
    pub const SELECTED: Color = Color::srgba(0.2, 0.8, 0.9, 0.8);
    pub const MARQUEE: Color = Color::srgba(0.8, 0.8, 0.0, 0.5);
    pub const HOVER: Color = Color::srgb(0.4, 1.0, 1.0);
    pub const ACTIVE: Color = Color::srgb(1.0, 1.0, 0.2);
}

/// Get color for a handle (with hover/active highlighting).
pub fn handle_color(base_color: Color, hovered: bool, active: bool) -> Color {
    if active {
        GizmoColors::ACTIVE
    } else if hovered {
        GizmoColors::HOVER
    } else {
        base_color
    }
}
