//! Rendering systems for the editor.
//!
//! Uses Bevy's Gizmos API: scene entities are drawn as outlines and the
//! editor's [`DrawQueue`] is flushed on top of them.

use bevy::prelude::*;

use crate::bevy::resources::{DrawCommand, DrawQueue, EditorScene};
use crate::scene::{ColliderShape, SceneEntity};

/// Gizmo configuration resource for scene rendering.
#[derive(Resource)]
pub struct SceneGizmoConfig {
    /// Color for collider outlines.
    pub collider_color: Color,
    /// Color for area light bounds.
    pub light_color: Color,
    /// Color for sprite bounds.
    pub sprite_color: Color,
    /// Marker radius for entities without geometry.
    pub marker_radius: f32,
}

impl Default for SceneGizmoConfig {
    fn default() -> Self {
        Self {
            collider_color: Color::srgb(0.8, 0.8, 0.8),
            light_color: Color::srgba(1.0, 0.9, 0.4, 0.5),
            sprite_color: Color::srgba(0.5, 0.5, 0.9, 0.4),
            marker_radius: 4.0,
        }
    }
}

/// Draw every scene entity.
pub fn render_scene_entities(
    mut gizmos: Gizmos,
    scene: Res<EditorScene>,
    config: Res<SceneGizmoConfig>,
) {
    for entity in scene.iter().filter(|e| e.has_valid_position()) {
        render_entity(&mut gizmos, entity, &config);
    }
}

fn render_entity(gizmos: &mut Gizmos, entity: &SceneEntity, config: &SceneGizmoConfig) {
    let position = entity.position();
    let mut drawn = false;

    if let Some(renderable) = entity.renderable {
        let bounds = renderable.world_bounds(position);
        gizmos.rect_2d(
            Isometry2d::from_translation(bounds.center()),
            bounds.size(),
            config.sprite_color,
        );
        drawn = true;
    }

    if let Some(light) = entity.light {
        gizmos.rect_2d(
            Isometry2d::from_translation(position),
            light.size().abs(),
            config.light_color,
        );
        drawn = true;
    }

    if let Some(collider) = &entity.collider {
        let center = collider.world_center(position);
        match &collider.shape {
            ColliderShape::Box { points } => {
                draw_closed_loop(gizmos, points, center, config.collider_color);
            }
            ColliderShape::Polygon { points } => {
                draw_closed_loop(gizmos, points, center, config.collider_color);
            }
            ColliderShape::Circle { radius } => {
                gizmos.circle_2d(
                    Isometry2d::from_translation(center),
                    radius.abs(),
                    config.collider_color,
                );
            }
        }
        drawn = true;
    }

    if !drawn {
        let r = config.marker_radius;
        gizmos.line_2d(position - Vec2::X * r, position + Vec2::X * r, config.collider_color);
        gizmos.line_2d(position - Vec2::Y * r, position + Vec2::Y * r, config.collider_color);
    }
}

fn draw_closed_loop(gizmos: &mut Gizmos, points: &[Vec2], center: Vec2, color: Color) {
    if points.len() < 2 {
        return;
    }
    for (i, point) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        gizmos.line_2d(center + *point, center + next, color);
    }
}

/// Flush the editor's draw commands for this frame.
pub fn flush_draw_queue(mut gizmos: Gizmos, queue: Res<DrawQueue>) {
    for command in &queue.commands {
        match *command {
            DrawCommand::Line { start, end, color } => {
                gizmos.line_2d(start, end, color);
            }
            DrawCommand::Rect { rect, color } => {
                // Gizmos have no fill; a nested outline reads as a solid knob
                let isometry = Isometry2d::from_translation(rect.center());
                gizmos.rect_2d(isometry, rect.size(), color);
                gizmos.rect_2d(isometry, rect.size() * 0.5, color);
            }
            DrawCommand::HollowRect { rect, color } => {
                gizmos.rect_2d(
                    Isometry2d::from_translation(rect.center()),
                    rect.size(),
                    color,
                );
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                gizmos.circle_2d(Isometry2d::from_translation(center), radius, color);
            }
            DrawCommand::Arrow {
                start,
                end,
                head_size,
                color,
            } => {
                gizmos.line_2d(start, end, color);
                let direction = (end - start).normalize_or_zero();
                if direction != Vec2::ZERO {
                    draw_arrow_head(&mut gizmos, end, direction, head_size, color);
                }
            }
        }
    }
}

/// Draw arrow head.
fn draw_arrow_head(gizmos: &mut Gizmos, tip: Vec2, direction: Vec2, size: f32, color: Color) {
    let perp = Vec2::new(-direction.y, direction.x);
    let base = tip - direction * size;
    gizmos.line_2d(tip, base + perp * size * 0.5, color);
    gizmos.line_2d(tip, base - perp * size * 0.5, color);
}
