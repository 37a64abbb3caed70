//! Grid and angle snapping for drags.
//!
//! Both snaps are disabled by an interval of zero.

use bevy::math::Vec2;

use crate::config::SnapConfig;

/// Snap a world position to the grid, only on the axes that move.
pub fn snap_position(pos: Vec2, moves_x: bool, moves_y: bool, config: &SnapConfig) -> Vec2 {
    let interval = config.grid_interval;
    if interval <= 0.0 {
        return pos;
    }
    let snap = |v: f32| (v / interval).round() * interval;
    Vec2::new(
        if moves_x { snap(pos.x) } else { pos.x },
        if moves_y { snap(pos.y) } else { pos.y },
    )
}

/// Snap an angle (radians in, radians out).
pub fn snap_angle(angle_rad: f32, config: &SnapConfig) -> f32 {
    let interval = config.angle_interval;
    if interval <= 0.0 {
        return angle_rad;
    }
    let deg = angle_rad.to_degrees();
    let snapped_deg = (deg / interval).round() * interval;
    snapped_deg.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_snap_is_identity() {
        let config = SnapConfig::default();
        let pos = Vec2::new(1.234, 5.678);
        assert_eq!(snap_position(pos, true, true, &config), pos);
        assert_eq!(snap_angle(0.123, &config), 0.123);
    }

    #[test]
    fn test_grid_snap_only_moving_axes() {
        let config = SnapConfig {
            grid_interval: 8.0,
            angle_interval: 0.0,
        };
        let snapped = snap_position(Vec2::new(13.0, 5.0), true, false, &config);
        assert_eq!(snapped, Vec2::new(16.0, 5.0));
    }

    #[test]
    fn test_angle_snap() {
        let config = SnapConfig {
            grid_interval: 0.0,
            angle_interval: 15.0,
        };
        let snapped = snap_angle(20f32.to_radians(), &config);
        assert!((snapped - 15f32.to_radians()).abs() < 1e-5);
    }
}
