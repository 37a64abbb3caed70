//! Editor tunables.

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Snap settings. An interval of zero disables that snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Grid interval for translation, in world units.
    pub grid_interval: f32,
    /// Angle interval for rotation, in degrees.
    pub angle_interval: f32,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            grid_interval: 0.0,
            angle_interval: 0.0,
        }
    }
}

/// Editor configuration.
///
/// Pixel sizes are converted to world units through the camera zoom, with the
/// resulting handle length clamped to `[handle_world_min, handle_world_max]`
/// so handles stay usable at extreme zoom levels.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Length of translate/scale axis handles, in pixels.
    pub handle_length_px: f32,
    pub handle_world_min: f32,
    pub handle_world_max: f32,
    /// Pick distance for axis handles, in pixels.
    pub hit_tolerance_px: f32,
    /// Rotate ring radius, in pixels.
    pub rotate_radius_px: f32,
    /// Pick radius for polygon vertices and rectangle handles, in pixels.
    pub point_radius_px: f32,
    /// Minimum covered fraction for marquee selection.
    pub coverage_threshold: f32,
    /// Maximum distance between clicks that cycle candidates, in pixels.
    pub cycle_distance_px: f32,
    /// Maximum delay between clicks that cycle candidates, in seconds.
    pub cycle_timeout_secs: f64,
    /// Pointer travel that turns a press into a marquee drag, in pixels.
    pub box_drag_threshold_px: f32,
    /// Pick radius for entities without collider, sprite or light.
    pub fallback_pick_radius: f32,
    /// Mouse delta divisor for the scale gizmo.
    pub scale_damping: f32,
    /// Lower bound for scale on each axis.
    pub min_scale: f32,
    /// Lower bound for resized rectangle edges, in world units.
    pub min_rect_edge: f32,
    /// World Y grows downward (screen-like) when true.
    pub y_axis_down: bool,
    pub snap: SnapConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_length_px: 60.0,
            handle_world_min: 6.0,
            handle_world_max: 600.0,
            hit_tolerance_px: 6.0,
            rotate_radius_px: 50.0,
            point_radius_px: 6.0,
            coverage_threshold: 0.4,
            cycle_distance_px: 5.0,
            cycle_timeout_secs: 1.0,
            box_drag_threshold_px: 4.0,
            fallback_pick_radius: 16.0,
            scale_damping: 10.0,
            min_scale: 0.01,
            min_rect_edge: 1.0,
            y_axis_down: true,
            snap: SnapConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("handle_length_px", self.handle_length_px),
            ("handle_world_min", self.handle_world_min),
            ("hit_tolerance_px", self.hit_tolerance_px),
            ("rotate_radius_px", self.rotate_radius_px),
            ("point_radius_px", self.point_radius_px),
            ("scale_damping", self.scale_damping),
            ("min_scale", self.min_scale),
            ("min_rect_edge", self.min_rect_edge),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("cycle_distance_px", f64::from(self.cycle_distance_px)),
            ("cycle_timeout_secs", self.cycle_timeout_secs),
            ("box_drag_threshold_px", f64::from(self.box_drag_threshold_px)),
            ("fallback_pick_radius", f64::from(self.fallback_pick_radius)),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }
        if self.handle_world_max.is_nan() || self.handle_world_max < self.handle_world_min {
            return Err(ConfigError::Invalid {
                field: "handle_world_max",
                reason: "must not be smaller than handle_world_min".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.coverage_threshold) || self.coverage_threshold == 0.0 {
            return Err(ConfigError::Invalid {
                field: "coverage_threshold",
                reason: format!("must be in (0, 1], got {}", self.coverage_threshold),
            });
        }
        if self.snap.grid_interval < 0.0 || self.snap.angle_interval < 0.0 {
            return Err(ConfigError::Invalid {
                field: "snap",
                reason: "intervals must not be negative".to_string(),
            });
        }
        Ok(())
    }
}
