use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_TAP_MAX_DURATION_MS: u64 = 300;
const DEFAULT_MOVE_THRESHOLD_PX: f64 = 5.0;
const DEFAULT_SWIPE_MIN_DISPLACEMENT_PX: f64 = 30.0;
const DEFAULT_SWIPE_MAX_DISTANCE_PX: f64 = 160.0;
const DEFAULT_SWIPE_DURATION_LIMIT_MS: u64 = 200;

/// Thresholds read by the classification engine. Never mutated by a session.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GestureConfig {
    /// Long-press threshold: a press held this long without moving is a tip.
    pub tap_max_duration_ms: u64,
    /// Jitter box, applied to the absolute movement on each axis.
    pub move_threshold_px: f64,
    /// Minimum dominant-axis step to call a movement a swipe.
    pub swipe_min_displacement_px: f64,
    /// Absolute session distance ceiling for a swipe.
    pub swipe_max_distance_px: f64,
    /// Elapsed time ceiling, measured from the swipe start sample.
    pub swipe_duration_limit_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_duration_ms: DEFAULT_TAP_MAX_DURATION_MS,
            move_threshold_px: DEFAULT_MOVE_THRESHOLD_PX,
            swipe_min_displacement_px: DEFAULT_SWIPE_MIN_DISPLACEMENT_PX,
            swipe_max_distance_px: DEFAULT_SWIPE_MAX_DISTANCE_PX,
            swipe_duration_limit_ms: DEFAULT_SWIPE_DURATION_LIMIT_MS,
        }
    }
}

impl GestureConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), ?config, "loaded gesture config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tap_max_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tap_max_duration_ms",
                reason: "must be greater than zero",
            });
        }
        for (field, value) in [
            ("move_threshold_px", self.move_threshold_px),
            ("swipe_min_displacement_px", self.swipe_min_displacement_px),
            ("swipe_max_distance_px", self.swipe_max_distance_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be a finite, non-negative pixel distance",
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = GestureConfig::from_toml_str("move_threshold_px = 8.0").unwrap();
        assert_eq!(config.move_threshold_px, 8.0);
        assert_eq!(
            config.tap_max_duration_ms,
            GestureConfig::default().tap_max_duration_ms
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = GestureConfig::from_toml_str("swipe_speed = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_long_press_is_rejected() {
        let err = GestureConfig::from_toml_str("tap_max_duration_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "tap_max_duration_ms",
                ..
            }
        ));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = GestureConfig::from_toml_str("swipe_max_distance_px = -1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "swipe_max_distance_px",
                ..
            }
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GestureConfig::from_path(Path::new("/nonexistent/gestures.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/gestures.toml"));
    }
}
