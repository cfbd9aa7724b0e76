use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::{ComposerError, Result};
use crate::extensions::easing::Easing;
use crate::orbit::geometry::DEFAULT_SEGMENTS;
use crate::view::watcher::DEFAULT_RETURN_THRESHOLD;

/// Configuration for the composer, provided by the host page.
///
/// Every field has a default, so a JSON object only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComposerConfig {
    /// Length of a camera transition in seconds (default: 2.0).
    pub camera_duration: f32,
    /// Eye offset from the look-at point when viewing a system.
    pub camera_offset: Vec3,
    /// Fraction of the remaining gap kept per 60 Hz frame (default: 0.9).
    pub camera_smoothing: f32,
    /// Curve that shapes the smoothing factor over a transition.
    pub camera_easing: Easing,
    /// Camera-to-target distance that sends the view back to the overview (default: 20.0).
    pub return_threshold: f32,
    /// Segments per orbit guide ring (default: 128).
    pub orbit_segments: usize,
    /// Overview camera eye position.
    pub galaxy_eye: Vec3,
    /// Overview camera look-at point.
    pub galaxy_look_at: Vec3,
    /// Maximum number of events kept per frame (default: 32).
    pub max_events: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            camera_duration: 2.0,
            camera_offset: Vec3::new(0.0, 5.0, 10.0),
            camera_smoothing: 0.9,
            camera_easing: Easing::CubicInOut,
            return_threshold: DEFAULT_RETURN_THRESHOLD,
            orbit_segments: DEFAULT_SEGMENTS,
            galaxy_eye: Vec3::new(0.0, 60.0, 120.0),
            galaxy_look_at: Vec3::ZERO,
            max_events: 32,
        }
    }
}

impl ComposerConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.camera_duration > 0.0) {
            return Err(ComposerError::InvalidConfig {
                field: "cameraDuration",
                reason: "must be positive",
            });
        }
        if !(0.0..1.0).contains(&self.camera_smoothing) {
            return Err(ComposerError::InvalidConfig {
                field: "cameraSmoothing",
                reason: "must be in [0, 1)",
            });
        }
        if !(self.return_threshold > 0.0) {
            return Err(ComposerError::InvalidConfig {
                field: "returnThreshold",
                reason: "must be positive",
            });
        }
        // A framed system must sit inside the return threshold.
        if !(self.camera_offset.length() < self.return_threshold) {
            return Err(ComposerError::InvalidConfig {
                field: "cameraOffset",
                reason: "must be shorter than returnThreshold",
            });
        }
        if self.orbit_segments == 0 {
            return Err(ComposerError::InvalidConfig {
                field: "orbitSegments",
                reason: "must be at least 1",
            });
        }
        if self.max_events == 0 {
            return Err(ComposerError::InvalidConfig {
                field: "maxEvents",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ComposerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera_duration, 2.0);
        assert_eq!(config.return_threshold, 20.0);
        assert_eq!(config.orbit_segments, 128);
    }

    #[test]
    fn partial_json_overrides_named_fields() {
        let config = ComposerConfig::from_json(
            r#"{ "cameraDuration": 3.5, "cameraOffset": [1.0, 2.0, 3.0], "cameraEasing": "linear" }"#,
        )
        .unwrap();
        assert_eq!(config.camera_duration, 3.5);
        assert_eq!(config.camera_offset, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera_easing, Easing::Linear);
        assert_eq!(config.return_threshold, 20.0);
    }

    #[test]
    fn rejects_non_positive_duration() {
        let err = ComposerConfig::from_json(r#"{ "cameraDuration": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ComposerError::InvalidConfig { field: "cameraDuration", .. }
        ));
    }

    #[test]
    fn rejects_zero_segments() {
        let err = ComposerConfig::from_json(r#"{ "orbitSegments": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ComposerError::InvalidConfig { field: "orbitSegments", .. }
        ));
    }

    #[test]
    fn rejects_offset_beyond_return_threshold() {
        let err = ComposerConfig::from_json(r#"{ "cameraOffset": [0.0, 30.0, 0.0] }"#).unwrap_err();
        assert!(matches!(
            err,
            ComposerError::InvalidConfig { field: "cameraOffset", .. }
        ));

        let config = ComposerConfig::from_json(
            r#"{ "cameraOffset": [0.0, 30.0, 0.0], "returnThreshold": 40.0 }"#,
        )
        .unwrap();
        assert_eq!(config.return_threshold, 40.0);
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ComposerConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ComposerError::Json(_)));
    }
}
