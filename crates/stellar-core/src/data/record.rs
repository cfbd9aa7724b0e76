use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::error::{ComposerError, Result};
use crate::api::types::SystemId;

/// Musical role a body plays in its system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyRole {
    /// The central star.
    Star,
    Bass,
    Lead,
    Pad,
    Drums,
    Arp,
    #[default]
    #[serde(other)]
    Other,
}

impl BodyRole {
    /// Numeric code written into the placement buffer.
    pub fn code(self) -> u32 {
        match self {
            BodyRole::Star => 0,
            BodyRole::Bass => 1,
            BodyRole::Lead => 2,
            BodyRole::Pad => 3,
            BodyRole::Drums => 4,
            BodyRole::Arp => 5,
            BodyRole::Other => 6,
        }
    }
}

/// One orbiting body as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyRecord {
    /// Display name (optional).
    #[serde(default)]
    pub name: Option<String>,
    /// Instrument role tag.
    #[serde(default)]
    pub role: BodyRole,
    /// Semi-major axis in world units.
    pub distance_from_center: f32,
    /// Orbit tilt in degrees.
    #[serde(default)]
    pub inclination_degrees: f32,
    /// Orbit eccentricity, expected in [0, 1).
    #[serde(default)]
    pub eccentricity: f32,
    /// Starting phase angle in radians.
    #[serde(default)]
    pub phase_angle: f32,
    /// Angular speed in radians per second.
    #[serde(default = "default_orbit_speed")]
    pub orbit_speed: f32,
}

fn default_orbit_speed() -> f32 {
    0.2
}

/// A stellar system as delivered by the loader once its id resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StellarSystemRecord {
    pub id: SystemId,
    /// Galaxy-space position of the system's star.
    pub position: Vec3,
    #[serde(default)]
    pub bodies: Vec<BodyRecord>,
}

impl StellarSystemRecord {
    /// Parse a record from a JSON string and check its numeric fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: Self = serde_json::from_str(json)?;
        record.validate()?;
        Ok(record)
    }

    /// Reject non-finite numbers. Eccentricity range is not checked here;
    /// orbit geometry clamps it.
    pub fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(self.invalid("position is not finite".to_owned()));
        }
        for (i, body) in self.bodies.iter().enumerate() {
            let fields = [
                body.distance_from_center,
                body.inclination_degrees,
                body.eccentricity,
                body.phase_angle,
                body.orbit_speed,
            ];
            if fields.iter().any(|v| !v.is_finite()) {
                return Err(self.invalid(format!("body {i} has a non-finite orbital parameter")));
            }
            if body.distance_from_center < 0.0 {
                return Err(self.invalid(format!("body {i} has a negative distance")));
            }
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> ComposerError {
        ComposerError::InvalidRecord {
            id: self.id.to_string(),
            reason,
        }
    }
}
