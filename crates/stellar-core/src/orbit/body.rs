use std::f32::consts::TAU;

use glam::Vec3;

use crate::data::record::{BodyRecord, BodyRole};
use super::geometry::{self, OrbitPathCache};

/// Orbital parameters of a body in the loaded system.
///
/// The phase angle is the only field that changes over time; positions are
/// recomputed from scratch every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitalBody {
    pub role: BodyRole,
    /// Semi-major axis.
    pub distance_from_center: f32,
    pub inclination_degrees: f32,
    /// Clamped into [0, MAX_ECCENTRICITY] on construction.
    pub eccentricity: f32,
    /// Current phase angle in radians, kept in [0, 2π).
    pub phase_angle: f32,
    /// Radians per second.
    pub orbit_speed: f32,
}

impl OrbitalBody {
    pub fn new(distance_from_center: f32, inclination_degrees: f32, eccentricity: f32) -> Self {
        Self {
            role: BodyRole::Other,
            distance_from_center,
            inclination_degrees,
            eccentricity: geometry::clamp_eccentricity(eccentricity),
            phase_angle: 0.0,
            orbit_speed: 0.0,
        }
    }

    pub fn with_role(mut self, role: BodyRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_phase(mut self, phase_angle: f32) -> Self {
        self.phase_angle = phase_angle.rem_euclid(TAU);
        self
    }

    pub fn with_speed(mut self, orbit_speed: f32) -> Self {
        self.orbit_speed = orbit_speed;
        self
    }

    /// Advance the phase angle by `orbit_speed * dt`.
    pub fn advance(&mut self, dt: f32) {
        self.phase_angle = (self.phase_angle + self.orbit_speed * dt).rem_euclid(TAU);
    }

    /// Position relative to the system center at the current phase.
    pub fn position(&self) -> Vec3 {
        geometry::position_at(
            self.distance_from_center,
            self.inclination_degrees,
            self.eccentricity,
            self.phase_angle,
        )
    }

    /// Guide ring for this body's orbit, served from `cache`.
    pub fn guide<'a>(&self, cache: &'a mut OrbitPathCache, segments: usize) -> &'a [Vec3] {
        cache.get(self.distance_from_center, self.inclination_degrees, segments)
    }
}

impl From<&BodyRecord> for OrbitalBody {
    fn from(record: &BodyRecord) -> Self {
        OrbitalBody::new(
            record.distance_from_center,
            record.inclination_degrees,
            record.eccentricity,
        )
        .with_role(record.role)
        .with_phase(record.phase_angle)
        .with_speed(record.orbit_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_wraps_phase() {
        let mut body = OrbitalBody::new(5.0, 0.0, 0.0).with_speed(1.0).with_phase(TAU - 0.5);
        body.advance(1.0);
        assert!((body.phase_angle - 0.5).abs() < 1e-4, "phase = {}", body.phase_angle);
    }

    #[test]
    fn negative_speed_stays_in_range() {
        let mut body = OrbitalBody::new(5.0, 0.0, 0.0).with_speed(-2.0);
        body.advance(1.0);
        assert!(body.phase_angle >= 0.0 && body.phase_angle < TAU);
    }

    #[test]
    fn position_follows_phase() {
        let body = OrbitalBody::new(10.0, 0.0, 0.0).with_phase(std::f32::consts::FRAC_PI_2);
        assert!((body.position() - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn from_record_clamps_eccentricity() {
        let record = BodyRecord {
            name: None,
            role: BodyRole::Lead,
            distance_from_center: 6.0,
            inclination_degrees: 5.0,
            eccentricity: 1.2,
            phase_angle: 0.0,
            orbit_speed: 0.3,
        };
        let body = OrbitalBody::from(&record);
        assert_eq!(body.role, BodyRole::Lead);
        assert_eq!(body.eccentricity, geometry::MAX_ECCENTRICITY);
        assert!(body.position().is_finite());
    }

    #[test]
    fn guide_uses_cache() {
        let body = OrbitalBody::new(3.0, 10.0, 0.5);
        let mut cache = OrbitPathCache::new();
        assert_eq!(body.guide(&mut cache, 16).len(), 17);
        body.guide(&mut cache, 16);
        assert_eq!(cache.rebuilds(), 1);
    }
}
