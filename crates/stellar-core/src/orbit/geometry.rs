//! Orbit geometry — pure math, no composer dependencies.
//!
//! Orbits lie in the XZ plane (Y up). Inclination tilts the ellipse by mixing
//! X into Z and lifting the body along Y.

use std::f32::consts::TAU;

use glam::Vec3;

/// Default number of segments for orbit guide rings.
pub const DEFAULT_SEGMENTS: usize = 128;

/// Highest eccentricity accepted before the semi-minor axis collapses.
pub const MAX_ECCENTRICITY: f32 = 0.99;

/// Clamp an eccentricity into `[0, MAX_ECCENTRICITY]`.
/// NaN maps to a circular orbit.
#[inline]
pub fn clamp_eccentricity(eccentricity: f32) -> f32 {
    if eccentricity.is_nan() {
        return 0.0;
    }
    eccentricity.clamp(0.0, MAX_ECCENTRICITY)
}

/// Position of a body at `angle` (radians) on an orbit around the origin.
///
/// `distance_from_center` is the semi-major axis. Eccentricity outside
/// `[0, 1)` is clamped rather than producing NaN.
pub fn position_at(
    distance_from_center: f32,
    inclination_degrees: f32,
    eccentricity: f32,
    angle: f32,
) -> Vec3 {
    let e = clamp_eccentricity(eccentricity);
    let a = distance_from_center;
    let b = a * (1.0 - e * e).sqrt();

    let base_x = a * angle.cos();
    let base_z = b * angle.sin();

    let (sin_i, cos_i) = inclination_degrees.to_radians().sin_cos();
    let x = base_x * cos_i - base_z * sin_i;
    let z = base_x * sin_i + base_z * cos_i;
    let y = distance_from_center * sin_i * angle.sin();

    Vec3::new(x, y, z)
}

/// Closed circular guide ring for an orbit: `segments + 1` points over `[0, 2π]`.
///
/// Eccentricity is ignored; the ring is a visual guide, not the body's path.
pub fn orbit_path(distance_from_center: f32, inclination_degrees: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let angle = i as f32 / segments as f32 * TAU;
            position_at(distance_from_center, inclination_degrees, 0.0, angle)
        })
        .collect()
}

/// Memoized guide ring. Recomputes only when one of its three inputs changes.
#[derive(Debug, Clone, Default)]
pub struct OrbitPathCache {
    key: Option<(f32, f32, usize)>,
    points: Vec<Vec3>,
    rebuilds: u32,
}

impl OrbitPathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ring for these inputs, rebuilding it only if they changed.
    pub fn get(&mut self, distance_from_center: f32, inclination_degrees: f32, segments: usize) -> &[Vec3] {
        let key = (distance_from_center, inclination_degrees, segments);
        if self.key != Some(key) {
            self.points = orbit_path(distance_from_center, inclination_degrees, segments);
            self.key = Some(key);
            self.rebuilds += 1;
        }
        &self.points
    }

    /// How many times the ring has been rebuilt.
    pub fn rebuilds(&self) -> u32 {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-4;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn flat_circle_at_zero_angle() {
        assert!(close(position_at(10.0, 0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn flat_circle_at_quarter_turn() {
        assert!(close(position_at(10.0, 0.0, 0.0, FRAC_PI_2), Vec3::new(0.0, 0.0, 10.0)));
    }

    #[test]
    fn circular_orbit_keeps_radius() {
        for i in 0..32 {
            let angle = i as f32 * 0.2;
            let p = position_at(7.5, 0.0, 0.0, angle);
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 7.5).abs() < EPS, "radius {r} at angle {angle}");
            assert!(p.y.abs() < EPS);
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = position_at(12.0, 23.0, 0.4, 1.3);
        let b = position_at(12.0, 23.0, 0.4, 1.3);
        assert_eq!(a, b);
    }

    #[test]
    fn eccentricity_shortens_minor_axis() {
        let p = position_at(10.0, 0.0, 0.6, FRAC_PI_2);
        // b = 10 * sqrt(1 - 0.36) = 8
        assert!((p.z - 8.0).abs() < EPS, "z = {}", p.z);
    }

    #[test]
    fn inclination_lifts_body() {
        let p = position_at(10.0, 30.0, 0.0, FRAC_PI_2);
        // y = d * sin(i) * sin(angle)
        assert!((p.y - 5.0).abs() < EPS, "y = {}", p.y);
        // x = -b * sin(i), z = b * cos(i)
        assert!((p.x + 5.0).abs() < EPS);
        assert!((p.z - 10.0 * 30f32.to_radians().cos()).abs() < EPS);
    }

    #[test]
    fn out_of_range_eccentricity_is_clamped() {
        let p = position_at(10.0, 0.0, 1.5, 1.0);
        assert!(p.is_finite());
        assert_eq!(p, position_at(10.0, 0.0, MAX_ECCENTRICITY, 1.0));
        assert_eq!(position_at(10.0, 0.0, -0.3, 1.0), position_at(10.0, 0.0, 0.0, 1.0));
        assert!(position_at(10.0, 0.0, f32::NAN, 1.0).is_finite());
    }

    #[test]
    fn orbit_path_has_segments_plus_one_points() {
        let path = orbit_path(5.0, 10.0, DEFAULT_SEGMENTS);
        assert_eq!(path.len(), DEFAULT_SEGMENTS + 1);
        let path = orbit_path(5.0, 10.0, 7);
        assert_eq!(path.len(), 8);
    }

    #[test]
    fn orbit_path_is_closed() {
        let path = orbit_path(9.0, 45.0, 64);
        assert!(close(path[0], path[path.len() - 1]));
    }

    #[test]
    fn orbit_path_ignores_eccentricity() {
        let path = orbit_path(4.0, 0.0, 16);
        for p in path {
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 4.0).abs() < EPS);
        }
    }

    #[test]
    fn cache_rebuilds_only_on_change() {
        let mut cache = OrbitPathCache::new();
        assert_eq!(cache.get(5.0, 0.0, 32).len(), 33);
        cache.get(5.0, 0.0, 32);
        assert_eq!(cache.rebuilds(), 1);
        cache.get(5.0, 15.0, 32);
        assert_eq!(cache.rebuilds(), 2);
        cache.get(5.0, 15.0, 64);
        assert_eq!(cache.rebuilds(), 3);
    }
}
