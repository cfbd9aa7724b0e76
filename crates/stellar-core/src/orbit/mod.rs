pub mod body;
pub mod geometry;

pub use body::OrbitalBody;
pub use geometry::{orbit_path, position_at, OrbitPathCache, DEFAULT_SEGMENTS, MAX_ECCENTRICITY};
