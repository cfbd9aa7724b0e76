use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::orbit::body::OrbitalBody;

/// Per-body placement handed to the renderer each frame.
/// Must match the TypeScript reader: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space position (system position + orbit offset).
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// `BodyRole::code()` as a float.
    pub role: f32,
    /// Current phase angle in radians.
    pub phase: f32,
    /// Semi-major axis, for sizing the guide ring.
    pub orbit_radius: f32,
    pub inclination_degrees: f32,
    pub eccentricity: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn place(body: &OrbitalBody, center: Vec3) -> Self {
        let p = center + body.position();
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
            role: body.role.code() as f32,
            phase: body.phase_angle,
            orbit_radius: body.distance_from_center,
            inclination_degrees: body.inclination_degrees,
            eccentricity: body.eccentricity,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Fresh list of body placements, rebuilt every frame.
pub struct PlacementBuffer {
    pub instances: Vec<BodyInstance>,
}

impl PlacementBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: BodyInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.instances.as_slice())
    }

    /// Raw pointer to instance data for typed-array reads from JavaScript.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for PlacementBuffer {
    fn default() -> Self {
        Self::new()
    }
}
