// extensions/mod.rs
//
// Decoupled helpers shared by the camera and orbit systems.

pub mod easing;

pub use easing::{cubic_in_out, ease_vec3, lerp, lerp_vec3, smoothing_factor, Easing};
