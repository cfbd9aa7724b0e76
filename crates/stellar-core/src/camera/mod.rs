pub mod rig;

pub use rig::{CameraEvent, CameraMotion, CameraRig, CameraTransform};
