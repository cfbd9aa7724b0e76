pub mod api;
pub mod camera;
pub mod core;
pub mod data;
pub mod extensions;
pub mod input;
pub mod orbit;
pub mod renderer;
pub mod view;

// Re-export key types at crate root for convenience
pub use api::config::ComposerConfig;
pub use api::error::{ComposerError, Result};
pub use api::types::{MotionId, SystemId};
pub use camera::{CameraEvent, CameraMotion, CameraRig, CameraTransform};
pub use crate::core::composer::{Composer, ComposerEvent, LoadedSystem};
pub use data::record::{BodyRecord, BodyRole, StellarSystemRecord};
pub use input::queue::{ComposerInput, InputQueue};
pub use orbit::{orbit_path, position_at, OrbitPathCache, OrbitalBody};
pub use renderer::placement::{BodyInstance, PlacementBuffer};
pub use view::{
    DistanceWatcher, ResetListener, ViewMode, ViewModeController, ViewState, ViewTransition,
};

// Extensions — decoupled helpers
pub use extensions::{cubic_in_out, ease_vec3, lerp, lerp_vec3, smoothing_factor, Easing};
