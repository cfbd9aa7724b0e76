pub mod placement;

pub use placement::{BodyInstance, PlacementBuffer};
