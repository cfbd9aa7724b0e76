pub mod mode;
pub mod watcher;

pub use mode::{ResetListener, ViewMode, ViewModeController, ViewState, ViewTransition};
pub use watcher::{DistanceWatcher, DEFAULT_RETURN_THRESHOLD};
