use super::mode::ViewModeController;

/// Default camera-to-target distance that triggers a return to the overview.
pub const DEFAULT_RETURN_THRESHOLD: f32 = 20.0;

/// Sends the view back to the overview when the camera strays too far.
///
/// Edge-triggered: one trip per excursion beyond the threshold. Coming back
/// to `<= threshold` re-arms it. While locked, distance is not evaluated at
/// all and the armed state is left untouched.
#[derive(Debug, Clone)]
pub struct DistanceWatcher {
    threshold: f32,
    locked: bool,
    tripped: bool,
}

impl Default for DistanceWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_RETURN_THRESHOLD)
    }
}

impl DistanceWatcher {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            locked: false,
            tripped: false,
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f32) {
        self.threshold = threshold;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Suppress checks, e.g. during a deliberate camera transition.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Whether the current excursion has already fired.
    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    /// Per-frame check. Returns `true` when this call sent the view idle;
    /// the caller runs its own follow-up on `true`.
    pub fn check(&mut self, distance: f32, view: &mut ViewModeController) -> bool {
        if self.locked {
            return false;
        }
        if distance > self.threshold {
            if self.tripped {
                return false;
            }
            self.tripped = true;
            log::info!(
                "watcher: camera distance {distance:.2} beyond {:.2}, returning to overview",
                self.threshold
            );
            view.go_idle();
            true
        } else {
            self.tripped = false;
            false
        }
    }

    /// Like [`check`](Self::check), invoking `on_trip` when it fires.
    pub fn check_with(
        &mut self,
        distance: f32,
        view: &mut ViewModeController,
        on_trip: impl FnOnce(),
    ) -> bool {
        let fired = self.check(distance, view);
        if fired {
            on_trip();
        }
        fired
    }
}
