use glam::Vec3;
use stellar_core::{
    CameraTransform, Composer, ComposerConfig, ComposerError, ComposerEvent, ComposerInput,
    StellarSystemRecord, SystemId, ViewMode,
};

/// Floats in the flattened camera pose: eye xyz, look-at xyz.
pub const POSE_FLOATS: usize = 6;

/// Owns the composer for one page and flattens its state for JavaScript.
///
/// The page keeps a single `thread_local!` runner and calls the free functions
/// exported from `lib.rs`, because wasm-bindgen cannot export the composer's
/// generic listener API directly.
pub struct ComposerRunner {
    composer: Composer,
    pose: [f32; POSE_FLOATS],
}

impl ComposerRunner {
    pub fn new(composer: Composer) -> Self {
        let mut runner = Self {
            composer,
            pose: [0.0; POSE_FLOATS],
        };
        runner.refresh_pose();
        runner
    }

    /// Build from a JSON config. An empty string means defaults.
    pub fn from_config_json(json: &str) -> Result<Self, ComposerError> {
        let config = if json.trim().is_empty() {
            ComposerConfig::default()
        } else {
            ComposerConfig::from_json(json)?
        };
        Ok(Self::new(Composer::new(config)?))
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Queue an input for the next tick.
    pub fn push_input(&mut self, input: ComposerInput) {
        self.composer.push_input(input);
    }

    /// Run one frame and refresh the flattened camera pose.
    pub fn tick(&mut self, dt: f32) {
        self.composer.tick(dt);
        self.refresh_pose();
    }

    /// Parse a system record and queue it. Returns false (and logs) on bad JSON.
    pub fn load_system_json(&mut self, json: &str) -> bool {
        match StellarSystemRecord::from_json(json) {
            Ok(record) => {
                self.push_input(ComposerInput::SystemLoaded(record));
                true
            }
            Err(err) => {
                log::warn!("stellar-web: rejected system record: {err}");
                false
            }
        }
    }

    pub fn system_load_failed(&mut self, id: &str, reason: &str) {
        self.push_input(ComposerInput::SystemLoadFailed {
            id: SystemId::new(id),
            reason: reason.to_owned(),
        });
    }

    /// Apply a pose from the user's orbit controls. Refused while a transition runs.
    pub fn set_camera(&mut self, eye: Vec3, look_at: Vec3) -> bool {
        match self.composer.camera_mut() {
            Ok(transform) => {
                *transform = CameraTransform::new(eye, look_at);
                self.refresh_pose();
                true
            }
            Err(err) => {
                log::debug!("stellar-web: camera write refused: {err}");
                false
            }
        }
    }

    pub fn camera_pose(&self) -> &[f32; POSE_FLOATS] {
        &self.pose
    }

    pub fn camera_distance(&self) -> f32 {
        self.composer.rig().distance()
    }

    pub fn is_camera_moving(&self) -> bool {
        self.composer.is_camera_moving()
    }

    /// 0 = idle, 1 = viewing, 2 = creating.
    pub fn mode_code(&self) -> u32 {
        match self.composer.mode() {
            ViewMode::Idle => 0,
            ViewMode::Viewing => 1,
            ViewMode::Creating => 2,
        }
    }

    /// Selected system id, or an empty string.
    pub fn selected_system(&self) -> String {
        self.composer.view().state().selected_str().to_owned()
    }

    /// Drain this frame's events as a JSON array.
    pub fn drain_events_json(&mut self) -> String {
        let events: Vec<ComposerEvent> = self.composer.drain_events().collect();
        serde_json::to_string(&events).unwrap_or_else(|err| {
            log::error!("stellar-web: failed to encode events: {err}");
            "[]".to_owned()
        })
    }

    // ---- Pointer accessors for typed-array reads ----

    pub fn placements_ptr(&self) -> *const f32 {
        self.composer.placements().instances_ptr()
    }

    pub fn placement_count(&self) -> u32 {
        self.composer.placements().instance_count()
    }

    /// Guide ring for body `index`, flattened to xyz triples. Empty if out of range.
    pub fn orbit_guide(&mut self, index: usize) -> Vec<f32> {
        self.composer
            .guide(index)
            .map(|points| points.iter().flat_map(|p| p.to_array()).collect())
            .unwrap_or_default()
    }

    fn refresh_pose(&mut self) {
        let t = self.composer.rig().transform();
        self.pose = [t.eye.x, t.eye.y, t.eye.z, t.look_at.x, t.look_at.y, t.look_at.z];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = r#"{
        "id": "alpha",
        "position": [12.0, 0.0, 0.0],
        "bodies": [
            { "role": "star", "distanceFromCenter": 0.0 },
            { "role": "lead", "distanceFromCenter": 3.0, "orbitSpeed": 0.5 }
        ]
    }"#;

    #[test]
    fn empty_config_uses_defaults() {
        let runner = ComposerRunner::from_config_json("").unwrap();
        assert_eq!(runner.composer().config(), &ComposerConfig::default());
        assert_eq!(runner.mode_code(), 0);
        assert_eq!(runner.selected_system(), "");
    }

    #[test]
    fn bad_config_is_an_error() {
        assert!(ComposerRunner::from_config_json(r#"{ "cameraDuration": -2 }"#).is_err());
    }

    #[test]
    fn select_and_load_through_queue() {
        let mut runner = ComposerRunner::from_config_json("{}").unwrap();
        runner.push_input(ComposerInput::SelectSystem(SystemId::new("alpha")));
        assert!(runner.load_system_json(SYSTEM));
        runner.tick(1.0 / 60.0);

        assert_eq!(runner.mode_code(), 1);
        assert_eq!(runner.selected_system(), "alpha");
        assert!(runner.is_camera_moving());
        assert_eq!(runner.placement_count(), 2);
        assert_eq!(runner.orbit_guide(1).len(), 129 * 3);
        assert!(runner.orbit_guide(9).is_empty());

        let events = runner.drain_events_json();
        assert!(events.contains(r#""kind":"viewChanged""#), "{events}");
        assert!(events.contains(r#""kind":"cameraMoveStart""#), "{events}");
        assert_eq!(runner.drain_events_json(), "[]");
    }

    #[test]
    fn record_fetched_over_several_frames_is_shown() {
        let mut runner = ComposerRunner::from_config_json("").unwrap();
        runner.push_input(ComposerInput::SelectSystem(SystemId::new("alpha")));
        for _ in 0..5 {
            runner.tick(1.0 / 60.0);
        }
        assert_eq!(runner.mode_code(), 1);

        assert!(runner.load_system_json(SYSTEM));
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.mode_code(), 1);
        assert_eq!(runner.selected_system(), "alpha");
        assert_eq!(runner.placement_count(), 2);
        let events = runner.drain_events_json();
        assert!(!events.contains(r#""kind":"staleSystemIgnored""#), "{events}");
        assert!(!events.contains(r#""kind":"returnedToOverview""#), "{events}");
    }

    #[test]
    fn malformed_record_is_rejected() {
        let mut runner = ComposerRunner::from_config_json("").unwrap();
        assert!(!runner.load_system_json("{ \"id\": 3 }"));
    }

    #[test]
    fn camera_writes_wait_for_transition() {
        let mut runner = ComposerRunner::from_config_json("").unwrap();
        assert!(runner.set_camera(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO));
        assert_eq!(runner.camera_pose(), &[0.0, 0.0, 9.0, 0.0, 0.0, 0.0]);
        assert!((runner.camera_distance() - 9.0).abs() < 1e-5);

        runner.push_input(ComposerInput::GoIdle);
        runner.tick(1.0 / 60.0);
        assert!(!runner.set_camera(Vec3::ONE, Vec3::ZERO));
    }
}
