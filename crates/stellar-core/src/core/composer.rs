// core/composer.rs
//
// The composer context: one explicitly owned object holding the view mode,
// the camera rig, the return-to-overview watcher and the loaded system.
// The host calls tick(dt) once per rendered frame.
//
// Frame order:
//   1. apply queued inputs
//   2. advance the camera motion
//   3. run the distance watcher (locked while moving, outside Viewing, while no
//      system is on screen, or by request)
//   4. advance orbital phases and rebuild body placements

use glam::Vec3;
use serde::Serialize;

use crate::api::config::ComposerConfig;
use crate::api::error::Result;
use crate::api::types::{MotionId, SystemId};
use crate::camera::rig::{CameraEvent, CameraRig, CameraTransform};
use crate::data::record::StellarSystemRecord;
use crate::input::queue::{ComposerInput, InputQueue};
use crate::orbit::body::OrbitalBody;
use crate::orbit::geometry::OrbitPathCache;
use crate::renderer::placement::{BodyInstance, PlacementBuffer};
use crate::view::mode::{ResetListener, ViewMode, ViewModeController, ViewTransition};
use crate::view::watcher::DistanceWatcher;

/// Notifications for the host, drained once per frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComposerEvent {
    /// Navigation mode changed; per-system subsystems should reset.
    #[serde(rename_all = "camelCase")]
    ViewChanged { transition: ViewTransition },
    #[serde(rename_all = "camelCase")]
    CameraMoveStart { id: MotionId, target: CameraTransform },
    #[serde(rename_all = "camelCase")]
    CameraMoveEnd { id: MotionId },
    /// The watcher sent the view back to the overview.
    #[serde(rename_all = "camelCase")]
    ReturnedToOverview { distance: f32 },
    #[serde(rename_all = "camelCase")]
    SystemLoaded { id: SystemId },
    /// A record arrived for a system that is no longer selected.
    #[serde(rename_all = "camelCase")]
    StaleSystemIgnored { id: SystemId },
    #[serde(rename_all = "camelCase")]
    SystemLoadFailed { id: SystemId, reason: String },
}

/// The system currently on screen.
#[derive(Debug, Clone)]
pub struct LoadedSystem {
    record: StellarSystemRecord,
    bodies: Vec<OrbitalBody>,
    guides: Vec<OrbitPathCache>,
}

impl LoadedSystem {
    fn new(record: StellarSystemRecord) -> Self {
        let bodies: Vec<OrbitalBody> = record.bodies.iter().map(OrbitalBody::from).collect();
        let guides = vec![OrbitPathCache::new(); bodies.len()];
        Self { record, bodies, guides }
    }

    pub fn id(&self) -> &SystemId {
        &self.record.id
    }

    pub fn position(&self) -> Vec3 {
        self.record.position
    }

    pub fn record(&self) -> &StellarSystemRecord {
        &self.record
    }

    pub fn bodies(&self) -> &[OrbitalBody] {
        &self.bodies
    }
}

/// Explicitly owned navigation context for one composer view.
pub struct Composer {
    config: ComposerConfig,
    view: ViewModeController,
    rig: CameraRig,
    watcher: DistanceWatcher,
    input: InputQueue,
    system: Option<LoadedSystem>,
    /// Selected system whose record has not arrived yet.
    awaiting: Option<SystemId>,
    /// Watcher lock requested by the host.
    user_lock: bool,
    placements: PlacementBuffer,
    events: Vec<ComposerEvent>,
    dropped_events: usize,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rig: CameraRig::from_config(&config),
            watcher: DistanceWatcher::new(config.return_threshold),
            view: ViewModeController::new(),
            input: InputQueue::new(),
            system: None,
            awaiting: None,
            user_lock: false,
            placements: PlacementBuffer::new(),
            events: Vec::with_capacity(config.max_events),
            dropped_events: 0,
            config,
        })
    }

    // -- Accessors --

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewModeController {
        &self.view
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn watcher(&self) -> &DistanceWatcher {
        &self.watcher
    }

    pub fn system(&self) -> Option<&LoadedSystem> {
        self.system.as_ref()
    }

    /// Id of the selected system still waiting for its record.
    pub fn awaiting(&self) -> Option<&SystemId> {
        self.awaiting.as_ref()
    }

    pub fn placements(&self) -> &PlacementBuffer {
        &self.placements
    }

    pub fn is_camera_moving(&self) -> bool {
        self.rig.is_moving()
    }

    /// Camera write access for user orbit/zoom controls.
    /// Refused while a transition owns the camera.
    pub fn camera_mut(&mut self) -> Result<&mut CameraTransform> {
        self.rig.transform_mut()
    }

    /// Register a reset listener (e.g. the audio engine) on the view controller.
    pub fn subscribe(&mut self, listener: impl ResetListener + 'static) {
        self.view.subscribe(listener);
    }

    /// Guide ring for body `index` of the loaded system.
    pub fn guide(&mut self, index: usize) -> Option<&[Vec3]> {
        let segments = self.config.orbit_segments;
        let system = self.system.as_mut()?;
        let body = system.bodies.get(index)?;
        let cache = system.guides.get_mut(index)?;
        Some(body.guide(cache, segments))
    }

    // -- Navigation --

    /// Enter `Viewing` for `id`. The camera moves once the system's record is loaded.
    pub fn select_system(&mut self, id: impl Into<SystemId>) {
        let id = id.into();
        self.view.select_system(id.clone());

        // Re-entering the loaded system re-initializes it from its record.
        match self.system.take() {
            Some(loaded) if loaded.record.id == id => {
                self.awaiting = None;
                self.install(loaded.record);
            }
            _ => {
                log::debug!("composer: waiting for system {id}");
                self.rig.stop();
                self.awaiting = Some(id);
            }
        }
        self.collect_events();
    }

    /// Return to the galaxy overview.
    pub fn go_idle(&mut self) {
        self.view.go_idle();
        self.enter_overview();
        self.collect_events();
    }

    /// Start composing a new system. The camera stays where it is.
    pub fn go_create(&mut self) {
        self.view.go_create();
        self.system = None;
        self.awaiting = None;
        self.rig.stop();
        self.placements.clear();
        self.collect_events();
    }

    /// Lock or unlock the return-to-overview watcher.
    pub fn set_camera_lock(&mut self, locked: bool) {
        self.user_lock = locked;
    }

    // -- Data loading --

    /// Feed a loaded record. Ignored unless it belongs to the selected system.
    pub fn load_system(&mut self, record: StellarSystemRecord) {
        let wanted = self.view.mode() == ViewMode::Viewing
            && self.view.selected() == Some(&record.id)
            && self.system.is_none();
        if !wanted {
            log::debug!("composer: ignoring record for {}", record.id);
            self.push_event(ComposerEvent::StaleSystemIgnored { id: record.id });
            return;
        }
        self.awaiting = None;
        self.push_event(ComposerEvent::SystemLoaded { id: record.id.clone() });
        self.install(record);
        self.collect_events();
    }

    /// Parse, validate and feed a record.
    pub fn load_system_json(&mut self, json: &str) -> Result<()> {
        let record = StellarSystemRecord::from_json(json)?;
        self.load_system(record);
        Ok(())
    }

    /// The loader could not resolve `id`. Stops waiting for it.
    pub fn system_load_failed(&mut self, id: SystemId, reason: String) {
        log::warn!("composer: system {id} failed to load: {reason}");
        if self.awaiting.as_ref() == Some(&id) {
            self.awaiting = None;
        }
        self.push_event(ComposerEvent::SystemLoadFailed { id, reason });
    }

    // -- Frame loop --

    /// Queue an input for the next tick.
    pub fn push_input(&mut self, input: ComposerInput) {
        self.input.push(input);
    }

    /// Apply an input immediately.
    pub fn apply(&mut self, input: ComposerInput) {
        match input {
            ComposerInput::SelectSystem(id) => self.select_system(id),
            ComposerInput::GoIdle => self.go_idle(),
            ComposerInput::GoCreate => self.go_create(),
            ComposerInput::SystemLoaded(record) => self.load_system(record),
            ComposerInput::SystemLoadFailed { id, reason } => self.system_load_failed(id, reason),
            ComposerInput::SetCameraLock(locked) => self.set_camera_lock(locked),
        }
    }

    /// Run one frame.
    pub fn tick(&mut self, dt: f32) {
        for input in self.input.drain() {
            self.apply(input);
        }

        self.rig.tick(dt);
        self.collect_events();

        let locked = self.user_lock
            || self.rig.is_moving()
            || self.view.mode() != ViewMode::Viewing
            || self.awaiting.is_some()
            || self.system.is_none();
        self.watcher.set_locked(locked);
        let distance = self.rig.distance();
        if self.watcher.check(distance, &mut self.view) {
            self.collect_events();
            self.push_event(ComposerEvent::ReturnedToOverview { distance });
            self.enter_overview();
            self.collect_events();
        }

        self.placements.clear();
        if let Some(system) = self.system.as_mut() {
            let center = system.record.position;
            for body in system.bodies.iter_mut() {
                body.advance(dt);
                self.placements.push(BodyInstance::place(body, center));
            }
        }
    }

    /// Drain events produced since the last drain.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ComposerEvent> + '_ {
        if self.dropped_events > 0 {
            log::warn!("composer: dropped {} events over capacity", self.dropped_events);
            self.dropped_events = 0;
        }
        self.events.drain(..)
    }

    // -- Internals --

    fn install(&mut self, record: StellarSystemRecord) {
        let target = record.position;
        self.system = Some(LoadedSystem::new(record));
        self.rig.focus_on(target, self.config.camera_offset);
    }

    fn enter_overview(&mut self) {
        self.system = None;
        self.awaiting = None;
        self.placements.clear();
        self.rig.move_to(CameraTransform::new(
            self.config.galaxy_eye,
            self.config.galaxy_look_at,
        ));
    }

    fn collect_events(&mut self) {
        let transitions: Vec<_> = self.view.drain_transitions().collect();
        for transition in transitions {
            self.push_event(ComposerEvent::ViewChanged { transition });
        }
        let camera: Vec<_> = self.rig.drain_events().collect();
        for event in camera {
            self.push_event(match event {
                CameraEvent::MoveStart { id, target } => ComposerEvent::CameraMoveStart { id, target },
                CameraEvent::MoveEnd { id } => ComposerEvent::CameraMoveEnd { id },
            });
        }
    }

    fn push_event(&mut self, event: ComposerEvent) {
        if self.events.len() >= self.config.max_events {
            self.dropped_events += 1;
            return;
        }
        self.events.push(event);
    }
}

impl Default for Composer {
    fn default() -> Self {
        // The default config always validates.
        Self {
            rig: CameraRig::default(),
            watcher: DistanceWatcher::default(),
            view: ViewModeController::new(),
            input: InputQueue::new(),
            system: None,
            awaiting: None,
            user_lock: false,
            placements: PlacementBuffer::new(),
            events: Vec::new(),
            dropped_events: 0,
            config: ComposerConfig::default(),
        }
    }
}
