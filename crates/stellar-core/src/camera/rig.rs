// camera/rig.rs
//
// Camera transitions between the galaxy overview and a system.
//
// The rig owns the camera transform. While a motion is in flight only the
// motion writes to it; outside writers get CameraBusy until the motion ends
// or is replaced.
//
// Usage:
//   let mut rig = CameraRig::new(CameraTransform::new(eye, look_at));
//   rig.focus_on(system_position, offset);   // MoveStart queued
//   rig.tick(dt);                            // MoveEnd queued on arrival

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::api::config::ComposerConfig;
use crate::api::error::{ComposerError, Result};
use crate::api::types::MotionId;
use crate::extensions::easing::{lerp_vec3, smoothing_factor, Easing};

/// Camera eye position and look-at point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraTransform {
    pub eye: Vec3,
    pub look_at: Vec3,
}

impl CameraTransform {
    pub fn new(eye: Vec3, look_at: Vec3) -> Self {
        Self { eye, look_at }
    }

    /// Pose looking at `point` from `point + offset`.
    pub fn framing(point: Vec3, offset: Vec3) -> Self {
        Self {
            eye: point + offset,
            look_at: point,
        }
    }

    /// Eye-to-target distance.
    pub fn distance(&self) -> f32 {
        self.eye.distance(self.look_at)
    }
}

/// An in-flight transition. Exists only while the camera is moving.
#[derive(Debug, Clone)]
pub struct CameraMotion {
    pub id: MotionId,
    /// Transform when the motion started.
    pub start: CameraTransform,
    /// Where the camera ends up.
    pub target: CameraTransform,
    pub elapsed: f32,
    /// Duration in seconds.
    pub duration: f32,
    pub easing: Easing,
    /// Fraction of the gap kept per 60 Hz frame at full eased progress.
    pub smoothing: f32,
}

impl CameraMotion {
    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Camera notifications, queued in the order they happen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CameraEvent {
    MoveStart { id: MotionId, target: CameraTransform },
    MoveEnd { id: MotionId },
}

/// Owner of the camera transform.
#[derive(Debug)]
pub struct CameraRig {
    transform: CameraTransform,
    motion: Option<CameraMotion>,
    next_id: u32,
    duration: f32,
    easing: Easing,
    smoothing: f32,
    events: Vec<CameraEvent>,
}

impl CameraRig {
    pub fn new(transform: CameraTransform) -> Self {
        let defaults = ComposerConfig::default();
        Self {
            transform,
            motion: None,
            next_id: 1,
            duration: defaults.camera_duration,
            easing: defaults.camera_easing,
            smoothing: defaults.camera_smoothing,
            events: Vec::new(),
        }
    }

    /// Rig parked at the configured overview pose, with the configured timing.
    pub fn from_config(config: &ComposerConfig) -> Self {
        Self::new(CameraTransform::new(config.galaxy_eye, config.galaxy_look_at))
            .with_timing(config.camera_duration, config.camera_easing, config.camera_smoothing)
    }

    pub fn with_timing(mut self, duration: f32, easing: Easing, smoothing: f32) -> Self {
        self.duration = duration;
        self.easing = easing;
        self.smoothing = smoothing.clamp(0.0, 0.99);
        self
    }

    pub fn transform(&self) -> &CameraTransform {
        &self.transform
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_some()
    }

    pub fn motion(&self) -> Option<&CameraMotion> {
        self.motion.as_ref()
    }

    pub fn distance(&self) -> f32 {
        self.transform.distance()
    }

    /// Start a motion toward `target` with the rig's default duration.
    /// Any motion in flight is dropped without a `MoveEnd`.
    pub fn move_to(&mut self, target: CameraTransform) -> MotionId {
        self.move_to_over(target, self.duration)
    }

    /// Start a motion toward `target` lasting `duration` seconds.
    pub fn move_to_over(&mut self, target: CameraTransform, duration: f32) -> MotionId {
        if let Some(old) = self.motion.take() {
            log::debug!("camera: motion {:?} cancelled at {:.0}%", old.id, old.progress() * 100.0);
        }

        let id = MotionId(self.next_id);
        self.next_id += 1;

        self.motion = Some(CameraMotion {
            id,
            start: self.transform,
            target,
            elapsed: 0.0,
            duration,
            easing: self.easing,
            smoothing: self.smoothing,
        });
        self.events.push(CameraEvent::MoveStart { id, target });
        log::debug!("camera: motion {id:?} started toward {:?}", target.look_at);
        id
    }

    /// Frame `point` from `point + offset`.
    pub fn focus_on(&mut self, point: Vec3, offset: Vec3) -> MotionId {
        self.move_to(CameraTransform::framing(point, offset))
    }

    /// Abandon the motion in flight, leaving the camera where it is.
    /// No `MoveEnd` is emitted. Returns the abandoned motion's id.
    pub fn stop(&mut self) -> Option<MotionId> {
        let motion = self.motion.take()?;
        log::debug!("camera: motion {:?} stopped", motion.id);
        Some(motion.id)
    }

    /// Exclusive write access for user camera controls.
    /// Refused while a motion owns the transform.
    pub fn transform_mut(&mut self) -> Result<&mut CameraTransform> {
        match &self.motion {
            Some(motion) => Err(ComposerError::CameraBusy(motion.id)),
            None => Ok(&mut self.transform),
        }
    }

    pub fn set_transform(&mut self, transform: CameraTransform) -> Result<()> {
        *self.transform_mut()? = transform;
        Ok(())
    }

    /// Advance the motion in flight by `dt` seconds.
    ///
    /// The eased progress scales a per-frame smoothing factor, so the camera
    /// closes a growing share of the remaining gap each frame instead of
    /// following a fixed time-parameterized path. On completion the transform
    /// is set exactly to the target. Returns the id of a motion that finished
    /// this tick.
    pub fn tick(&mut self, dt: f32) -> Option<MotionId> {
        let motion = self.motion.as_mut()?;
        motion.elapsed += dt;

        if motion.is_complete() {
            let id = motion.id;
            self.transform = motion.target;
            self.motion = None;
            self.events.push(CameraEvent::MoveEnd { id });
            log::debug!("camera: motion {id:?} arrived");
            return Some(id);
        }

        let eased = motion.easing.apply(motion.progress());
        let factor = eased * smoothing_factor(motion.smoothing, dt);
        self.transform.eye = lerp_vec3(self.transform.eye, motion.target.eye, factor);
        self.transform.look_at = lerp_vec3(self.transform.look_at, motion.target.look_at, factor);
        None
    }

    /// Drain queued camera events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = CameraEvent> + '_ {
        self.events.drain(..)
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_config(&ComposerConfig::default())
    }
}
