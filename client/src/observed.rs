use glam::{Quat, Vec3};
use log::warn;

use posesync_shared::{ApplyPose, Pose, SmoothingState, SyncConfig};

/// The local view of an entity some other peer has authority over.
///
/// Incoming poses feed the smoothing state machine (or apply directly when
/// interpolation is off); `tick` advances the machine every simulation tick
/// and refreshes the rendered pose.
pub struct ObservedEntity {
    config: SyncConfig,
    smoothing: SmoothingState,
    pose: Pose,
}

impl ObservedEntity {
    pub fn new(pose: Pose, config: SyncConfig) -> Self {
        Self {
            config,
            smoothing: SmoothingState::new(pose),
            pose,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SyncConfig {
        &mut self.config
    }

    /// The pose to render or query this tick.
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn smoothing(&self) -> &SmoothingState {
        &self.smoothing
    }

    /// Entry point for a raw `ApplyPose` payload off the wire. A payload the
    /// codec cannot decode is discarded without any pose change.
    pub fn receive_pose_bytes(&mut self, bytes: &[u8]) {
        match ApplyPose::from_bytes(bytes) {
            Ok(message) => self.receive_pose(&message),
            Err(err) => {
                warn!("discarding malformed pose payload: {err:?}");
            }
        }
    }

    /// Accepts a replicated pose from the authority.
    pub fn receive_pose(&mut self, message: &ApplyPose) {
        let target = message.to_pose();

        if !self.config.interpolate() {
            // State machine bypassed entirely; keep it coherent for a later
            // config flip.
            self.smoothing.teleport(target);
            self.pose = target;
            return;
        }

        self.smoothing.set_target(target, &self.config);
        self.pose = self.smoothing.sample(self.config.extrapolate());
    }

    /// Advances smoothing by one tick. `observer_distance` is this peer's
    /// avatar distance to the entity, used to pace the lerp when the
    /// distance throttle and synced-cadence assumption are both trusted.
    pub fn tick(&mut self, delta_seconds: f32, observer_distance: f32) {
        if !self.config.interpolate() {
            return;
        }

        let steps = self.config.lerp_steps_per_second(false, observer_distance);
        self.smoothing
            .advance(delta_seconds, steps, self.config.extrapolate());
        self.pose = self.smoothing.sample(self.config.extrapolate());
    }

    /// Moves the view instantly, bypassing all gating. Never dropped; any
    /// client observer holds interpolation authority over its own view.
    pub fn teleport(&mut self, position: Vec3, rotation: Quat) {
        let pose = Pose::new(position, rotation);
        self.smoothing.teleport(pose);
        self.pose = pose;
    }
}
