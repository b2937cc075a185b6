use posesync_shared::{Pose, SendScheduler, SubmitMove, SyncConfig};

/// The owning peer's driver for an entity it has authority over but whose
/// ground truth lives on the server: local motion goes through the
/// change-gated scheduler and comes out as `SubmitMove` messages for the
/// transport glue to ship.
pub struct OwnedEntity {
    config: SyncConfig,
    scheduler: SendScheduler,
    pose: Pose,
}

impl OwnedEntity {
    pub fn new(pose: Pose, config: SyncConfig) -> Self {
        Self {
            config,
            scheduler: SendScheduler::new(),
            pose,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SyncConfig {
        &mut self.config
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// Moves the entity locally; whether the motion is worth submitting is
    /// decided on the next tick.
    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    /// Once-per-tick evaluation: emits a candidate move when both the time
    /// and change gates open.
    pub fn tick(&mut self, now: f64) -> Option<SubmitMove> {
        self.scheduler
            .consider(now, &self.pose, &self.config)
            .map(|pose| SubmitMove::from_pose(&pose))
    }
}
