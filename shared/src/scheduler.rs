use log::trace;

use crate::{pose::Pose, sync_config::SyncConfig};

/// Decides, once per tick on the authority-originating peer, whether the
/// local pose has changed enough and enough time has elapsed to justify
/// emitting an update.
#[derive(Debug, Default)]
pub struct SendScheduler {
    last_sent_pose: Option<Pose>,
    last_sent_at: f64,
}

impl SendScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the candidate pose to emit, or `None` when either gate holds
    /// it back. On emission the send bookkeeping advances unconditionally,
    /// even if the candidate is later rejected downstream.
    pub fn consider(&mut self, now: f64, pose: &Pose, config: &SyncConfig) -> Option<Pose> {
        // A send rate of zero makes this interval infinite, closing the gate.
        if now - self.last_sent_at < config.send_interval() {
            return None;
        }

        let changed = match &self.last_sent_pose {
            None => true,
            Some(last) => {
                last.translation_delta(pose) > config.min_translation_delta()
                    || last.angular_delta_degrees(pose) > config.min_rotation_delta_degrees()
            }
        };
        if !changed {
            return None;
        }

        trace!("scheduler emitting pose update at t={}", now);
        self.last_sent_pose = Some(*pose);
        self.last_sent_at = now;
        Some(*pose)
    }

    pub fn last_sent_at(&self) -> f64 {
        self.last_sent_at
    }
}
