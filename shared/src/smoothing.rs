use log::trace;

use crate::{pose::Pose, sync_config::SyncConfig};

/// Observer-side smoothing over irregularly-arriving pose updates.
///
/// Two effective states: *snapped* (rendered pose equals the target) and
/// *interpolating* (progress `t` advancing from start toward end). `t` only
/// exceeds 1 while extrapolating; sampling clamps otherwise.
///
/// When `interpolate` is off in the entity's config the machine is bypassed
/// entirely by its caller; nothing here checks that flag except
/// [`SmoothingState::set_target`]'s snap rule, which is pure geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothingState {
    lerp_start: Pose,
    lerp_end: Pose,
    lerp_progress: f32,
}

impl SmoothingState {
    pub fn new(pose: Pose) -> Self {
        Self {
            lerp_start: pose,
            lerp_end: pose,
            lerp_progress: 0.0,
        }
    }

    pub fn progress(&self) -> f32 {
        self.lerp_progress
    }

    pub fn start(&self) -> &Pose {
        &self.lerp_start
    }

    pub fn end(&self) -> &Pose {
        &self.lerp_end
    }

    /// The pose to render this tick.
    pub fn sample(&self, extrapolate: bool) -> Pose {
        let t = if extrapolate {
            self.lerp_progress
        } else {
            self.lerp_progress.min(1.0)
        };
        Pose::interpolate(&self.lerp_start, &self.lerp_end, t)
    }

    /// Accepts a newly-received pose as the lerp target.
    ///
    /// A target further from the rendered pose than `snap_distance` finishes
    /// the in-flight lerp instantly (`t` forced to 1, start == end == target)
    /// so a teleport-scale gap is never slid across; the next received pose
    /// starts a fresh lerp. Anything nearer lerps from the current rendered
    /// pose with progress reset to 0.
    pub fn set_target(&mut self, target: Pose, config: &SyncConfig) {
        let rendered = self.sample(config.extrapolate());
        if rendered.translation_delta(&target) > config.snap_distance() {
            trace!(
                "smoothing snap: gap {} exceeds snap distance {}",
                rendered.translation_delta(&target),
                config.snap_distance()
            );
            self.lerp_start = target;
            self.lerp_end = target;
            self.lerp_progress = 1.0;
            return;
        }

        self.lerp_start = rendered;
        self.lerp_end = target;
        self.lerp_progress = 0.0;
    }

    /// Advances progress by one tick's worth of time at the given cadence.
    /// See [`SyncConfig::lerp_steps_per_second`] for cadence selection.
    pub fn advance(&mut self, delta_seconds: f32, steps_per_second: f32, extrapolate: bool) {
        self.lerp_progress += delta_seconds * steps_per_second;
        if !extrapolate && self.lerp_progress > 1.0 {
            self.lerp_progress = 1.0;
        }
    }

    /// Moves instantly to `pose`, bypassing all gating. Valid from any
    /// interpolation authority; never silently dropped.
    pub fn teleport(&mut self, pose: Pose) {
        self.lerp_start = pose;
        self.lerp_end = pose;
        self.lerp_progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use super::*;

    fn at(x: f32) -> Pose {
        Pose::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY)
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let config = SyncConfig::default();
        let mut smoothing = SmoothingState::new(at(0.0));

        smoothing.set_target(at(4.0), &config);
        assert_eq!(smoothing.sample(false).position.x, 0.0);

        smoothing.advance(0.025, 20.0, false); // half a send interval
        assert!((smoothing.sample(false).position.x - 2.0).abs() < 1e-6);

        smoothing.advance(0.025, 20.0, false);
        assert_eq!(smoothing.sample(false).position.x, 4.0);
    }

    #[test]
    fn progress_clamps_without_extrapolation() {
        let config = SyncConfig::default();
        let mut smoothing = SmoothingState::new(at(0.0));
        smoothing.set_target(at(1.0), &config);

        smoothing.advance(1.0, 20.0, false);
        assert_eq!(smoothing.progress(), 1.0);
        assert_eq!(smoothing.sample(false).position.x, 1.0);
    }

    #[test]
    fn extrapolation_overshoots_linearly() {
        let config = SyncConfig::default();
        let mut smoothing = SmoothingState::new(at(0.0));
        smoothing.set_target(at(2.0), &config);

        smoothing.advance(0.075, 20.0, true); // t = 1.5
        assert_eq!(smoothing.progress(), 1.5);
        assert!((smoothing.sample(true).position.x - 3.0).abs() < 1e-6);
    }

    #[test]
    fn teleport_scale_gap_snaps() {
        let config = SyncConfig::default(); // snap distance 5.0
        let mut smoothing = SmoothingState::new(at(0.0));

        smoothing.set_target(at(100.0), &config);
        assert_eq!(smoothing.progress(), 1.0);
        assert_eq!(smoothing.sample(false).position.x, 100.0);

        // Further advancement leaves the rendered pose put.
        smoothing.advance(0.05, 20.0, false);
        assert_eq!(smoothing.sample(false).position.x, 100.0);
    }

    #[test]
    fn teleport_is_idempotent() {
        let mut smoothing = SmoothingState::new(at(0.0));
        let target = at(42.0);

        smoothing.teleport(target);
        let once = smoothing.clone();
        smoothing.teleport(target);

        assert_eq!(once, smoothing);
        assert_eq!(smoothing.progress(), 0.0);
        assert_eq!(smoothing.start(), &target);
        assert_eq!(smoothing.end(), &target);
    }
}
