use crate::rate_curve::DistanceRateCurve;

/// Upper bound on the configurable send frequency.
pub const MAX_SENDS_PER_SECOND: f32 = 120.0;

/// Per-entity replication configuration.
///
/// Fields are private behind sanitizing setters: every edit re-runs the same
/// idempotent sanitation pass (negative values clamp to zero, dependent
/// flags switch off when their precondition flag is off), so a contradictory
/// configuration can be requested but never observed.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// Ceiling on how often the owner emits updates, in sends per second.
    /// Zero disables time-gated sending entirely (the interval becomes
    /// infinite, never a division error).
    fixed_sends_per_second: f32,
    /// Whether observers may infer the authority's send cadence from the
    /// shared distance-rate curve without being told explicitly.
    assume_synced_send_rate: bool,
    /// Smooth received poses instead of applying them directly. Requires
    /// `assume_synced_send_rate`.
    interpolate: bool,
    /// Also smooth on the authoritative server's own view. Requires
    /// `interpolate`.
    interpolate_on_authority_server: bool,
    /// Positional gap beyond which smoothing snaps instead of sliding.
    snap_distance: f32,
    /// Minimum positional change worth an update.
    min_translation_delta: f32,
    /// Minimum angular change worth an update, in degrees.
    min_rotation_delta_degrees: f32,
    /// Keep advancing a lerp past its end while waiting for the next update.
    extrapolate: bool,
    /// Throttle per-observer replication by distance.
    enable_distance_throttle: bool,
    /// Periodically resend to observers the throttle skipped. Requires
    /// `enable_distance_throttle`.
    enable_missed_send_backfill: bool,
    /// Distance to target-update-frequency mapping shared by the throttle
    /// and the smoothing cadence.
    distance_rate_curve: DistanceRateCurve,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            fixed_sends_per_second: 20.0,
            assume_synced_send_rate: true,
            interpolate: true,
            interpolate_on_authority_server: false,
            snap_distance: 5.0,
            min_translation_delta: 0.0,
            min_rotation_delta_degrees: 0.0,
            extrapolate: false,
            enable_distance_throttle: false,
            enable_missed_send_backfill: false,
            distance_rate_curve: DistanceRateCurve::default(),
        }
    }
}

impl SyncConfig {
    pub fn fixed_sends_per_second(&self) -> f32 {
        self.fixed_sends_per_second
    }

    pub fn assume_synced_send_rate(&self) -> bool {
        self.assume_synced_send_rate
    }

    pub fn interpolate(&self) -> bool {
        self.interpolate
    }

    pub fn interpolate_on_authority_server(&self) -> bool {
        self.interpolate_on_authority_server
    }

    pub fn snap_distance(&self) -> f32 {
        self.snap_distance
    }

    pub fn min_translation_delta(&self) -> f32 {
        self.min_translation_delta
    }

    pub fn min_rotation_delta_degrees(&self) -> f32 {
        self.min_rotation_delta_degrees
    }

    pub fn extrapolate(&self) -> bool {
        self.extrapolate
    }

    pub fn enable_distance_throttle(&self) -> bool {
        self.enable_distance_throttle
    }

    pub fn enable_missed_send_backfill(&self) -> bool {
        self.enable_missed_send_backfill
    }

    pub fn distance_rate_curve(&self) -> &DistanceRateCurve {
        &self.distance_rate_curve
    }

    pub fn set_fixed_sends_per_second(&mut self, value: f32) {
        self.fixed_sends_per_second = value;
        self.sanitize();
    }

    pub fn set_assume_synced_send_rate(&mut self, value: bool) {
        self.assume_synced_send_rate = value;
        self.sanitize();
    }

    pub fn set_interpolate(&mut self, value: bool) {
        self.interpolate = value;
        self.sanitize();
    }

    pub fn set_interpolate_on_authority_server(&mut self, value: bool) {
        self.interpolate_on_authority_server = value;
        self.sanitize();
    }

    pub fn set_snap_distance(&mut self, value: f32) {
        self.snap_distance = value;
        self.sanitize();
    }

    pub fn set_min_translation_delta(&mut self, value: f32) {
        self.min_translation_delta = value;
        self.sanitize();
    }

    pub fn set_min_rotation_delta_degrees(&mut self, value: f32) {
        self.min_rotation_delta_degrees = value;
        self.sanitize();
    }

    pub fn set_extrapolate(&mut self, value: bool) {
        self.extrapolate = value;
        self.sanitize();
    }

    pub fn set_enable_distance_throttle(&mut self, value: bool) {
        self.enable_distance_throttle = value;
        self.sanitize();
    }

    pub fn set_enable_missed_send_backfill(&mut self, value: bool) {
        self.enable_missed_send_backfill = value;
        self.sanitize();
    }

    pub fn set_distance_rate_curve(&mut self, curve: DistanceRateCurve) {
        self.distance_rate_curve = curve;
        self.sanitize();
    }

    /// Seconds between owner-side sends. Infinite when the send rate is zero.
    pub fn send_interval(&self) -> f64 {
        1.0 / self.fixed_sends_per_second as f64
    }

    /// Steps-per-second at which an in-flight lerp advances.
    ///
    /// The server rendering for itself always paces by the nominal send
    /// rate, as does any observer that cannot trust both the throttle and
    /// the synced-cadence assumption. Observers that can trust both pace by
    /// the curve rate for their own distance band, so the lerp duration
    /// matches the cadence they actually receive.
    pub fn lerp_steps_per_second(&self, is_authority_server: bool, observer_distance: f32) -> f32 {
        if is_authority_server || !(self.enable_distance_throttle && self.assume_synced_send_rate) {
            self.fixed_sends_per_second
        } else {
            self.distance_rate_curve.rate(observer_distance)
        }
    }

    fn sanitize(&mut self) {
        self.fixed_sends_per_second = self.fixed_sends_per_second.clamp(0.0, MAX_SENDS_PER_SECOND);
        self.snap_distance = self.snap_distance.max(0.0);
        self.min_translation_delta = self.min_translation_delta.max(0.0);
        self.min_rotation_delta_degrees = self.min_rotation_delta_degrees.max(0.0);

        if !self.assume_synced_send_rate {
            self.interpolate = false;
        }
        if !self.interpolate {
            self.interpolate_on_authority_server = false;
        }
        if !self.enable_distance_throttle {
            self.enable_missed_send_backfill = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_clamp_to_zero() {
        let mut config = SyncConfig::default();
        config.set_fixed_sends_per_second(-5.0);
        config.set_snap_distance(-1.0);
        config.set_min_translation_delta(-0.25);
        config.set_min_rotation_delta_degrees(-90.0);

        assert_eq!(config.fixed_sends_per_second(), 0.0);
        assert_eq!(config.snap_distance(), 0.0);
        assert_eq!(config.min_translation_delta(), 0.0);
        assert_eq!(config.min_rotation_delta_degrees(), 0.0);
    }

    #[test]
    fn send_rate_clamps_to_ceiling() {
        let mut config = SyncConfig::default();
        config.set_fixed_sends_per_second(500.0);
        assert_eq!(config.fixed_sends_per_second(), MAX_SENDS_PER_SECOND);
    }

    #[test]
    fn dependent_flags_forced_off() {
        let mut config = SyncConfig::default();
        config.set_interpolate_on_authority_server(true);
        assert!(config.interpolate_on_authority_server());

        // Withdrawing the cadence assumption cascades through both flags.
        config.set_assume_synced_send_rate(false);
        assert!(!config.interpolate());
        assert!(!config.interpolate_on_authority_server());

        // Backfill cannot be on without the throttle.
        config.set_enable_missed_send_backfill(true);
        assert!(!config.enable_missed_send_backfill());
        config.set_enable_distance_throttle(true);
        config.set_enable_missed_send_backfill(true);
        assert!(config.enable_missed_send_backfill());
        config.set_enable_distance_throttle(false);
        assert!(!config.enable_missed_send_backfill());
    }

    #[test]
    fn sanitize_is_idempotent() {
        let mut config = SyncConfig::default();
        config.set_assume_synced_send_rate(false);
        let once = config.clone();

        // Any further no-op edit must leave the config unchanged.
        config.set_snap_distance(config.snap_distance());
        assert_eq!(once, config);
    }

    #[test]
    fn zero_send_rate_has_infinite_interval() {
        let mut config = SyncConfig::default();
        config.set_fixed_sends_per_second(0.0);
        assert!(config.send_interval().is_infinite());
    }
}
