use thiserror::Error;

/// Errors that can occur while building a [`DistanceRateCurve`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    /// A curve needs at least one key to be sampled
    #[error("a distance-rate curve requires at least one key")]
    Empty,

    /// Keys must hold finite, non-negative values
    #[error("curve key {index} holds a non-finite or negative value")]
    InvalidKey { index: usize },

    /// Keys must be sorted by ascending distance
    #[error("curve key {index} has a smaller distance than the key before it")]
    UnsortedKey { index: usize },
}

/// One keyframe of a [`DistanceRateCurve`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateKey {
    pub distance: f32,
    pub sends_per_second: f32,
}

impl RateKey {
    pub fn new(distance: f32, sends_per_second: f32) -> Self {
        Self {
            distance,
            sends_per_second,
        }
    }
}

/// Maps inter-peer distance to a target update frequency.
///
/// Shared by the fan-out throttle (to pace per-observer sends) and by the
/// smoothing state machine (to pace interpolation when the observer trusts
/// the synced cadence). Keys are sampled with clamp-to-ends and linear
/// interpolation in between. Whether the curve is monotonic is the
/// configurer's contract; the default constant curve trivially is.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceRateCurve {
    keys: Vec<RateKey>,
}

impl Default for DistanceRateCurve {
    fn default() -> Self {
        // 20 sends/sec out to distance 500, constant beyond.
        Self {
            keys: vec![RateKey::new(0.0, 20.0), RateKey::new(500.0, 20.0)],
        }
    }
}

impl DistanceRateCurve {
    pub fn new(keys: Vec<RateKey>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            let valid = key.distance.is_finite()
                && key.distance >= 0.0
                && key.sends_per_second.is_finite()
                && key.sends_per_second >= 0.0;
            if !valid {
                return Err(CurveError::InvalidKey { index });
            }
            if index > 0 && key.distance < keys[index - 1].distance {
                return Err(CurveError::UnsortedKey { index });
            }
        }
        Ok(Self { keys })
    }

    /// A curve that allows the same frequency at every distance.
    pub fn constant(sends_per_second: f32) -> Self {
        Self {
            keys: vec![RateKey::new(0.0, sends_per_second.max(0.0))],
        }
    }

    /// Target update frequency at the given distance, in sends per second.
    pub fn rate(&self, distance: f32) -> f32 {
        let first = self.keys[0];
        if distance <= first.distance {
            return first.sends_per_second;
        }
        let last = self.keys[self.keys.len() - 1];
        if distance >= last.distance {
            return last.sends_per_second;
        }

        for window in self.keys.windows(2) {
            let (a, b) = (window[0], window[1]);
            if distance <= b.distance {
                let span = b.distance - a.distance;
                if span <= 0.0 {
                    return b.sends_per_second;
                }
                let t = (distance - a.distance) / span;
                return a.sends_per_second + (b.sends_per_second - a.sends_per_second) * t;
            }
        }

        last.sends_per_second
    }

    /// Seconds between sends at the given distance. A rate of zero means
    /// no send is ever required, expressed as an infinite period rather
    /// than a division error.
    pub fn period(&self, distance: f32) -> f32 {
        let rate = self.rate(distance);
        if rate <= 0.0 {
            f32::INFINITY
        } else {
            1.0 / rate
        }
    }
}
