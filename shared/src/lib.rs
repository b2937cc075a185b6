//! # Posesync Shared
//! Common functionality shared between posesync-server & posesync-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use naia_serde::{BitReader, BitWriter, Serde, SerdeErr};

mod messages;
mod pose;
mod rate_curve;
mod scheduler;
mod smoothing;
mod sync_config;
mod types;

pub use messages::{ApplyPose, PosePayload, SubmitMove, WIRE_EPSILON};
pub use pose::Pose;
pub use rate_curve::{CurveError, DistanceRateCurve, RateKey};
pub use scheduler::SendScheduler;
pub use smoothing::SmoothingState;
pub use sync_config::{SyncConfig, MAX_SENDS_PER_SECOND};
pub use types::PeerId;
