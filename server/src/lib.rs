//! # Posesync Server
//! Authority-side half of the transform replication protocol: validates
//! candidate moves from the owning peer, applies them, and replicates them
//! to observers with optional distance-based throttling and missed-send
//! backfill.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod peer_context;
mod replicator;
mod send_record;
mod validator;

pub use peer_context::{PeerRoster, PoseSender};
pub use replicator::PoseReplicator;
pub use send_record::PeerSendRecord;
pub use validator::{AlwaysValid, MoveValidator};
