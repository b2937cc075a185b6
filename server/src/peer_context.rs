use glam::Vec3;

use posesync_shared::{ApplyPose, PeerId};

/// The authority side's view of who is connected. Supplied by the entity
/// directory / transport layer rather than reached for through a global.
pub trait PeerRoster {
    /// Peers that should receive replicated poses this tick. May include
    /// the authority peer; the replicator skips it.
    fn observer_ids(&self) -> Vec<PeerId>;

    /// The observer's own avatar position. Throttle proximity is
    /// observer-relative: this position, not the entity's, anchors the
    /// distance used against the rate curve.
    fn avatar_position(&self, peer: PeerId) -> Option<Vec3>;
}

/// Outgoing message sink, injected so the replicator never touches the
/// transport directly.
pub trait PoseSender {
    fn send_pose(&mut self, to: PeerId, message: ApplyPose);
}
