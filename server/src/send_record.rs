use posesync_shared::Pose;

/// Per-(entity, observer) bookkeeping on the authority side.
///
/// Created lazily the first time an observer is considered for replication
/// and lives as long as the entity does. At most one withheld pose is
/// outstanding at a time; a later withheld update overwrites an earlier one
/// rather than queuing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeerSendRecord {
    /// Simulation-clock time of the last actual send to this peer.
    pub last_sent_at: f64,
    /// A candidate update computed for this peer but withheld by the
    /// throttle; cleared once anything is actually sent.
    pub pending_missed_pose: Option<Pose>,
}

impl PeerSendRecord {
    pub fn new() -> Self {
        Self::default()
    }
}
