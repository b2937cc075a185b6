/// Identifies a connected peer. Assigned by the transport layer; this
/// protocol only ever compares and hashes it.
pub type PeerId = u64;
