//! # Posesync Client
//! Observer/owner-side half of the transform replication protocol: consumes
//! replicated poses into a smoothed local view, and turns local authoritative
//! motion into change-gated `SubmitMove` messages.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod observed;
mod owned;

pub use observed::ObservedEntity;
pub use owned::OwnedEntity;
