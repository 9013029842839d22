//! Snapshot source trait.

use chrono::{DateTime, Utc};

use super::Snapshot;

/// Something that can produce the current snapshot.
///
/// `now` is the load time of the render; it fills in `as_of` when the
/// underlying data does not report one. Implementations never fail: missing
/// or malformed inputs degrade to absent fields and empty tables.
pub trait SnapshotSource: Send + Sync {
    fn load(&self, now: DateTime<Utc>) -> Snapshot;
}
