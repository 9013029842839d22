//! Dashboard service trait.

use chrono::{DateTime, Utc};

use super::{DashboardView, LinkBuilder, SessionView};
use crate::metrics::DerivedMetrics;
use crate::snapshot::Snapshot;

/// Read-side operations behind the dashboard endpoints.
///
/// Every method takes the render's `now` explicitly so callers can keep a
/// snapshot, its metrics and the session countdown on the same instant.
pub trait DashboardServiceTrait: Send + Sync {
    /// Loads the snapshot as of `now`.
    fn snapshot(&self, now: DateTime<Utc>) -> Snapshot;

    /// Loads the snapshot and derives its metrics.
    fn metrics(&self, now: DateTime<Utc>) -> DerivedMetrics;

    /// Session status and countdown at `now`.
    fn session(&self, now: DateTime<Utc>) -> SessionView;

    /// Full dashboard view with download links under `links`.
    fn build(&self, now: DateTime<Utc>, links: &LinkBuilder) -> DashboardView;
}
