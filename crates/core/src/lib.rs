//! Tradeboard Core - snapshot loading, derived metrics and market sessions.
//!
//! This crate reads the artifacts a trading engine publishes into a data
//! directory and turns them into one consistent dashboard view. It performs
//! no writes and holds no state between renders.

pub mod artifacts;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod metrics;
pub mod session;
pub mod snapshot;
pub mod tabular;
pub mod utils;

// Re-export the types most callers need
pub use dashboard::{DashboardService, DashboardServiceTrait, DashboardSettings, DashboardView};
pub use snapshot::{Snapshot, SnapshotSource, SnapshotStore};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
