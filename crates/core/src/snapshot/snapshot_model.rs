//! Snapshot domain models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::artifacts::Artifact;
use crate::tabular::Record;

/// Account figures from the engine's metadata document.
///
/// Every field is optional: "unknown" is distinct from zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    pub equity: Option<f64>,
    pub cash: Option<f64>,
    pub daily_pnl: Option<f64>,
    pub total_pnl: Option<f64>,
    pub as_of: Option<DateTime<Utc>>,
}

/// Everything one dashboard render reads from the data directory.
///
/// Built fresh per render and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub equity: Option<f64>,
    pub cash: Option<f64>,
    pub daily_pnl: Option<f64>,
    pub total_pnl: Option<f64>,
    /// Reported time of the data, or the load time when the engine gave none
    pub as_of: DateTime<Utc>,
    pub positions: Vec<Record>,
    /// Newest first, in the order the engine wrote them
    pub trades: Vec<Record>,
    pub equity_image: Option<Artifact>,
    pub pnl_image: Option<Artifact>,
    pub positions_source: Option<Artifact>,
    pub trades_source: Option<Artifact>,
}

impl Snapshot {
    /// A snapshot with no data at all, as seen before the engine's first run.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self::from_meta(SnapshotMeta::default(), now)
    }

    /// A snapshot holding only the metadata figures.
    pub fn from_meta(meta: SnapshotMeta, now: DateTime<Utc>) -> Self {
        Self {
            equity: meta.equity,
            cash: meta.cash,
            daily_pnl: meta.daily_pnl,
            total_pnl: meta.total_pnl,
            as_of: meta.as_of.unwrap_or(now),
            positions: Vec::new(),
            trades: Vec::new(),
            equity_image: None,
            pnl_image: None,
            positions_source: None,
            trades_source: None,
        }
    }

    pub fn with_positions(mut self, positions: Vec<Record>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_trades(mut self, trades: Vec<Record>) -> Self {
        self.trades = trades;
        self
    }
}
