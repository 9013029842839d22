//! Filesystem-backed snapshot loading.

use chrono::{DateTime, Utc};
use log::debug;
use std::path::{Path, PathBuf};

use super::{load_meta, Snapshot, SnapshotSource};
use crate::artifacts::{Artifact, ArtifactCategory, ArtifactLocator};
use crate::constants::META_FILE_NAME;
use crate::tabular::{parse_table, Record};

/// Loads snapshots from the directory the trading engine publishes into.
///
/// The store only reads. Each `load` lists the directory again, so a render
/// always reflects the files present at that moment.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    locator: ArtifactLocator,
}

impl SnapshotStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            locator: ArtifactLocator::new(data_dir),
        }
    }

    pub fn data_dir(&self) -> &Path {
        self.locator.directory()
    }

    fn load_table(artifact: Option<&Artifact>) -> Vec<Record> {
        artifact
            .map(|artifact| parse_table(&artifact.path))
            .unwrap_or_default()
    }
}

impl SnapshotSource for SnapshotStore {
    fn load(&self, now: DateTime<Utc>) -> Snapshot {
        let meta = load_meta(&self.data_dir().join(META_FILE_NAME));

        let equity_image = self.locator.locate(ArtifactCategory::EquityImage);
        let pnl_image = self.locator.locate(ArtifactCategory::PnlImage);
        let positions_source = self.locator.locate(ArtifactCategory::PositionsTable);
        let trades_source = self.locator.locate(ArtifactCategory::TradesTable);

        let positions = Self::load_table(positions_source.as_ref());
        let trades = Self::load_table(trades_source.as_ref());

        debug!(
            "Loaded snapshot from {:?}: {} positions, {} trades",
            self.data_dir(),
            positions.len(),
            trades.len()
        );

        Snapshot {
            equity_image,
            pnl_image,
            positions_source,
            trades_source,
            ..Snapshot::from_meta(meta, now)
                .with_positions(positions)
                .with_trades(trades)
        }
    }
}
