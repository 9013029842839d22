//! Artifact domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::constants::{
    EQUITY_IMAGE_PATTERNS, PNL_IMAGE_PATTERNS, POSITIONS_TABLE_PATTERNS, TRADES_TABLE_PATTERNS,
};

/// The kinds of file the trading engine drops into the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactCategory {
    EquityImage,
    PnlImage,
    PositionsTable,
    TradesTable,
}

impl ArtifactCategory {
    pub const ALL: [ArtifactCategory; 4] = [
        ArtifactCategory::EquityImage,
        ArtifactCategory::PnlImage,
        ArtifactCategory::PositionsTable,
        ArtifactCategory::TradesTable,
    ];

    /// File name patterns pooled when locating this category.
    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            ArtifactCategory::EquityImage => EQUITY_IMAGE_PATTERNS,
            ArtifactCategory::PnlImage => PNL_IMAGE_PATTERNS,
            ArtifactCategory::PositionsTable => POSITIONS_TABLE_PATTERNS,
            ArtifactCategory::TradesTable => TRADES_TABLE_PATTERNS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactCategory::EquityImage => "equity-image",
            ArtifactCategory::PnlImage => "pnl-image",
            ArtifactCategory::PositionsTable => "positions-table",
            ArtifactCategory::TradesTable => "trades-table",
        }
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located file: the newest instance of a category at the time it was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub category: ArtifactCategory,
    /// Absolute or data-dir-relative path; never sent to clients.
    #[serde(skip_serializing)]
    pub path: PathBuf,
    pub file_name: String,
    pub modified_at: DateTime<Utc>,
}

impl Artifact {
    pub fn new(
        category: ArtifactCategory,
        path: PathBuf,
        file_name: impl Into<String>,
        modified_at: DateTime<Utc>,
    ) -> Self {
        Self {
            category,
            path,
            file_name: file_name.into(),
            modified_at,
        }
    }
}
