//! Reading the engine's `meta.json` document.

use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::SnapshotMeta;
use crate::errors::Result;
use crate::utils::number_utils::coerce_json_number;
use crate::utils::time_utils::parse_instant;

const EQUITY_KEY: &str = "equity";
const CASH_KEY: &str = "cash";
const DAILY_PNL_KEY: &str = "daily_pnl";
const TOTAL_PNL_KEY: &str = "total_pl";
const AS_OF_KEY: &str = "as_of";

/// Loads metadata from `path`.
///
/// A missing, unreadable or corrupt document yields empty metadata.
pub fn load_meta(path: &Path) -> SnapshotMeta {
    match read_meta(path) {
        Ok(meta) => meta,
        Err(e) if e.is_not_found() => {
            debug!("No metadata document at {:?}", path);
            SnapshotMeta::default()
        }
        Err(e) => {
            warn!("Ignoring unreadable metadata {:?}: {}", path, e);
            SnapshotMeta::default()
        }
    }
}

/// Reads and decodes the metadata document at `path`.
pub fn read_meta(path: &Path) -> Result<SnapshotMeta> {
    let content = fs::read(path)?;
    let document: Value = serde_json::from_slice(&content)?;
    Ok(meta_from_value(&document))
}

/// Extracts metadata fields from a decoded document.
///
/// Non-object documents carry no fields. Numeric fields accept numbers and
/// numeric strings; any other value counts as absent. An `as_of` that is not
/// an ISO-8601 instant is absent too.
pub fn meta_from_value(document: &Value) -> SnapshotMeta {
    let object = match document.as_object() {
        Some(object) => object,
        None => {
            warn!("Metadata document is not an object; ignoring it");
            return SnapshotMeta::default();
        }
    };

    let number = |key: &str| {
        let value = object.get(key)?;
        let parsed = coerce_json_number(value);
        if parsed.is_none() && !value.is_null() {
            warn!("Metadata field '{}' is not numeric: {}", key, value);
        }
        parsed
    };

    let as_of = object.get(AS_OF_KEY).and_then(|value| {
        let parsed = value.as_str().and_then(parse_instant);
        if parsed.is_none() && !value.is_null() {
            warn!("Metadata field '{}' is not an instant: {}", AS_OF_KEY, value);
        }
        parsed
    });

    SnapshotMeta {
        equity: number(EQUITY_KEY),
        cash: number(CASH_KEY),
        daily_pnl: number(DAILY_PNL_KEY),
        total_pnl: number(TOTAL_PNL_KEY),
        as_of,
    }
}
