//! Session domain models.

use chrono::{DateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::constants::{LABEL_CLOSES_IN, LABEL_OPENS_IN};
use crate::utils::time_utils::DEFAULT_EXCHANGE_TZ;

/// Regular trading hours of one exchange.
///
/// Sessions run Monday to Friday from `open` (inclusive) to `close`
/// (exclusive), exchange-local. Holidays are not modelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingCalendar {
    pub exchange: String,
    pub timezone: Tz,
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl TradingCalendar {
    pub fn new(exchange: impl Into<String>, timezone: Tz, open: NaiveTime, close: NaiveTime) -> Self {
        Self {
            exchange: exchange.into(),
            timezone,
            open,
            close,
        }
    }

    /// NASDAQ regular hours, 09:30-16:00 America/New_York.
    pub fn nasdaq() -> Self {
        Self::new(
            "NASDAQ",
            DEFAULT_EXCHANGE_TZ,
            NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
        )
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for TradingCalendar {
    fn default() -> Self {
        Self::nasdaq()
    }
}

/// Open/closed state at one instant and when it next flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub is_open: bool,
    pub label: String,
    pub next_transition: DateTime<Utc>,
}

impl SessionState {
    pub fn open_until(close: DateTime<Utc>) -> Self {
        Self {
            is_open: true,
            label: LABEL_CLOSES_IN.to_string(),
            next_transition: close,
        }
    }

    pub fn closed_until(open: DateTime<Utc>) -> Self {
        Self {
            is_open: false,
            label: LABEL_OPENS_IN.to_string(),
            next_transition: open,
        }
    }
}
