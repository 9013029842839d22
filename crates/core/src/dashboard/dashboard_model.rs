//! Dashboard view models.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use super::DownloadLinks;
use crate::constants::{DEFAULT_FEATURED_SYMBOL, DEFAULT_REFRESH_INTERVAL_SECS};
use crate::metrics::{DerivedMetrics, PositionRow, TradeRow};
use crate::session::{format_countdown, CountdownTicket, SessionClock, TradingCalendar};
use crate::utils::time_utils::DEFAULT_DISPLAY_TZ;

/// Settings for assembling dashboard views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub calendar: TradingCalendar,
    /// Timezone instants are rendered in for the user
    pub display_tz: Tz,
    pub refresh_interval_secs: u64,
    pub featured_fallback_symbol: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            calendar: TradingCalendar::default(),
            display_tz: DEFAULT_DISPLAY_TZ,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            featured_fallback_symbol: DEFAULT_FEATURED_SYMBOL.to_string(),
        }
    }
}

/// Account figures as the dashboard shows them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub equity: Option<f64>,
    pub cash: Option<f64>,
    pub daily_pnl: Option<f64>,
    pub total_pnl: Option<f64>,
    pub as_of: DateTime<Utc>,
    /// `as_of` in the display timezone, e.g. `Mon, 08 Jan 2024 16:00 CET`
    pub as_of_display: String,
}

/// File names the tables and charts were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFiles {
    pub positions: Option<String>,
    pub trades: Option<String>,
    pub equity_image: Option<String>,
    pub pnl_image: Option<String>,
}

/// Session status plus the countdown pair, ready for a client.
///
/// `target*` and `serverNow*` come from one computation. Clients measure
/// drift as `localNow - serverNow` once and count down to `target` against
/// `localNow - drift`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub exchange: String,
    pub status_text: String,
    pub is_open: bool,
    pub label: String,
    pub target: DateTime<Utc>,
    pub server_now: DateTime<Utc>,
    /// RFC 3339 in the display timezone
    pub target_iso: String,
    pub server_now_iso: String,
    pub target_epoch_ms: i64,
    pub server_now_epoch_ms: i64,
    pub remaining_secs: i64,
    pub remaining_text: String,
}

impl SessionView {
    pub fn from_ticket(ticket: &CountdownTicket, clock: &SessionClock, display_tz: Tz) -> Self {
        let remaining = ticket.remaining_at_issue();
        Self {
            exchange: clock.calendar().exchange.clone(),
            status_text: clock.status_text(&ticket.state()),
            is_open: ticket.is_open,
            label: ticket.label.clone(),
            target: ticket.target,
            server_now: ticket.server_now,
            target_iso: ticket.target.with_timezone(&display_tz).to_rfc3339(),
            server_now_iso: ticket.server_now.with_timezone(&display_tz).to_rfc3339(),
            target_epoch_ms: ticket.target.timestamp_millis(),
            server_now_epoch_ms: ticket.server_now.timestamp_millis(),
            remaining_secs: remaining.num_seconds(),
            remaining_text: format_countdown(remaining),
        }
    }
}

/// Everything one dashboard render needs, computed from a single `now`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub generated_at: DateTime<Utc>,
    pub account: AccountSummary,
    pub metrics: DerivedMetrics,
    pub positions: Vec<PositionRow>,
    pub trades: Vec<TradeRow>,
    pub links: DownloadLinks,
    pub sources: SourceFiles,
    pub session: SessionView,
    /// Symbol for the live chart: the top holding, or a fallback index
    pub featured_symbol: String,
    pub refresh_interval_secs: u64,
}
