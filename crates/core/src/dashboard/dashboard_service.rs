//! Dashboard service - one snapshot load and one `now` per view.

use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use super::{
    AccountSummary, DashboardServiceTrait, DashboardSettings, DashboardView, DownloadLinks,
    LinkBuilder, SessionView, SourceFiles,
};
use crate::artifacts::Artifact;
use crate::constants::AS_OF_DISPLAY_FORMAT;
use crate::metrics::{derive_metrics, position_rows, trade_rows, DerivedMetrics};
use crate::session::SessionClock;
use crate::snapshot::{Snapshot, SnapshotSource};

/// Assembles dashboard views from a snapshot source and a session clock.
pub struct DashboardService {
    source: Arc<dyn SnapshotSource>,
    clock: SessionClock,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SnapshotSource>, settings: DashboardSettings) -> Self {
        Self {
            source,
            clock: SessionClock::new(settings.calendar.clone()),
            settings,
        }
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Builds a view from an already loaded snapshot.
    ///
    /// Metrics, rows and the countdown all derive from `snapshot` and `now`,
    /// so one render never mixes two loads or two clocks.
    pub fn view_from_snapshot(
        &self,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
        links: &LinkBuilder,
    ) -> DashboardView {
        let metrics = derive_metrics(snapshot);
        let featured_symbol = metrics
            .top_holding
            .as_ref()
            .map(|top| top.ticker.trim())
            .filter(|ticker| !ticker.is_empty())
            .unwrap_or(self.settings.featured_fallback_symbol.as_str())
            .to_string();

        DashboardView {
            generated_at: now,
            account: self.account_summary(snapshot),
            positions: position_rows(snapshot),
            trades: trade_rows(snapshot),
            links: DownloadLinks {
                positions: links.optional_link(snapshot.positions_source.as_ref()),
                trades: links.optional_link(snapshot.trades_source.as_ref()),
                equity_image: links.optional_link(snapshot.equity_image.as_ref()),
                pnl_image: links.optional_link(snapshot.pnl_image.as_ref()),
            },
            sources: SourceFiles {
                positions: file_name(snapshot.positions_source.as_ref()),
                trades: file_name(snapshot.trades_source.as_ref()),
                equity_image: file_name(snapshot.equity_image.as_ref()),
                pnl_image: file_name(snapshot.pnl_image.as_ref()),
            },
            session: self.session(now),
            metrics,
            featured_symbol,
            refresh_interval_secs: self.settings.refresh_interval_secs,
        }
    }

    fn account_summary(&self, snapshot: &Snapshot) -> AccountSummary {
        AccountSummary {
            equity: snapshot.equity,
            cash: snapshot.cash,
            daily_pnl: snapshot.daily_pnl,
            total_pnl: snapshot.total_pnl,
            as_of: snapshot.as_of,
            as_of_display: snapshot
                .as_of
                .with_timezone(&self.settings.display_tz)
                .format(AS_OF_DISPLAY_FORMAT)
                .to_string(),
        }
    }
}

fn file_name(artifact: Option<&Artifact>) -> Option<String> {
    artifact.map(|a| a.file_name.clone())
}

impl DashboardServiceTrait for DashboardService {
    fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        self.source.load(now)
    }

    fn metrics(&self, now: DateTime<Utc>) -> DerivedMetrics {
        derive_metrics(&self.source.load(now))
    }

    fn session(&self, now: DateTime<Utc>) -> SessionView {
        let ticket = self.clock.countdown(now);
        SessionView::from_ticket(&ticket, &self.clock, self.settings.display_tz)
    }

    fn build(&self, now: DateTime<Utc>, links: &LinkBuilder) -> DashboardView {
        let snapshot = self.source.load(now);
        debug!(
            "Building dashboard: {} positions, {} trades, as of {}",
            snapshot.positions.len(),
            snapshot.trades.len(),
            snapshot.as_of
        );
        self.view_from_snapshot(&snapshot, now, links)
    }
}
