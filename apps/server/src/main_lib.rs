use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{Config, LogFormat};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use tradeboard_core::{
    dashboard::{DashboardService, DashboardServiceTrait, DashboardSettings},
    session::TradingCalendar,
    snapshot::SnapshotStore,
};

pub struct AppState {
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    /// Directory served under `/files`
    pub data_dir: PathBuf,
    pub public_base_url: Option<String>,
}

/// Installs the global subscriber. `RUST_LOG` filters, default `info`.
///
/// Records emitted through `log` by the core crate arrive here too.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (json, text) = match format {
        LogFormat::Json => (Some(fmt::layer().json().flatten_event(true)), None),
        LogFormat::Text => (None, Some(fmt::layer().with_target(true).with_line_number(true))),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    if config.data_dir.is_dir() {
        tracing::info!("Data directory in use: {}", config.data_dir.display());
    } else {
        // The engine may not have published yet; renders stay empty until it does
        tracing::warn!(
            "Data directory {} does not exist yet",
            config.data_dir.display()
        );
    }

    let settings = DashboardSettings {
        calendar: TradingCalendar::nasdaq().with_timezone(config.exchange_tz),
        display_tz: config.display_tz,
        refresh_interval_secs: config.refresh_interval_secs,
        ..DashboardSettings::default()
    };
    tracing::info!(
        "Session calendar: {} {}-{} {}",
        settings.calendar.exchange,
        settings.calendar.open,
        settings.calendar.close,
        settings.calendar.timezone
    );

    let store = Arc::new(SnapshotStore::new(config.data_dir.clone()));
    let dashboard_service: Arc<dyn DashboardServiceTrait> =
        Arc::new(DashboardService::new(store, settings));

    Ok(Arc::new(AppState {
        dashboard_service,
        data_dir: config.data_dir.clone(),
        public_base_url: config.public_base_url.clone(),
    }))
}
