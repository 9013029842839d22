use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;
use chrono_tz::Tz;
use tradeboard_core::constants::DEFAULT_REFRESH_INTERVAL_SECS;
use tradeboard_core::utils::time_utils::{
    parse_timezone, DEFAULT_DISPLAY_TZ, DEFAULT_EXCHANGE_TZ,
};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` in any case selects JSON lines; anything else is text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Directory the trading engine publishes into
    pub data_dir: PathBuf,
    /// Base for download links; derived per request when unset
    pub public_base_url: Option<String>,
    pub exchange_tz: Tz,
    pub display_tz: Tz,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub refresh_interval_secs: u64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_addr: SocketAddr = var("TB_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid TB_LISTEN_ADDR")?;
        let data_dir = PathBuf::from(var("TB_DATA_DIR").unwrap_or_else(|| "./public".into()));
        let public_base_url = var("TB_PUBLIC_BASE_URL");
        let exchange_tz = match var("TB_EXCHANGE_TZ") {
            Some(name) => parse_timezone(&name).context("Invalid TB_EXCHANGE_TZ")?,
            None => DEFAULT_EXCHANGE_TZ,
        };
        let display_tz = match var("TB_DISPLAY_TZ") {
            Some(name) => parse_timezone(&name).context("Invalid TB_DISPLAY_TZ")?,
            None => DEFAULT_DISPLAY_TZ,
        };
        let cors_allow = var("TB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = var("TB_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(30000);
        let refresh_interval_secs: u64 = var("TB_REFRESH_SECS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
        let log_format = var("TB_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();

        Ok(Self {
            listen_addr,
            data_dir,
            public_base_url,
            exchange_tz,
            display_tz,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            refresh_interval_secs,
            log_format,
        })
    }
}
