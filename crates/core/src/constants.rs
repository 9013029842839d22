/// Name of the metadata document written next to the tables and charts.
pub const META_FILE_NAME: &str = "meta.json";

/// File name patterns per artifact category. Patterns within one category are
/// pooled before the newest file is picked.
pub const EQUITY_IMAGE_PATTERNS: &[&str] = &["equity_*.png", "chart_*.png"];
pub const PNL_IMAGE_PATTERNS: &[&str] = &["pnl_*.png"];
pub const POSITIONS_TABLE_PATTERNS: &[&str] = &["positions_*.csv"];
pub const TRADES_TABLE_PATTERNS: &[&str] = &["trades_*.csv"];

/// Positions table columns
pub const POSITION_TICKER_FIELD: &str = "Ticker";
pub const POSITION_SHARES_FIELD: &str = "Shares";
pub const POSITION_VALUE_FIELD: &str = "Total Value";

/// Trades table columns
pub const TRADE_DATE_FIELD: &str = "Date";
pub const TRADE_TICKER_FIELD: &str = "Ticker";
pub const TRADE_SIDE_FIELD: &str = "Side";
pub const TRADE_SHARES_FIELD: &str = "Shares";
pub const TRADE_STATUS_FIELD: &str = "OrderStatus";

/// Session labels
pub const LABEL_CLOSES_IN: &str = "Closes in";
pub const LABEL_OPENS_IN: &str = "Opens in";

/// Symbol featured on the live chart when no holding qualifies.
pub const DEFAULT_FEATURED_SYMBOL: &str = "NASDAQ:SPY";

/// Seconds between dashboard refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

/// Display format for the "as of" badge.
pub const AS_OF_DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M %Z";
