//! Derived metrics models. Computed per render, never stored.

use serde::Serialize;

/// Direction of a P&L figure. Zero counts as up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PnlDirection {
    Up,
    Down,
}

/// A P&L value with its display direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlBadge {
    pub value: f64,
    pub direction: PnlDirection,
}

impl PnlBadge {
    pub fn new(value: f64) -> Self {
        let direction = if value >= 0.0 {
            PnlDirection::Up
        } else {
            PnlDirection::Down
        };
        Self { value, direction }
    }
}

/// The largest position by value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHolding {
    pub ticker: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    /// Sum of position values; unreadable values count as 0
    pub total_positions_value: f64,
    /// `total_positions_value / equity`, 0 without positive equity. Not clamped.
    pub exposure_pct: f64,
    pub top_holding: Option<TopHolding>,
    pub position_count: usize,
    pub trade_count: usize,
    pub daily_pnl_badge: Option<PnlBadge>,
    pub total_pnl_badge: Option<PnlBadge>,
}

/// One row of the positions table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRow {
    pub ticker: String,
    /// Quantity as written by the engine
    pub shares: String,
    pub value: f64,
    /// Share of equity in percent, 0 without positive equity
    pub portfolio_pct: f64,
}

/// One row of the recent trades table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRow {
    pub date: String,
    pub ticker: String,
    /// Normalised to `Buy` / `Sell` casing
    pub side: String,
    pub shares: String,
    pub order_status: String,
}
