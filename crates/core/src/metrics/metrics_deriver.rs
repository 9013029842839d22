//! Pure metric derivation over a snapshot. No I/O.

use super::{DerivedMetrics, PnlBadge, PositionRow, TopHolding, TradeRow};
use crate::constants::{
    POSITION_SHARES_FIELD, POSITION_TICKER_FIELD, POSITION_VALUE_FIELD, TRADE_DATE_FIELD,
    TRADE_SHARES_FIELD, TRADE_SIDE_FIELD, TRADE_STATUS_FIELD, TRADE_TICKER_FIELD,
};
use crate::snapshot::Snapshot;
use crate::tabular::Record;

/// Equity usable as a divisor: present and strictly positive.
fn positive_equity(equity: Option<f64>) -> Option<f64> {
    equity.filter(|e| *e > 0.0)
}

/// Value of one position; unknown or malformed values are 0.
pub fn position_value(record: &Record) -> f64 {
    record.number_or(POSITION_VALUE_FIELD, 0.0)
}

/// Position value as a percentage of equity, 0 without positive equity.
pub fn portfolio_pct(value: f64, equity: Option<f64>) -> f64 {
    match positive_equity(equity) {
        Some(equity) => value / equity * 100.0,
        None => 0.0,
    }
}

/// Derives exposure, concentration and P&L badges from a snapshot.
pub fn derive_metrics(snapshot: &Snapshot) -> DerivedMetrics {
    let total_positions_value: f64 = snapshot.positions.iter().map(position_value).sum();

    let equity = positive_equity(snapshot.equity);
    let exposure_pct = match equity {
        Some(equity) => total_positions_value / equity,
        None => 0.0,
    };
    let top_holding = equity.and_then(|_| top_holding(&snapshot.positions));

    DerivedMetrics {
        total_positions_value,
        exposure_pct,
        top_holding,
        position_count: snapshot.positions.len(),
        trade_count: snapshot.trades.len(),
        daily_pnl_badge: snapshot.daily_pnl.map(PnlBadge::new),
        total_pnl_badge: snapshot.total_pnl.map(PnlBadge::new),
    }
}

/// Largest position by value in one pass.
///
/// The running maximum starts at 0 and only a strictly greater value replaces
/// it, so ties keep the first position seen and non-positive values never
/// qualify.
fn top_holding(positions: &[Record]) -> Option<TopHolding> {
    let mut best: Option<TopHolding> = None;
    let mut best_value = 0.0;
    for record in positions {
        let value = position_value(record);
        if value > best_value {
            best_value = value;
            best = Some(TopHolding {
                ticker: record.text_or(POSITION_TICKER_FIELD, "").to_string(),
                value,
            });
        }
    }
    best
}

/// Rows for the positions table, in snapshot order.
pub fn position_rows(snapshot: &Snapshot) -> Vec<PositionRow> {
    snapshot
        .positions
        .iter()
        .map(|record| {
            let value = position_value(record);
            PositionRow {
                ticker: record.text_or(POSITION_TICKER_FIELD, "").to_string(),
                shares: record.text_or(POSITION_SHARES_FIELD, "0").to_string(),
                value,
                portfolio_pct: portfolio_pct(value, snapshot.equity),
            }
        })
        .collect()
}

/// Rows for the trades table, in snapshot order.
pub fn trade_rows(snapshot: &Snapshot) -> Vec<TradeRow> {
    snapshot
        .trades
        .iter()
        .map(|record| TradeRow {
            date: record.text_or(TRADE_DATE_FIELD, "").to_string(),
            ticker: record.text_or(TRADE_TICKER_FIELD, "").to_string(),
            side: normalize_side(record.text_or(TRADE_SIDE_FIELD, "")),
            shares: record.text_or(TRADE_SHARES_FIELD, "").to_string(),
            order_status: record.text_or(TRADE_STATUS_FIELD, "").to_string(),
        })
        .collect()
}

/// `BUY` -> `Buy`, `sell` -> `Sell`.
pub fn normalize_side(side: &str) -> String {
    let lower = side.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
