//! Execution routing: composite signal → sized, bracketed trade instruction.
//!
//! Routing is threshold-driven and side-aware, but the bracket formula is
//! not: stop sits below entry and take-profit above it for BUY and SELL
//! alike (stop = price − atr × stop_multiplier, take_profit = price + atr ×
//! take_profit_multiplier). That asymmetry-free bracket mirrors the upstream
//! design and is kept as-is; see DESIGN.md before "fixing" it.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::signal::CompositeSignal;

/// Risk parameters from the settings supplier, already validated upstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskSettings {
    pub max_position_pct: f64,
    pub max_drawdown_pct: f64,
    pub stop_multiplier: f64,
    pub take_profit_multiplier: f64,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            max_position_pct: 5.0,
            max_drawdown_pct: 20.0,
            stop_multiplier: 1.5,
            take_profit_multiplier: 3.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

/// A sized, bracketed trade instruction. Only produced when the composite
/// crosses a threshold; a neutral signal produces no command at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionCommand {
    pub symbol: String,
    pub side: Side,
    pub size: f64,
    pub entry: f64,
    pub stop: f64,
    pub take_profit: f64,
    pub expires_at: DateTime<Utc>,
    pub risk_tags: Vec<(String, f64)>,
}

pub struct ExecutionRouter {
    settings: RiskSettings,
}

impl ExecutionRouter {
    pub fn new(settings: RiskSettings) -> Self {
        Self { settings }
    }

    /// Fixed-fraction sizing: balance × max_position_pct / 100 / price.
    fn position_size(&self, balance: f64, price: f64) -> f64 {
        balance * self.settings.max_position_pct / 100.0 / price
    }

    fn bracket(&self, price: f64, atr: f64) -> (f64, f64) {
        let stop = price - atr * self.settings.stop_multiplier;
        let take_profit = price + atr * self.settings.take_profit_multiplier;
        (stop, take_profit)
    }

    /// SELL strictly below the bearish threshold, BUY strictly above the
    /// bullish one; the whole interval [bearish, bullish] routes to nothing.
    pub fn route(
        &self,
        signal: &CompositeSignal,
        balance: f64,
        price: f64,
        atr: f64,
    ) -> Option<ExecutionCommand> {
        let side = if signal.composite < signal.thresholds.bearish {
            Side::Sell
        } else if signal.composite > signal.thresholds.bullish {
            Side::Buy
        } else {
            return None;
        };

        let (stop, take_profit) = self.bracket(price, atr);
        Some(ExecutionCommand {
            symbol: signal.symbol.clone(),
            side,
            size: self.position_size(balance, price),
            entry: price,
            stop,
            take_profit,
            expires_at: signal.computed_at + Duration::minutes(signal.timeframe_min as i64),
            risk_tags: vec![
                ("atr".into(), atr),
                ("position_pct".into(), self.settings.max_position_pct),
            ],
        })
    }
}
