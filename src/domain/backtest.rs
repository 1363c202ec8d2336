//! Walk-forward backtest replayer.
//!
//! Slides a fixed-width window across a historical candle series, recomputes
//! the full feature + composite pipeline at every step, and applies a flat
//! per-trade multiplier to an equity curve. No slippage or fee model beyond
//! that multiplier.
//!
//! Two inherited quirks are kept deliberately (see DESIGN.md): features are
//! extracted at timeframe 1 regardless of the series' actual timeframe, and
//! duration_days divides by minutes-per-day on the same 1-minute assumption.

use serde::Serialize;

use crate::domain::candle::Candle;
use crate::domain::composite::CompositeEngine;
use crate::domain::features::{extract_features, EPS};

pub const DEFAULT_WINDOW: usize = 60;

const INITIAL_EQUITY: f64 = 1_000_000.0;
const PNL_MULTIPLIER: f64 = 0.001;
const TRADING_DAYS_PER_YEAR: f64 = 252.0;
const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

/// Summary of one replay run. The equity curve starts at the initial equity
/// and appends one point per evaluated step, no-op steps included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub equity_curve: Vec<f64>,
    pub sharpe: f64,
    pub max_drawdown: f64,
    pub expectancy: f64,
    pub trades: usize,
    pub win_rate: f64,
    pub duration_days: f64,
}

/// Replay the signal pipeline over `candles` with a trailing window of
/// `window` bars per step. Series shorter than `window + 1` evaluate zero
/// steps and return the untouched initial curve.
pub fn walk_forward(symbol: &str, candles: &[Candle], window: usize) -> BacktestResult {
    let engine = CompositeEngine::new();
    let mut equity = INITIAL_EQUITY;
    let mut equity_curve = vec![equity];
    let mut trades = 0usize;
    let mut wins = 0usize;

    for i in window..candles.len() {
        let slice = &candles[i - window..i];
        let features = extract_features(symbol, 1, slice);
        let signal = engine.compute(&features);
        let last_close = slice.last().map(|c| c.close).unwrap_or(0.0);

        if signal.composite > signal.thresholds.bullish {
            equity *= 1.0 + PNL_MULTIPLIER * last_close;
            wins += 1;
            trades += 1;
        } else if signal.composite < signal.thresholds.bearish {
            equity *= 1.0 - PNL_MULTIPLIER * last_close;
            trades += 1;
        }
        equity_curve.push(equity);
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();

    let (sharpe, expectancy) = if returns.is_empty() {
        (0.0, 0.0)
    } else {
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean) * (r - mean)).sum::<f64>() / n;
        let std = variance.sqrt();
        (mean / (std + EPS) * TRADING_DAYS_PER_YEAR.sqrt(), mean)
    };

    let mut peak = f64::MIN;
    let mut max_drawdown = 0.0f64;
    for &point in &equity_curve {
        peak = peak.max(point);
        max_drawdown = max_drawdown.max(peak - point);
    }

    let win_rate = if trades > 0 {
        wins as f64 / trades as f64
    } else {
        0.0
    };

    BacktestResult {
        equity_curve: equity_curve.clone(),
        sharpe,
        max_drawdown,
        expectancy,
        trades,
        win_rate,
        duration_days: equity_curve.len() as f64 / MINUTES_PER_DAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_series(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                symbol: "XRPUSDT".into(),
                timeframe_min: 1,
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000_000.0,
                vwap: close,
                timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::minutes(i as i64),
            })
            .collect()
    }

    #[test]
    fn curve_length_is_steps_plus_one() {
        let candles = make_series(&vec![0.5; 75]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        assert_eq!(result.equity_curve.len(), 75 - 60 + 1);
    }

    #[test]
    fn window_sized_series_evaluates_zero_steps() {
        let candles = make_series(&vec![0.5; 60]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        assert_eq!(result.equity_curve, vec![1_000_000.0]);
        assert_eq!(result.trades, 0);
        assert_eq!(result.win_rate, 0.0);
        assert_eq!(result.sharpe, 0.0);
        assert_eq!(result.expectancy, 0.0);
        assert_eq!(result.max_drawdown, 0.0);
    }

    #[test]
    fn series_shorter_than_window_evaluates_zero_steps() {
        let candles = make_series(&vec![0.5; 10]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        assert_eq!(result.equity_curve, vec![1_000_000.0]);
        assert_eq!(result.trades, 0);
    }

    #[test]
    fn flat_series_signals_strong_sell_band() {
        // A flat window scores in the strong-sell band (volume accumulation
        // saturates the volume-flow module while everything else sits near
        // zero), so every step books a SELL at the flat multiplier.
        let candles = make_series(&vec![0.5; 65]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        assert_eq!(result.trades, 5);
        assert_eq!(result.win_rate, 0.0);
        let expected = 1_000_000.0 * (1.0 - 0.001 * 0.5_f64).powi(5);
        assert!((result.equity_curve[5] - expected).abs() < 1e-3);
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        // equity declines monotonically on a flat SELL-band series
        let candles = make_series(&vec![0.5; 63]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        let first = result.equity_curve[0];
        let last = *result.equity_curve.last().unwrap();
        assert!((result.max_drawdown - (first - last)).abs() < 1e-6);
    }

    #[test]
    fn duration_assumes_one_minute_bars() {
        let candles = make_series(&vec![0.5; 60]);
        let result = walk_forward("XRPUSDT", &candles, 60);
        assert!((result.duration_days - 1.0 / (60.0 * 24.0)).abs() < 1e-12);
    }
}
