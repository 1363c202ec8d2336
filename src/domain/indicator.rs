//! Average true range, Wilder-smoothed.
//!
//! Supplies the volatility input the execution router's bracket needs when
//! routing a freshly computed signal.

use crate::domain::candle::Candle;

/// ATR series aligned with `candles`; entries before the warmup are 0.0.
/// Empty when there are fewer candles than the period, or the period is 0.
pub fn wilder_atr(candles: &[Candle], period: usize) -> Vec<f64> {
    if candles.len() < period || period == 0 {
        return Vec::new();
    }

    let mut tr_values = Vec::with_capacity(candles.len());
    for (i, candle) in candles.iter().enumerate() {
        let tr = if i == 0 {
            candle.high - candle.low
        } else {
            candle.true_range(candles[i - 1].close)
        };
        tr_values.push(tr);
    }

    let mut results = Vec::with_capacity(candles.len());
    for i in 0..candles.len() {
        if i < period - 1 {
            results.push(0.0);
        } else if i == period - 1 {
            let seed = tr_values[0..=i].iter().sum::<f64>() / period as f64;
            results.push(seed);
        } else {
            let prev: f64 = results[i - 1];
            results.push((prev * (period - 1) as f64 + tr_values[i]) / period as f64);
        }
    }
    results
}

/// Most recent ATR value, if the series is long enough to produce one.
pub fn latest_atr(candles: &[Candle], period: usize) -> Option<f64> {
    wilder_atr(candles, period).last().copied()
}
