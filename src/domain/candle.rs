//! Candle representation for one time bucket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV summary of one time bucket for one symbol, immutable once produced.
///
/// Sequences of candles handed to the pipeline are assumed to be ordered by
/// non-decreasing timestamp; the supplier owns that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timeframe_min: u32,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub vwap: f64,
    pub timestamp: DateTime<Utc>,
}

impl Candle {
    /// max(high - low, |high - prev_close|, |low - prev_close|)
    pub fn true_range(&self, prev_close: f64) -> f64 {
        let hl = self.high - self.low;
        let hc = (self.high - prev_close).abs();
        let lc = (self.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_candle() -> Candle {
        Candle {
            symbol: "XRPUSDT".into(),
            timeframe_min: 1,
            open: 0.50,
            high: 0.55,
            low: 0.45,
            close: 0.52,
            volume: 1_000_000.0,
            vwap: 0.51,
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn true_range_hl_dominates() {
        let candle = sample_candle();
        // high-low=0.10, |0.55-0.50|=0.05, |0.45-0.50|=0.05 → 0.10
        assert!((candle.true_range(0.50) - 0.10).abs() < 1e-12);
    }

    #[test]
    fn true_range_gap_up() {
        let candle = sample_candle();
        // high-low=0.10, |0.55-0.40|=0.15, |0.45-0.40|=0.05 → 0.15
        assert!((candle.true_range(0.40) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn true_range_gap_down() {
        let candle = sample_candle();
        // high-low=0.10, |0.55-0.65|=0.10, |0.45-0.65|=0.20 → 0.20
        assert!((candle.true_range(0.65) - 0.20).abs() < 1e-12);
    }
}
