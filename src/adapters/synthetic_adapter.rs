//! Synthetic candle adapter.
//!
//! Deterministic stand-in for an exchange feed: generates shaped candle
//! series so the pipeline can run without network access. One candle per
//! timeframe step, ending at the anchor time.

use chrono::{DateTime, Duration, Utc};

use crate::domain::candle::Candle;
use crate::domain::error::SigtraderError;
use crate::ports::candle_port::CandlePort;

/// Shape of the generated close series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesShape {
    /// Slow linear ramp from the base price.
    Trend,
    /// Sine-wave closes with cosine-modulated volume.
    Oscillating,
    /// Piecewise drift steps with a short intra-step sawtooth.
    Stepped,
}

pub struct SyntheticAdapter {
    shape: SeriesShape,
    anchor: Option<DateTime<Utc>>,
}

const BASE_PRICE: f64 = 0.5;

impl SyntheticAdapter {
    pub fn new(shape: SeriesShape) -> Self {
        Self {
            shape,
            anchor: None,
        }
    }

    /// Pin the final candle's timestamp for reproducible series.
    pub fn with_anchor(shape: SeriesShape, anchor: DateTime<Utc>) -> Self {
        Self {
            shape,
            anchor: Some(anchor),
        }
    }

    fn candle_at(&self, symbol: &str, timeframe_min: u32, i: usize, points: usize) -> Candle {
        let (close, volume, spread) = match self.shape {
            SeriesShape::Trend => (
                BASE_PRICE + 0.001 * (i as f64 / points as f64),
                1_000_000.0,
                (0.0005, 0.0005, 0.001),
            ),
            SeriesShape::Oscillating => (
                BASE_PRICE + (i as f64 / 10.0).sin() * 0.01,
                1_000_000.0 + (i as f64 / 5.0).cos() * 50_000.0,
                (0.002, 0.002, 0.003),
            ),
            SeriesShape::Stepped => (
                BASE_PRICE
                    + 0.001 * ((i / 60) % 5) as f64
                    + 0.0005 * (i % 10) as f64,
                900_000.0 + (i % 30) as f64 * 1000.0,
                (0.0005, 0.0008, 0.0009),
            ),
        };
        let (open_off, high_off, low_off) = spread;
        let anchor = self.anchor.unwrap_or_else(Utc::now);
        Candle {
            symbol: symbol.to_string(),
            timeframe_min,
            open: close - open_off,
            high: close + high_off,
            low: close - low_off,
            close,
            volume,
            vwap: close,
            timestamp: anchor
                - Duration::minutes(((points - i) * timeframe_min as usize) as i64),
        }
    }
}

impl CandlePort for SyntheticAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe_min: u32,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        Ok((0..limit)
            .map(|i| self.candle_at(symbol, timeframe_min, i, limit))
            .collect())
    }
}
