#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sigtrader::domain::candle::Candle;
use sigtrader::domain::error::SigtraderError;
use sigtrader::ports::candle_port::CandlePort;

pub fn anchor() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn make_candle(i: usize, close: f64, volume: f64) -> Candle {
    Candle {
        symbol: "XRPUSDT".into(),
        timeframe_min: 1,
        open: close,
        high: close,
        low: close,
        close,
        volume,
        vwap: close,
        timestamp: anchor() + chrono::Duration::minutes(i as i64),
    }
}

/// Constant-close, constant-volume series.
pub fn flat_series(count: usize, close: f64) -> Vec<Candle> {
    (0..count).map(|i| make_candle(i, close, 1_000_000.0)).collect()
}

/// Linearly trending close series.
pub fn linear_series(count: usize, start: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| make_candle(i, start + step * i as f64, 1_000_000.0))
        .collect()
}

pub struct MockCandlePort {
    pub candles: Vec<Candle>,
    pub error: Option<String>,
}

impl MockCandlePort {
    pub fn with_candles(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            error: None,
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            candles: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl CandlePort for MockCandlePort {
    fn fetch_candles(
        &self,
        _symbol: &str,
        _timeframe_min: u32,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        if let Some(reason) = &self.error {
            return Err(SigtraderError::Data {
                reason: reason.clone(),
            });
        }
        let start = self.candles.len().saturating_sub(limit);
        Ok(self.candles[start..].to_vec())
    }
}
