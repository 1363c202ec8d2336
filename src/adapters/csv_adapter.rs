//! CSV file candle adapter.
//!
//! One file per symbol and timeframe, `{symbol}_{timeframe}m.csv`, with a
//! header row of `timestamp,open,high,low,close,volume,vwap` (vwap optional,
//! defaulting to the row's close). Timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::SigtraderError;
use crate::ports::candle_port::CandlePort;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    vwap: Option<f64>,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, timeframe_min: u32) -> PathBuf {
        self.base_path
            .join(format!("{}_{}m.csv", symbol, timeframe_min))
    }
}

impl CandlePort for CsvAdapter {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe_min: u32,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError> {
        let path = self.csv_path(symbol, timeframe_min);
        let content = fs::read_to_string(&path).map_err(|e| SigtraderError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();
        for result in rdr.deserialize::<CsvRow>() {
            let row = result.map_err(|e| SigtraderError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            candles.push(Candle {
                symbol: symbol.to_string(),
                timeframe_min,
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume,
                vwap: row.vwap.unwrap_or(row.close),
                timestamp: row.timestamp,
            });
        }

        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }
        Ok(candles)
    }
}
