//! Candle supplier port trait.

use crate::domain::candle::Candle;
use crate::domain::error::SigtraderError;

/// Supplier of ordered, timestamp-ascending candle sequences.
///
/// The supplier owns ordering and validity; the pipeline neither
/// de-duplicates nor re-orders what it receives.
pub trait CandlePort {
    fn fetch_candles(
        &self,
        symbol: &str,
        timeframe_min: u32,
        limit: usize,
    ) -> Result<Vec<Candle>, SigtraderError>;
}
