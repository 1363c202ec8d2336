//! Domain error types.
//!
//! The signal pipeline itself never fails: short windows, missing feature
//! keys, and degenerate statistics all degrade to documented neutral values.
//! Errors exist only at the adapter and CLI boundaries.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no candles for {symbol} at {timeframe_min}m")]
    NoData { symbol: String, timeframe_min: u32 },

    #[error("insufficient candles for {symbol}: have {bars}, need {minimum}")]
    InsufficientData {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) => 1,
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::Data { .. }
            | SigtraderError::NoData { .. }
            | SigtraderError::InsufficientData { .. } => 3,
            SigtraderError::Serialize(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
