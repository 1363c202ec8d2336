//! Web server adapter.
//!
//! Thin JSON boundary over the signal pipeline: one route computes a
//! composite signal for a symbol, one replays a walk-forward backtest.
//! Transport only; all decisions stay in the domain.

mod error;
mod handlers;

pub use error::WebError;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::ports::candle_port::CandlePort;

pub struct AppState {
    pub candles: Arc<dyn CandlePort + Send + Sync>,
    /// Candles fetched per signal computation.
    pub signal_points: usize,
    /// Candles fetched per backtest replay.
    pub backtest_points: usize,
    /// Trailing window width per backtest step.
    pub window: usize,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/signals/{symbol}", get(handlers::signal))
        .route("/backtest/{symbol}", get(handlers::backtest))
        .with_state(Arc::new(state))
}
