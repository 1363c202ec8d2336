//! HTTP request handlers for the web adapter.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::backtest::{walk_forward, BacktestResult};
use crate::domain::composite::CompositeEngine;
use crate::domain::error::SigtraderError;
use crate::domain::features::extract_features;
use crate::domain::signal::CompositeSignal;

use super::{AppState, WebError};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn signal(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<CompositeSignal>, WebError> {
    let candles = state.candles.fetch_candles(&symbol, 1, state.signal_points)?;
    if candles.is_empty() {
        return Err(SigtraderError::NoData {
            symbol,
            timeframe_min: 1,
        }
        .into());
    }
    let features = extract_features(&symbol, 1, &candles);
    Ok(Json(CompositeEngine::new().compute(&features)))
}

pub async fn backtest(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<BacktestResult>, WebError> {
    let candles = state
        .candles
        .fetch_candles(&symbol, 1, state.backtest_points)?;
    if candles.len() <= state.window {
        return Err(SigtraderError::InsufficientData {
            symbol,
            bars: candles.len(),
            minimum: state.window + 1,
        }
        .into());
    }
    Ok(Json(walk_forward(&symbol, &candles, state.window)))
}
