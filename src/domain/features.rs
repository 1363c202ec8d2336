//! Feature extraction: candle window → feature bundle.
//!
//! Every statistic degrades to a documented neutral value when the window is
//! too short, so extraction never fails. All divisions are guarded by [`EPS`]
//! and no returned value is ever NaN or infinite.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::candle::Candle;

/// Guard constant for every division in the pipeline.
pub const EPS: f64 = 1e-6;

/// Derived statistics from one candle window, grouped by domain.
///
/// Group values live in maps so a consumer can cope with absent keys; scoring
/// modules substitute per-key neutral defaults rather than fail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureBundle {
    pub symbol: String,
    pub timeframe_min: u32,
    pub computed_at: DateTime<Utc>,
    pub technical: BTreeMap<String, f64>,
    pub volume: BTreeMap<String, f64>,
    pub order_book: BTreeMap<String, f64>,
    pub news: BTreeMap<String, f64>,
    pub onchain: BTreeMap<String, f64>,
    pub meta: BTreeMap<String, f64>,
}

impl FeatureBundle {
    /// A bundle with all groups empty; scoring falls back to neutral defaults.
    pub fn empty(symbol: &str, timeframe_min: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            timeframe_min,
            computed_at: Utc::now(),
            technical: BTreeMap::new(),
            volume: BTreeMap::new(),
            order_book: BTreeMap::new(),
            news: BTreeMap::new(),
            onchain: BTreeMap::new(),
            meta: BTreeMap::new(),
        }
    }
}

/// Group lookup with a per-key neutral default for absent keys.
pub fn feature(group: &BTreeMap<String, f64>, key: &str, default: f64) -> f64 {
    group.get(key).copied().unwrap_or(default)
}

/// Least-squares slope of values against their index position.
fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        num += (i as f64 - x_mean) * (y - y_mean);
        den += (i as f64 - x_mean) * (i as f64 - x_mean);
    }
    if den == 0.0 { 0.0 } else { num / den }
}

/// Population standard deviation.
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Extract one [`FeatureBundle`] from an ordered candle window.
///
/// Windows shorter than the minimum each statistic needs yield that
/// statistic's neutral default (0.0, or 1.0 for ratio-like features).
pub fn extract_features(symbol: &str, timeframe_min: u32, candles: &[Candle]) -> FeatureBundle {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
    let n = closes.len();

    let trend_slope = if n >= 2 { regression_slope(&closes) } else { 0.0 };
    let momentum = if n >= 2 { closes[n - 1] - closes[n - 2] } else { 0.0 };
    let rsi = 50.0 + momentum.clamp(-5.0, 5.0) * 5.0;
    let std_close = population_std(&closes);
    let volatility = if n >= 2 { std_close } else { 0.0 };
    let compression = if volatility != 0.0 { 1.0 / (1.0 + volatility) } else { 1.0 };
    let divergence = match candles.last() {
        Some(last) => last.close - last.vwap,
        None => 0.0,
    };
    let acceleration = if n >= 3 {
        momentum - (closes[n - 2] - closes[n - 3])
    } else {
        0.0
    };
    let accumulation = if !volumes.is_empty() {
        let tail = &volumes[volumes.len().saturating_sub(3)..];
        tail.iter().sum::<f64>() / (mean(&volumes) + EPS)
    } else {
        0.0
    };
    let imbalance = if n > 0 {
        (closes[n - 1] - mean(&closes)) / (std_close + EPS)
    } else {
        0.0
    };
    let pullback_depth = if n > 0 {
        let max_close = closes.iter().cloned().fold(f64::MIN, f64::max);
        (max_close - closes[n - 1]) / (max_close + EPS)
    } else {
        0.0
    };
    let breakout_strength = if n > 0 {
        let min_close = closes.iter().cloned().fold(f64::MAX, f64::min);
        (closes[n - 1] - min_close) / (std_close + EPS)
    } else {
        0.0
    };

    let computed_at = candles
        .iter()
        .map(|c| c.timestamp)
        .max()
        .unwrap_or_else(Utc::now);

    let mut technical = BTreeMap::new();
    technical.insert("trend_slope".into(), trend_slope);
    technical.insert("volatility_compression".into(), compression);
    technical.insert("divergence".into(), divergence);
    technical.insert("momentum".into(), momentum);
    technical.insert("rsi".into(), rsi);
    technical.insert("acceleration".into(), acceleration);
    technical.insert("cluster_match".into(), compression * 0.5 + trend_slope * 0.1);
    technical.insert("analogue_score".into(), trend_slope.tanh() * 50.0);
    technical.insert("pullback_depth".into(), pullback_depth);
    technical.insert("breakout_strength".into(), breakout_strength);
    technical.insert("zscore".into(), imbalance);

    let mut volume = BTreeMap::new();
    volume.insert("rvol".into(), accumulation);
    volume.insert("accumulation".into(), accumulation - 1.0);
    volume.insert("imbalance".into(), imbalance);

    let mut order_book = BTreeMap::new();
    order_book.insert("depth_skew".into(), imbalance.tanh());
    order_book.insert("spoof_likelihood".into(), 0.0);
    order_book.insert("microprice_drift".into(), trend_slope);

    // Placeholder groups; live feeds are external collaborators.
    let mut news = BTreeMap::new();
    news.insert("sentiment_level".into(), 0.0);
    news.insert("sentiment_velocity".into(), 0.0);
    news.insert("shock".into(), 0.0);

    let mut onchain = BTreeMap::new();
    onchain.insert("flow_direction".into(), 0.0);
    onchain.insert("active_address_divergence".into(), 0.0);
    onchain.insert("exchange_balance_delta".into(), 0.0);

    let mut meta = BTreeMap::new();
    meta.insert(
        "volatility_regime".into(),
        if n > 0 { volatility / (mean(&closes) + EPS) } else { 1.0 },
    );
    meta.insert("trend_strength".into(), trend_slope.tanh());
    meta.insert(
        "noise_ratio".into(),
        if trend_slope != 0.0 {
            volatility / (trend_slope.abs() + EPS)
        } else {
            0.0
        },
    );

    FeatureBundle {
        symbol: symbol.to_string(),
        timeframe_min,
        computed_at,
        technical,
        volume,
        order_book,
        news,
        onchain,
        meta,
    }
}
