//! Signal value objects: module scores, regimes, thresholds, composite.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One named intermediate contribution inside a module score, sign already
/// applied (a penalizing feature is stored negated).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: &'static str,
    pub value: f64,
}

impl Factor {
    pub fn new(name: &'static str, value: f64) -> Self {
        Self { name, value }
    }
}

/// Factor-level breakdown of a module score, for audit and testing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub factors: Vec<Factor>,
    pub note: &'static str,
}

/// Bounded score of one module over one feature bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleScore {
    pub module: &'static str,
    pub score: f64,
    pub explanation: Explanation,
}

/// Coarse market-state label driving weight adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    HighVolatility,
    Trending,
    RangeBound,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Regime::HighVolatility => "high_volatility",
            Regime::Trending => "trending",
            Regime::RangeBound => "range_bound",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed decision thresholds carried on every signal for downstream
/// consumers; the engine never branches on them itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub strong_sell: f64,
    pub bearish: f64,
    pub neutral: f64,
    pub bullish: f64,
}

impl Thresholds {
    pub const STANDARD: Thresholds = Thresholds {
        strong_sell: 20.0,
        bearish: 40.0,
        neutral: 60.0,
        bullish: 80.0,
    };
}

/// Single bounded aggregate of all module scores under regime-adjusted
/// weights, plus the per-module breakdown in fixed registry order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositeSignal {
    pub symbol: String,
    pub timeframe_min: u32,
    pub computed_at: DateTime<Utc>,
    pub scores: Vec<ModuleScore>,
    pub composite: f64,
    pub regime: Regime,
    pub thresholds: Thresholds,
}
