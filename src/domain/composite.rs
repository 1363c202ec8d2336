//! Composite engine: regime classification, weight adaptation, aggregation.
//!
//! One decision per call, no state across calls. The base-weight map is an
//! immutable configuration record built once from the module registry; every
//! computation derives a fresh copy before applying regime multipliers.

use std::collections::BTreeMap;

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::MODULES;
use crate::domain::signal::{CompositeSignal, ModuleScore, Regime, Thresholds};

pub struct CompositeEngine {
    base_weights: BTreeMap<&'static str, f64>,
}

impl CompositeEngine {
    pub fn new() -> Self {
        Self {
            base_weights: MODULES.iter().map(|m| (m.name(), 1.0)).collect(),
        }
    }

    /// Pure function of two meta fields; both boundaries are exclusive.
    /// Absent meta keys read as a neutral market (volatility 1.0, trend 0.0),
    /// which classifies range-bound.
    pub fn classify_regime(&self, features: &FeatureBundle) -> Regime {
        let vol_regime = feature(&features.meta, "volatility_regime", 1.0);
        let trend_strength = feature(&features.meta, "trend_strength", 0.0);
        if vol_regime > 1.5 {
            Regime::HighVolatility
        } else if trend_strength > 0.5 {
            Regime::Trending
        } else {
            Regime::RangeBound
        }
    }

    /// Fresh weight map per call; the shared base is never mutated.
    pub fn adapt_weights(&self, regime: Regime) -> BTreeMap<&'static str, f64> {
        let mut weights = self.base_weights.clone();
        let mut scale = |name: &str, mult: f64| {
            if let Some(w) = weights.get_mut(name) {
                *w *= mult;
            }
        };
        match regime {
            Regime::HighVolatility => {
                scale("regime_classifier", 1.5);
                scale("order_book_microstructure", 1.2);
                scale("momentum_reversal", 0.8);
            }
            Regime::Trending => {
                scale("technical_trend", 1.5);
                scale("volume_flow", 1.2);
            }
            Regime::RangeBound => {
                scale("momentum_reversal", 1.4);
                scale("heuristic_swarm", 1.1);
            }
        }
        weights
    }

    /// Score every module in registry order and aggregate into one bounded
    /// composite under the regime-adjusted weights. Never fails.
    pub fn compute(&self, features: &FeatureBundle) -> CompositeSignal {
        let regime = self.classify_regime(features);
        let weights = self.adapt_weights(regime);
        let scores: Vec<ModuleScore> = MODULES.iter().map(|m| m.score(features)).collect();

        let mut weighted_sum = 0.0;
        let mut weight_sum = 0.0;
        for score in &scores {
            let weight = weights.get(score.module).copied().unwrap_or(1.0);
            weighted_sum += score.score * weight;
            weight_sum += weight;
        }
        let composite = if weight_sum != 0.0 {
            weighted_sum / weight_sum
        } else {
            0.0
        };

        CompositeSignal {
            symbol: features.symbol.clone(),
            timeframe_min: features.timeframe_min,
            computed_at: features.computed_at,
            scores,
            composite,
            regime,
            thresholds: Thresholds::STANDARD,
        }
    }
}

impl Default for CompositeEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meta_bundle(vol_regime: f64, trend_strength: f64) -> FeatureBundle {
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        bundle.meta.insert("volatility_regime".into(), vol_regime);
        bundle.meta.insert("trend_strength".into(), trend_strength);
        bundle
    }

    #[test]
    fn regime_branches() {
        let engine = CompositeEngine::new();
        assert_eq!(
            engine.classify_regime(&meta_bundle(2.0, 0.0)),
            Regime::HighVolatility
        );
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.0, 0.9)),
            Regime::Trending
        );
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.0, 0.1)),
            Regime::RangeBound
        );
    }

    #[test]
    fn regime_boundaries_are_exclusive() {
        let engine = CompositeEngine::new();
        // exactly 1.5 is not high volatility
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.5, 0.0)),
            Regime::RangeBound
        );
        // exactly 0.5 is not trending
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.5, 0.5)),
            Regime::RangeBound
        );
        // one ulp beyond flips
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.5 + 1e-9, 0.0)),
            Regime::HighVolatility
        );
        assert_eq!(
            engine.classify_regime(&meta_bundle(1.5, 0.5 + 1e-9)),
            Regime::Trending
        );
    }

    #[test]
    fn missing_meta_classifies_range_bound() {
        let engine = CompositeEngine::new();
        let bundle = FeatureBundle::empty("XRPUSDT", 1);
        assert_eq!(engine.classify_regime(&bundle), Regime::RangeBound);
    }

    #[test]
    fn weight_multipliers_per_regime() {
        let engine = CompositeEngine::new();

        let w = engine.adapt_weights(Regime::HighVolatility);
        assert_eq!(w["regime_classifier"], 1.5);
        assert_eq!(w["order_book_microstructure"], 1.2);
        assert_eq!(w["momentum_reversal"], 0.8);
        assert_eq!(w["technical_trend"], 1.0);

        let w = engine.adapt_weights(Regime::Trending);
        assert_eq!(w["technical_trend"], 1.5);
        assert_eq!(w["volume_flow"], 1.2);
        assert_eq!(w["heuristic_swarm"], 1.0);

        let w = engine.adapt_weights(Regime::RangeBound);
        assert_eq!(w["momentum_reversal"], 1.4);
        assert_eq!(w["heuristic_swarm"], 1.1);
        assert_eq!(w["volume_flow"], 1.0);
    }

    #[test]
    fn base_weights_never_mutated() {
        let engine = CompositeEngine::new();
        let _ = engine.adapt_weights(Regime::HighVolatility);
        let _ = engine.adapt_weights(Regime::Trending);
        assert!(engine.base_weights.values().all(|&w| w == 1.0));
    }

    #[test]
    fn compute_emits_nine_scores_in_registry_order() {
        let engine = CompositeEngine::new();
        let signal = engine.compute(&FeatureBundle::empty("XRPUSDT", 1));
        assert_eq!(signal.scores.len(), 9);
        let names: Vec<&str> = signal.scores.iter().map(|s| s.module).collect();
        let expected: Vec<&str> = MODULES.iter().map(|m| m.name()).collect();
        assert_eq!(names, expected);
        assert_eq!(signal.thresholds, Thresholds::STANDARD);
    }

    #[test]
    fn compute_is_deterministic() {
        let engine = CompositeEngine::new();
        let mut bundle = meta_bundle(1.2, 0.7);
        bundle.technical.insert("trend_slope".into(), 0.5);
        bundle.volume.insert("rvol".into(), 1.2);
        let first = engine.compute(&bundle);
        let second = engine.compute(&bundle);
        assert_eq!(first, second);
    }

    #[test]
    fn weighted_aggregation() {
        // single non-zero module: composite = score·w / Σw
        let engine = CompositeEngine::new();
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        // zero out the two modules that score non-zero on an empty bundle
        bundle.meta.insert("volatility_regime".into(), 1.0);
        bundle.volume.insert("rvol".into(), 0.0);
        bundle.news.insert("shock".into(), 1.0);

        let signal = engine.compute(&bundle);
        assert_eq!(signal.regime, Regime::RangeBound);

        let news_score = 100.0 * (40.0 / 100.0_f64).tanh();
        let rvol_score = 100.0 * (-20.0 / 100.0_f64).tanh();
        let weight_sum = 9.5; // range-bound: momentum ×1.4, swarm ×1.1
        let expected = (news_score + rvol_score) / weight_sum;
        assert!((signal.composite - expected).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn composite_always_within_hard_bounds(
            slope in -1e3f64..1e3,
            momentum in -1e3f64..1e3,
            rvol in -1e3f64..1e3,
            imbalance in -1e3f64..1e3,
            vol_regime in -1e3f64..1e3,
            trend_strength in -1e3f64..1e3,
            noise in -1e3f64..1e3,
            shock in -1e3f64..1e3,
        ) {
            let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
            bundle.technical.insert("trend_slope".into(), slope);
            bundle.technical.insert("momentum".into(), momentum);
            bundle.technical.insert("zscore".into(), imbalance);
            bundle.volume.insert("rvol".into(), rvol);
            bundle.volume.insert("imbalance".into(), imbalance);
            bundle.news.insert("shock".into(), shock);
            bundle.meta.insert("volatility_regime".into(), vol_regime);
            bundle.meta.insert("trend_strength".into(), trend_strength);
            bundle.meta.insert("noise_ratio".into(), noise);

            let signal = CompositeEngine::new().compute(&bundle);
            prop_assert!(signal.composite >= -100.0 && signal.composite <= 100.0);
            prop_assert!(signal.composite.is_finite());
            prop_assert_eq!(signal.scores.len(), 9);
        }
    }
}
