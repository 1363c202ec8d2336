//! Regime confidence module.
//!
//! raw = trend_strength × 30 − noise_ratio × 25 − |volatility_regime − 1| × 20
//!
//! Scores how trustworthy the current market state is: strong trend with
//! controlled volatility raises confidence, noise and volatility extremes in
//! either direction lower it.

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct RegimeClassifier;

impl SignalModule for RegimeClassifier {
    fn name(&self) -> &'static str {
        "regime_classifier"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let vol_regime = feature(&features.meta, "volatility_regime", 0.0);
        let trend_strength = feature(&features.meta, "trend_strength", 0.0);
        let noise_ratio = feature(&features.meta, "noise_ratio", 0.0);
        let vol_distance = (vol_regime - 1.0).abs();
        let raw = trend_strength * 30.0 - noise_ratio * 25.0 - vol_distance * 20.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("trend_strength", trend_strength),
                    Factor::new("noise_ratio", -noise_ratio),
                    Factor::new("volatility_regime_distance", -vol_distance),
                ],
                note: "Trend strength with volatility near baseline raises regime confidence.",
            },
        }
    }
}
