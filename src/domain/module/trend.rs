//! Technical trend module.
//!
//! raw = trend_slope × 40 + volatility_compression × 10 − divergence × 15

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct TechnicalTrend;

impl SignalModule for TechnicalTrend {
    fn name(&self) -> &'static str {
        "technical_trend"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let slope = feature(&features.technical, "trend_slope", 0.0);
        let compression = feature(&features.technical, "volatility_compression", 0.0);
        let divergence = feature(&features.technical, "divergence", 0.0);
        let raw = slope * 40.0 + compression * 10.0 - divergence * 15.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("trend_slope", slope),
                    Factor::new("volatility_compression", compression),
                    Factor::new("divergence", -divergence),
                ],
                note: "Slope and compression lift the score, divergence from vwap drags it.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle_with(slope: f64, compression: f64, divergence: f64) -> FeatureBundle {
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        bundle.technical.insert("trend_slope".into(), slope);
        bundle
            .technical
            .insert("volatility_compression".into(), compression);
        bundle.technical.insert("divergence".into(), divergence);
        bundle
    }

    #[test]
    fn coefficients() {
        let score = TechnicalTrend.score(&bundle_with(1.0, 0.5, 0.2));
        let raw = 1.0 * 40.0 + 0.5 * 10.0 - 0.2 * 15.0;
        assert!((score.score - 100.0 * (raw / 100.0_f64).tanh()).abs() < 1e-9);
    }

    #[test]
    fn missing_keys_score_zero() {
        let score = TechnicalTrend.score(&FeatureBundle::empty("XRPUSDT", 1));
        assert_eq!(score.score, 0.0);
    }

    #[test]
    fn divergence_penalty_is_negated_in_explanation() {
        let score = TechnicalTrend.score(&bundle_with(0.0, 0.0, 0.3));
        let factor = score
            .explanation
            .factors
            .iter()
            .find(|f| f.name == "divergence")
            .unwrap();
        assert!((factor.value - (-0.3)).abs() < 1e-12);
        assert!(score.score < 0.0);
    }
}
