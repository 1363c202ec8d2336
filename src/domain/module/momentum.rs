//! Momentum / reversal module.
//!
//! raw = momentum × 30 + (rsi − 50) × 1.2 + acceleration × 25

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct MomentumReversal;

impl SignalModule for MomentumReversal {
    fn name(&self) -> &'static str {
        "momentum_reversal"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let momentum = feature(&features.technical, "momentum", 0.0);
        let rsi = feature(&features.technical, "rsi", 50.0);
        let accel = feature(&features.technical, "acceleration", 0.0);
        let raw = momentum * 30.0 + (rsi - 50.0) * 1.2 + accel * 25.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("momentum", momentum),
                    Factor::new("rsi_offset", rsi - 50.0),
                    Factor::new("acceleration", accel),
                ],
                note: "Momentum and acceleration dominate, the rsi offset filters.",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients() {
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        bundle.technical.insert("momentum".into(), 0.2);
        bundle.technical.insert("rsi".into(), 55.0);
        bundle.technical.insert("acceleration".into(), 0.1);
        let score = MomentumReversal.score(&bundle);
        let raw = 0.2 * 30.0 + 5.0 * 1.2 + 0.1 * 25.0;
        assert!((score.score - 100.0 * (raw / 100.0_f64).tanh()).abs() < 1e-9);
    }

    #[test]
    fn rsi_defaults_to_neutral_50() {
        let score = MomentumReversal.score(&FeatureBundle::empty("XRPUSDT", 1));
        assert_eq!(score.score, 0.0);
        let offset = score
            .explanation
            .factors
            .iter()
            .find(|f| f.name == "rsi_offset")
            .unwrap();
        assert_eq!(offset.value, 0.0);
    }

    #[test]
    fn oversold_rsi_pulls_score_down() {
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        bundle.technical.insert("rsi".into(), 25.0);
        let score = MomentumReversal.score(&bundle);
        assert!(score.score < 0.0);
    }
}
