//! Heuristic swarm module.
//!
//! Averages three lightweight sub-bot scores, then squashes the mean with
//! `100 × tanh(mean / 50)`. The saturation constant deliberately differs from
//! the shared [`bounded`](crate::domain::module::bounded) divisor.
//!
//! Sub-bots:
//! - pullback_buy  = pullback_depth × (−10) + trend_slope × 25
//! - breakout      = breakout_strength × 30 + rvol × 5
//! - mean_revert   = −zscore × 20 + volume imbalance × (−5)

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::SignalModule;
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct HeuristicSwarm;

impl SignalModule for HeuristicSwarm {
    fn name(&self) -> &'static str {
        "heuristic_swarm"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let pullback_buy = feature(&features.technical, "pullback_depth", 0.0) * -10.0
            + feature(&features.technical, "trend_slope", 0.0) * 25.0;
        let breakout = feature(&features.technical, "breakout_strength", 0.0) * 30.0
            + feature(&features.volume, "rvol", 1.0) * 5.0;
        let mean_revert = -feature(&features.technical, "zscore", 0.0) * 20.0
            + feature(&features.volume, "imbalance", 0.0) * -5.0;

        let mean = (pullback_buy + breakout + mean_revert) / 3.0;
        let score = 100.0 * (mean / 50.0).tanh();
        ModuleScore {
            module: self.name(),
            score,
            explanation: Explanation {
                factors: vec![
                    Factor::new("pullback_buy", pullback_buy),
                    Factor::new("breakout", breakout),
                    Factor::new("mean_revert", mean_revert),
                ],
                note: "Swarm mean over lightweight pullback, breakout and reversion bots.",
            },
        }
    }
}
