//! Pattern / cluster analogy module.
//!
//! raw = cluster_match × 50 + analogue_score × 30

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct PatternCluster;

impl SignalModule for PatternCluster {
    fn name(&self) -> &'static str {
        "pattern_cluster"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let cluster_match = feature(&features.technical, "cluster_match", 0.0);
        let analogue = feature(&features.technical, "analogue_score", 0.0);
        let raw = cluster_match * 50.0 + analogue * 30.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("cluster_match", cluster_match),
                    Factor::new("analogue_score", analogue),
                ],
                note: "Historical analogue and pattern match alignment drive the score.",
            },
        }
    }
}
