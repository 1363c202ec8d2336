//! Volume flow module.
//!
//! raw = (rvol − 1) × 20 + accumulation × 35 + imbalance × 30

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct VolumeFlow;

impl SignalModule for VolumeFlow {
    fn name(&self) -> &'static str {
        "volume_flow"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let rvol = feature(&features.volume, "rvol", 1.0);
        let accumulation = feature(&features.volume, "accumulation", 0.0);
        let imbalance = feature(&features.volume, "imbalance", 0.0);
        let raw = (rvol - 1.0) * 20.0 + accumulation * 35.0 + imbalance * 30.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("rvol", rvol),
                    Factor::new("accumulation", accumulation),
                    Factor::new("imbalance", imbalance),
                ],
                note: "Relative volume above 1 and accumulation push positive, imbalance confirms.",
            },
        }
    }
}
