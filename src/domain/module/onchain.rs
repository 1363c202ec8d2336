//! On-chain confirmation module.
//!
//! raw = flow_direction × 30 + active_address_divergence × 25
//!       − exchange_balance_delta × 20

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct OnChainConfirmation;

impl SignalModule for OnChainConfirmation {
    fn name(&self) -> &'static str {
        "onchain_confirmation"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let flow = feature(&features.onchain, "flow_direction", 0.0);
        let active_div = feature(&features.onchain, "active_address_divergence", 0.0);
        let exchange_delta = feature(&features.onchain, "exchange_balance_delta", 0.0);
        let raw = flow * 30.0 + active_div * 25.0 - exchange_delta * 20.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("flow_direction", flow),
                    Factor::new("active_address_divergence", active_div),
                    Factor::new("exchange_balance_delta", -exchange_delta),
                ],
                note: "Outflows and address divergence confirm bias, exchange inflows penalize.",
            },
        }
    }
}
