//! Order-book microstructure module.
//!
//! raw = depth_skew × 40 − spoof_likelihood × 25 + microprice_drift × 35

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct OrderBookMicrostructure;

impl SignalModule for OrderBookMicrostructure {
    fn name(&self) -> &'static str {
        "order_book_microstructure"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let depth_skew = feature(&features.order_book, "depth_skew", 0.0);
        let spoof = feature(&features.order_book, "spoof_likelihood", 0.0);
        let drift = feature(&features.order_book, "microprice_drift", 0.0);
        let raw = depth_skew * 40.0 - spoof * 25.0 + drift * 35.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("depth_skew", depth_skew),
                    Factor::new("spoof_penalty", -spoof),
                    Factor::new("microprice_drift", drift),
                ],
                note: "Book skew and microprice drift lead, spoof likelihood penalizes.",
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
        bundle.order_book.insert("depth_skew".into(), 0.1);
        bundle.order_book.insert("spoof_likelihood".into(), 0.05);
        bundle.order_book.insert("microprice_drift".into(), 0.2);
        let score = OrderBookMicrostructure.score(&bundle);
        let raw = 0.1 * 40.0 - 0.05 * 25.0 + 0.2 * 35.0;
        assert!((score.score - 100.0 * (raw / 100.0_f64).tanh()).abs() < 1e-9);
    }

    #[test]
    fn spoofing_penalizes() {
        let mut bundle = FeatureBundle::empty("XRPUSDT", 1);
        bundle.order_book.insert("spoof_likelihood".into(), 0.4);
        let score = OrderBookMicrostructure.score(&bundle);
        assert!(score.score < 0.0);
        let penalty = score
            .explanation
            .factors
            .iter()
            .find(|f| f.name == "spoof_penalty")
            .unwrap();
        assert!((penalty.value - (-0.4)).abs() < 1e-12);
    }

    #[test]
    fn missing_keys_score_zero() {
        let score = OrderBookMicrostructure.score(&FeatureBundle::empty("XRPUSDT", 1));
        assert_eq!(score.score, 0.0);
    }
}
