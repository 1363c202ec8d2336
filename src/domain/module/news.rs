//! News sentiment module.
//!
//! raw = sentiment_level × 30 + sentiment_velocity × 20 + shock × 40

use crate::domain::features::{feature, FeatureBundle};
use crate::domain::module::{bounded, SignalModule};
use crate::domain::signal::{Explanation, Factor, ModuleScore};

pub struct NewsSentiment;

impl SignalModule for NewsSentiment {
    fn name(&self) -> &'static str {
        "news_sentiment"
    }

    fn score(&self, features: &FeatureBundle) -> ModuleScore {
        let sentiment = feature(&features.news, "sentiment_level", 0.0);
        let velocity = feature(&features.news, "sentiment_velocity", 0.0);
        let shock = feature(&features.news, "shock", 0.0);
        let raw = sentiment * 30.0 + velocity * 20.0 + shock * 40.0;
        ModuleScore {
            module: self.name(),
            score: bounded(raw),
            explanation: Explanation {
                factors: vec![
                    Factor::new("sentiment", sentiment),
                    Factor::new("velocity", velocity),
                    Factor::new("shock", shock),
                ],
                note: "Positive shocks and rising sentiment lift the module.",
            },
        }
    }
}
