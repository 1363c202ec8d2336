//! The nine heuristic scoring modules.
//!
//! Each module is a pure function of the feature bundle: a raw linear
//! combination of a few named features, squashed into (-100, 100) by
//! [`bounded`]. Modules substitute neutral defaults for absent keys and
//! attach a factor-level explanation to every score.
//!
//! [`MODULES`] fixes the registry order; composite signals list their scores
//! in exactly this order on every call.

pub mod momentum;
pub mod news;
pub mod onchain;
pub mod order_book;
pub mod pattern;
pub mod regime;
pub mod swarm;
pub mod trend;
pub mod volume_flow;

use crate::domain::features::FeatureBundle;
use crate::domain::signal::ModuleScore;

/// Capability interface: produce a bounded score plus explanation from a
/// feature bundle. Implementations are stateless unit structs.
pub trait SignalModule {
    fn name(&self) -> &'static str;
    fn score(&self, features: &FeatureBundle) -> ModuleScore;
}

/// `100 × tanh(raw / 100)`: maps unbounded raw combinations into (-100, 100),
/// monotone near zero with saturation at the extremes. Shared by every module
/// except the heuristic swarm, which uses its own saturation constant.
pub fn bounded(raw: f64) -> f64 {
    100.0 * (raw / 100.0).tanh()
}

/// All scoring modules in their fixed, stable invocation order.
pub static MODULES: [&(dyn SignalModule + Sync); 9] = [
    &trend::TechnicalTrend,
    &momentum::MomentumReversal,
    &volume_flow::VolumeFlow,
    &order_book::OrderBookMicrostructure,
    &news::NewsSentiment,
    &onchain::OnChainConfirmation,
    &regime::RegimeClassifier,
    &pattern::PatternCluster,
    &swarm::HeuristicSwarm,
];
