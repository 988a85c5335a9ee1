//! Evaluation pipeline for the MandEval decision aid.
//!
//! One evaluation cycle flows strictly one way: policy selections map to
//! utilities, utilities to choice probabilities, probabilities to
//! population health outcomes, outcomes to costs and economic ratios,
//! and finally to equity-weighted aggregates. Every step is a pure
//! function over the immutable model constants held by
//! [`MandateEvaluator`].

pub mod benefits;
pub mod costs;
pub mod economics;
pub mod equity;
pub mod pipeline;
pub mod uptake;
pub mod utility;

pub use benefits::{compute_benefits, BenefitBundle};
pub use costs::{compute_costs, CostBundle};
pub use economics::{compute_economics, EconomicEvaluation, Ratio, PAYBACK_HORIZON_YEARS};
pub use equity::{compute_equity, EquityResult};
pub use pipeline::{
    DesignComparison, MandateEvaluator, ResultBundle, SavedScenario, ScenarioLog,
};
pub use uptake::{
    binary_logit, compute_uptake, multinomial, three_alternative_uptake, ClassUptake,
    ThreeWayUptake, UptakeResult,
};
pub use utility::{compute_utility, UtilityResult};
