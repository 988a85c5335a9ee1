use mandeval_core::types::EquityWeights;
use serde::{Deserialize, Serialize};

use crate::benefits::BenefitBundle;
use crate::economics::EconomicEvaluation;

/// QALY gains redistributed across socioeconomic strata, with the
/// equity-weighted aggregate measures.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquityResult {
    pub qaly_low_ses: f64,
    pub qaly_mid_ses: f64,
    pub qaly_high_ses: f64,
    pub weighted_qaly_total: f64,
    pub equity_adjusted_nmb: f64,
    /// Linear function of the share parameters, kept as a placeholder
    /// heuristic. Not a Lorenz-curve concentration index.
    pub concentration_index: f64,
}

/// Split total QALYs across the three strata by fixed shares, weight
/// them, and recompute the net monetary benefit on the weighted total.
pub fn compute_equity(
    benefits: &BenefitBundle,
    economics: &EconomicEvaluation,
    weights: &EquityWeights,
    value_per_qaly: f64,
) -> EquityResult {
    let qaly = benefits.qaly_gained;
    let qaly_low_ses = qaly * weights.share_low;
    let qaly_mid_ses = qaly * weights.share_mid;
    let qaly_high_ses = qaly * weights.share_high;

    let weighted_qaly_total = qaly_low_ses * weights.weight_low
        + qaly_mid_ses * weights.weight_mid
        + qaly_high_ses * weights.weight_high;

    let equity_adjusted_nmb = weighted_qaly_total * value_per_qaly - economics.total_costs;

    let concentration_index = (weights.share_high - weights.share_low) * weights.concentration_scale;

    EquityResult {
        qaly_low_ses,
        qaly_mid_ses,
        qaly_high_ses,
        weighted_qaly_total,
        equity_adjusted_nmb,
        concentration_index,
    }
}
