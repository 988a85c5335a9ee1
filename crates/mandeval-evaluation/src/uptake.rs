use mandeval_core::types::{ModelSet, PolicyConfiguration, PopulationSegment};
use serde::{Deserialize, Serialize};

use crate::utility::{compute_utility, UtilityResult};

/// Binary logit choice probability of the mandate alternative.
///
/// Computed in the shifted form `1 / (1 + exp(Vo - Vm))`, which stays
/// finite for arbitrarily large utility differences.
pub fn binary_logit(v_mandate: f64, v_opt_out: f64) -> f64 {
    1.0 / (1.0 + (v_opt_out - v_mandate).exp())
}

/// Multinomial logit shares over a utility vector, max-shifted before
/// exponentiation.
pub fn multinomial(utilities: &[f64]) -> Vec<f64> {
    let max = utilities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = utilities.iter().map(|v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Choice probability within one latent class.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassUptake {
    pub id: String,
    pub share: f64,
    pub probability: f64,
}

/// Predicted uptake under both model families for one selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UptakeResult {
    /// Mixed-logit utilities behind `mixed_logit` (the design view shows
    /// these).
    pub utilities: UtilityResult,
    pub mixed_logit: f64,
    pub classes: Vec<ClassUptake>,
    /// Class-share-weighted average of the per-class probabilities.
    pub class_weighted: f64,
    /// Headline uptake: an unweighted 0.5/0.5 blend of the mixed-logit
    /// and latent-class predictions. An ensembling convention, not an
    /// estimated weight.
    pub composite: f64,
}

impl UptakeResult {
    /// Uptake for a subgroup view: the composite for the full sample, or
    /// the matching latent class's own probability. Unknown class ids
    /// fall back to the composite.
    pub fn for_segment(&self, segment: PopulationSegment) -> f64 {
        let class_id = match segment {
            PopulationSegment::FullSample => return self.composite,
            PopulationSegment::Supporters => mandeval_core::defaults::SUPPORTER_CLASS,
            PopulationSegment::Resisters => mandeval_core::defaults::RESISTER_CLASS,
        };
        self.classes
            .iter()
            .find(|class| class.id == class_id)
            .map(|class| class.probability)
            .unwrap_or(self.composite)
    }
}

/// Evaluate predicted uptake for one selection under a model set.
pub fn compute_uptake(models: &ModelSet, selection: &PolicyConfiguration) -> UptakeResult {
    let utilities = compute_utility(&models.mixed_logit, selection);
    let mixed_logit = binary_logit(utilities.mandate, utilities.opt_out);

    let mut classes = Vec::with_capacity(models.latent_class.classes.len());
    let mut class_weighted = 0.0;
    for class in &models.latent_class.classes {
        let class_utility = compute_utility(&class.coefficients, selection);
        let probability = binary_logit(class_utility.mandate, class_utility.opt_out);
        class_weighted += class.share * probability;
        classes.push(ClassUptake {
            id: class.id.clone(),
            share: class.share,
            probability,
        });
    }

    let composite = 0.5 * mixed_logit + 0.5 * class_weighted;

    UptakeResult {
        utilities,
        mixed_logit,
        classes,
        class_weighted,
        composite,
    }
}

/// Choice shares over two mandate variants and opt-out. Mandate B is the
/// zero-utility numeraire; the other two utilities are expressed relative
/// to it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThreeWayUptake {
    pub mandate_a: f64,
    pub mandate_b: f64,
    pub opt_out: f64,
}

pub fn three_alternative_uptake(v_mandate_a: f64, v_opt_out: f64) -> ThreeWayUptake {
    let shares = multinomial(&[v_mandate_a, 0.0, v_opt_out]);
    ThreeWayUptake {
        mandate_a: shares[0],
        mandate_b: shares[1],
        opt_out: shares[2],
    }
}
