use mandeval_core::types::{ChoiceCoefficients, MandateScope, PolicyConfiguration};
use serde::{Deserialize, Serialize};

/// Utilities of the two alternatives. Any baseline alternative is an
/// implicit zero.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilityResult {
    pub mandate: f64,
    pub opt_out: f64,
}

/// Map the current selections onto utilities under one coefficient set.
///
/// Reference levels (high-risk scope, medical-only exemptions, the
/// lowest coverage tier) contribute nothing, as does any attribute level
/// the loaded tables have no entry for.
pub fn compute_utility(
    coefficients: &ChoiceCoefficients,
    selection: &PolicyConfiguration,
) -> UtilityResult {
    let mut mandate = coefficients.asc_mandate;

    if selection.scope == MandateScope::AllOccupationsAndPublicSpaces {
        mandate += coefficients.scope_all_public;
    }

    mandate += coefficients.exemption_effect(selection.exemptions);
    mandate += coefficients.coverage_effect(selection.coverage);
    mandate += coefficients.lives_saved * selection.lives_saved;

    if let Some(intensity) = &selection.intensity {
        for level in intensity.levels() {
            mandate += coefficients.intensity_effect(level);
        }
    }

    UtilityResult {
        mandate,
        opt_out: coefficients.asc_opt_out,
    }
}
