//! Parameter perturbation shared by the probabilistic and one-way
//! analyses.

use mandeval_core::ModelConfig;

/// Multipliers floor: keeps a deep negative draw from flipping the sign
/// of a rate or price.
pub const MIN_MULTIPLIER: f64 = 0.01;

/// Multiplicative shifts for the perturbed parameter groups.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterMultipliers {
    pub attack_rate: f64,
    pub risk_reduction: f64,
    pub unit_costs: f64,
    pub vsl: f64,
    pub value_per_qaly: f64,
}

impl ParameterMultipliers {
    pub const IDENTITY: ParameterMultipliers = ParameterMultipliers {
        attack_rate: 1.0,
        risk_reduction: 1.0,
        unit_costs: 1.0,
        vsl: 1.0,
        value_per_qaly: 1.0,
    };
}

/// A copy of the model constants with the multipliers applied. Attack
/// rates and the risk reduction stay capped at 1 so a large upward draw
/// cannot leave the valid probability range.
pub fn apply_multipliers(base: &ModelConfig, multipliers: &ParameterMultipliers) -> ModelConfig {
    let mut config = base.clone();

    config.epidemiology.mild.attack_rate =
        (base.epidemiology.mild.attack_rate * multipliers.attack_rate).min(1.0);
    config.epidemiology.severe.attack_rate =
        (base.epidemiology.severe.attack_rate * multipliers.attack_rate).min(1.0);
    config.epidemiology.vaccine_risk_reduction =
        (base.epidemiology.vaccine_risk_reduction * multipliers.risk_reduction).min(1.0);

    config.cost_assumptions = base.cost_assumptions.with_unit_costs_scaled(multipliers.unit_costs);

    for meta in config.countries.values_mut() {
        meta.vsl *= multipliers.vsl;
        meta.value_per_qaly *= multipliers.value_per_qaly;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandeval_core::types::Country;

    #[test]
    fn identity_multipliers_change_nothing() {
        let base = ModelConfig::builtin();
        let perturbed = apply_multipliers(&base, &ParameterMultipliers::IDENTITY);
        assert_eq!(perturbed, base);
    }

    #[test]
    fn attack_rate_multiplier_is_capped_at_one() {
        let base = ModelConfig::builtin();
        let multipliers = ParameterMultipliers {
            attack_rate: 10.0,
            ..ParameterMultipliers::IDENTITY
        };
        let perturbed = apply_multipliers(&base, &multipliers);
        assert_eq!(perturbed.epidemiology.severe.attack_rate, 1.0);
        assert!(perturbed.validate().is_ok());
    }

    #[test]
    fn monetisation_multipliers_touch_every_country() {
        let base = ModelConfig::builtin();
        let multipliers = ParameterMultipliers {
            vsl: 1.5,
            value_per_qaly: 0.5,
            ..ParameterMultipliers::IDENTITY
        };
        let perturbed = apply_multipliers(&base, &multipliers);
        for country in Country::ALL {
            let before = base.country_meta(country);
            let after = perturbed.country_meta(country);
            assert!((after.vsl - before.vsl * 1.5).abs() < 1e-6);
            assert!((after.value_per_qaly - before.value_per_qaly * 0.5).abs() < 1e-6);
        }
    }
}
