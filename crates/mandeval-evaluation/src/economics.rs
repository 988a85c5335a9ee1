use mandeval_core::types::CountryMeta;
use serde::{Deserialize, Serialize};

use crate::benefits::BenefitBundle;
use crate::costs::CostBundle;

/// Years over which monetised benefits are annualised for the payback
/// figure. A stated modeling convention, not derived.
pub const PAYBACK_HORIZON_YEARS: f64 = 5.0;

/// A ratio whose denominator may have been zero. The numeric value then
/// follows the unit-denominator convention (divide by one), and the
/// variant records that the fallback fired so callers can report the
/// ratio as undefined instead of presenting it as exact.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Ratio {
    Defined(f64),
    UnitDenominator(f64),
}

impl Ratio {
    pub fn of(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            Ratio::UnitDenominator(numerator)
        } else {
            Ratio::Defined(numerator / denominator)
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Ratio::Defined(value) | Ratio::UnitDenominator(value) => *value,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Ratio::Defined(_))
    }
}

/// Headline economic evaluation of one scenario.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomicEvaluation {
    pub total_costs: f64,
    pub monetised_benefits: f64,
    pub npv: f64,
    pub bcr: Ratio,
    pub cost_per_vaccinated: Ratio,
    pub cost_per_case_averted: Ratio,
    pub cost_per_death_averted: Ratio,
    pub cost_per_qaly: Ratio,
    pub nmb: f64,
    /// None when there are no monetised benefits to pay the costs back.
    pub payback_years: Option<f64>,
}

/// Derive NPV, benefit-cost ratio, cost-effectiveness ratios, net
/// monetary benefit, and payback time.
pub fn compute_economics(
    benefits: &BenefitBundle,
    costs: &CostBundle,
    meta: &CountryMeta,
) -> EconomicEvaluation {
    let total_costs = costs.total;
    let monetised_benefits = benefits.monetised_benefits;

    let npv = monetised_benefits - total_costs;
    let bcr = Ratio::of(monetised_benefits, total_costs);

    let cost_per_vaccinated = Ratio::of(total_costs, benefits.additional_vaccinated);
    let cost_per_case_averted = Ratio::of(total_costs, benefits.cases_averted);
    let cost_per_death_averted = Ratio::of(total_costs, benefits.deaths_averted);
    let cost_per_qaly = Ratio::of(total_costs, benefits.qaly_gained);

    let nmb = benefits.qaly_gained * meta.value_per_qaly - total_costs;

    let payback_years = if monetised_benefits > 0.0 {
        Some(total_costs / (monetised_benefits / PAYBACK_HORIZON_YEARS))
    } else {
        None
    };

    EconomicEvaluation {
        total_costs,
        monetised_benefits,
        npv,
        bcr,
        cost_per_vaccinated,
        cost_per_case_averted,
        cost_per_death_averted,
        cost_per_qaly,
        nmb,
        payback_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> CountryMeta {
        CountryMeta {
            label: "Australia".to_string(),
            currency_code: "AUD".to_string(),
            currency_symbol: "A$".to_string(),
            value_per_qaly: 50_000.0,
            vsl: 7_000_000.0,
        }
    }

    fn benefits(monetised: f64, qaly: f64) -> BenefitBundle {
        BenefitBundle {
            baseline_coverage: 0.75,
            new_coverage: 0.8,
            additional_vaccinated: 50_000.0,
            baseline_cases: 150_000.0,
            new_cases: 146_250.0,
            cases_averted: 3_750.0,
            hospitalisations_averted: 56.25,
            icu_admissions_averted: 15.0,
            deaths_averted: 5.625,
            qaly_gained: qaly,
            dalys_averted: qaly,
            medical_costs_avoided: 0.0,
            productivity_loss_avoided: 0.0,
            vsl_component: 0.0,
            monetised_benefits: monetised,
        }
    }

    fn costs(total: f64) -> CostBundle {
        CostBundle {
            public_sector_fixed: total,
            programme_variable: 0.0,
            employer: 0.0,
            attrition: 0.0,
            social: 0.0,
            total,
        }
    }

    #[test]
    fn npv_and_nmb_follow_their_definitions() {
        let evaluation = compute_economics(&benefits(10_000_000.0, 100.0), &costs(4_000_000.0), &meta());
        assert_eq!(evaluation.npv, 6_000_000.0);
        assert_eq!(evaluation.nmb, 100.0 * 50_000.0 - 4_000_000.0);
        assert!(evaluation.bcr.is_defined());
        assert!((evaluation.bcr.value() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn zero_costs_trigger_the_unit_denominator_fallback() {
        let evaluation = compute_economics(&benefits(10_000_000.0, 100.0), &costs(0.0), &meta());
        assert!(!evaluation.bcr.is_defined());
        // BCR fallback equals the monetised benefits divided by one.
        assert_eq!(evaluation.bcr.value(), 10_000_000.0);
        assert!(evaluation.bcr.value().is_finite());
    }

    #[test]
    fn zero_outcome_ratios_fall_back_instead_of_dividing_by_zero() {
        let mut no_outcomes = benefits(0.0, 0.0);
        no_outcomes.additional_vaccinated = 0.0;
        no_outcomes.cases_averted = 0.0;
        no_outcomes.deaths_averted = 0.0;
        let evaluation = compute_economics(&no_outcomes, &costs(2_000_000.0), &meta());
        for ratio in [
            evaluation.cost_per_vaccinated,
            evaluation.cost_per_case_averted,
            evaluation.cost_per_death_averted,
            evaluation.cost_per_qaly,
        ] {
            assert!(!ratio.is_defined());
            assert_eq!(ratio.value(), 2_000_000.0);
            assert!(ratio.value().is_finite() && !ratio.value().is_nan());
        }
    }

    #[test]
    fn payback_uses_the_five_year_amortisation_convention() {
        let evaluation = compute_economics(&benefits(10_000_000.0, 100.0), &costs(4_000_000.0), &meta());
        // 4m / (10m / 5) = 2 years
        assert_eq!(evaluation.payback_years, Some(2.0));
    }

    #[test]
    fn payback_is_undefined_without_benefits() {
        let evaluation = compute_economics(&benefits(0.0, 0.0), &costs(4_000_000.0), &meta());
        assert_eq!(evaluation.payback_years, None);
    }

    #[test]
    fn ratio_serialization_exposes_the_fallback_flag() {
        let json = serde_json::to_value(Ratio::of(5.0, 0.0)).unwrap();
        assert_eq!(json["kind"], "unit_denominator");
        assert_eq!(json["value"], 5.0);
        let json = serde_json::to_value(Ratio::of(6.0, 2.0)).unwrap();
        assert_eq!(json["kind"], "defined");
        assert_eq!(json["value"], 3.0);
    }
}
