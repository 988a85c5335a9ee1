use mandeval_core::types::{CostAssumptions, CostToggles, MandateScope};
use serde::{Deserialize, Serialize};

use crate::benefits::BenefitBundle;

/// Category subtotals and the grand total of mandate costs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostBundle {
    pub public_sector_fixed: f64,
    pub programme_variable: f64,
    pub employer: f64,
    pub attrition: f64,
    pub social: f64,
    pub total: f64,
}

/// Aggregate toggle-gated cost line items into category subtotals.
///
/// Public-sector and social items are fixed amounts behind boolean
/// gates. Programme items accumulate into a shared per-dose unit cost;
/// enabling any of them also switches the base price on. Employer and
/// attrition costs scale with the scope-dependent targeted workforce.
pub fn compute_costs(
    benefits: &BenefitBundle,
    toggles: &CostToggles,
    assumptions: &CostAssumptions,
    scope: MandateScope,
    population: f64,
) -> CostBundle {
    let mut public_sector_fixed = 0.0;
    if toggles.policy_drafting {
        public_sector_fixed += assumptions.policy_drafting;
    }
    if toggles.communications {
        public_sector_fixed += assumptions.communications;
    }
    if toggles.it_systems {
        public_sector_fixed += assumptions.it_systems;
    }
    if toggles.enforcement {
        public_sector_fixed += assumptions.enforcement;
    }
    if toggles.exemption_processing {
        public_sector_fixed += assumptions.exemption_processing;
    }
    if toggles.vaccination_capacity {
        public_sector_fixed += assumptions.vaccination_capacity;
    }

    let mut dose_cost = 0.0;
    if toggles.any_programme_item() {
        dose_cost = assumptions.dose_base_price;
        if toggles.cold_chain {
            dose_cost += assumptions.dose_cold_chain;
        }
        if toggles.staffing {
            dose_cost += assumptions.dose_staffing;
        }
        if toggles.capital {
            dose_cost += assumptions.dose_capital;
        }
        if toggles.overhead {
            dose_cost += assumptions.dose_overhead;
        }
    }
    let programme_variable = benefits.additional_vaccinated * dose_cost;

    let workforce_share = assumptions.workforce_share(scope);
    let targeted_workers = population * workforce_share * assumptions.working_age_share;

    let mut per_worker = 0.0;
    if toggles.hr_time {
        per_worker += assumptions.hr_time_per_worker;
    }
    if toggles.paid_time_off {
        per_worker += assumptions.paid_time_off_per_worker;
    }
    if toggles.testing {
        per_worker += assumptions.testing_per_worker;
    }
    let employer = targeted_workers * per_worker;

    let attrition = if toggles.attrition {
        targeted_workers * assumptions.attrition_rate(scope) * assumptions.replacement_cost_per_worker
    } else {
        0.0
    };

    let mut social = 0.0;
    if toggles.trust_erosion {
        social += assumptions.trust_erosion;
    }
    if toggles.protests {
        social += assumptions.protests;
    }
    if toggles.unmet_care {
        social += assumptions.unmet_care;
    }

    let total = public_sector_fixed + programme_variable + employer + attrition + social;

    CostBundle {
        public_sector_fixed,
        programme_variable,
        employer,
        attrition,
        social,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandeval_core::defaults;

    fn benefits_with_vaccinated(additional_vaccinated: f64) -> BenefitBundle {
        BenefitBundle {
            baseline_coverage: 0.75,
            new_coverage: 0.75,
            additional_vaccinated,
            baseline_cases: 0.0,
            new_cases: 0.0,
            cases_averted: 0.0,
            hospitalisations_averted: 0.0,
            icu_admissions_averted: 0.0,
            deaths_averted: 0.0,
            qaly_gained: 0.0,
            dalys_averted: 0.0,
            medical_costs_avoided: 0.0,
            productivity_loss_avoided: 0.0,
            vsl_component: 0.0,
            monetised_benefits: 0.0,
        }
    }

    const POPULATION: f64 = 1_000_000.0;

    #[test]
    fn all_toggles_off_cost_nothing() {
        let bundle = compute_costs(
            &benefits_with_vaccinated(50_000.0),
            &CostToggles::none(),
            &defaults::cost_assumptions(),
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        assert_eq!(bundle.public_sector_fixed, 0.0);
        assert_eq!(bundle.programme_variable, 0.0);
        assert_eq!(bundle.employer, 0.0);
        assert_eq!(bundle.attrition, 0.0);
        assert_eq!(bundle.social, 0.0);
        assert_eq!(bundle.total, 0.0);
    }

    #[test]
    fn public_sector_items_gate_individually() {
        let mut toggles = CostToggles::none();
        toggles.policy_drafting = true;
        toggles.exemption_processing = true;
        let bundle = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &defaults::cost_assumptions(),
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        assert_eq!(bundle.public_sector_fixed, 200_000.0 + 500_000.0);
        assert_eq!(bundle.total, bundle.public_sector_fixed);
    }

    #[test]
    fn any_programme_item_enables_the_base_dose_price() {
        let assumptions = defaults::cost_assumptions();
        let benefits = benefits_with_vaccinated(10_000.0);

        let mut cold_chain_only = CostToggles::none();
        cold_chain_only.cold_chain = true;
        let bundle = compute_costs(
            &benefits,
            &cold_chain_only,
            &assumptions,
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        // base 15 + cold chain 4 per additional vaccinated
        assert_eq!(bundle.programme_variable, 10_000.0 * 19.0);

        let mut procurement_only = CostToggles::none();
        procurement_only.procurement = true;
        let base_only = compute_costs(
            &benefits,
            &procurement_only,
            &assumptions,
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        assert_eq!(base_only.programme_variable, 10_000.0 * 15.0);
    }

    #[test]
    fn employer_costs_scale_with_scope() {
        let assumptions = defaults::cost_assumptions();
        let mut toggles = CostToggles::none();
        toggles.hr_time = true;
        toggles.paid_time_off = true;

        let narrow = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &assumptions,
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        let broad = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &assumptions,
            MandateScope::AllOccupationsAndPublicSpaces,
            POPULATION,
        );
        // 1m * 0.15 * 0.5 * 70 vs 1m * 0.65 * 0.5 * 70
        assert_eq!(narrow.employer, 5_250_000.0);
        assert_eq!(broad.employer, 22_750_000.0);
    }

    #[test]
    fn attrition_is_gated_and_scope_dependent() {
        let assumptions = defaults::cost_assumptions();
        let mut toggles = CostToggles::none();
        toggles.attrition = true;

        let narrow = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &assumptions,
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        // 1m * 0.15 * 0.5 * 0.005 * 20,000
        assert_eq!(narrow.attrition, 7_500_000.0);

        let broad = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &assumptions,
            MandateScope::AllOccupationsAndPublicSpaces,
            POPULATION,
        );
        assert!(broad.attrition > narrow.attrition);
    }

    #[test]
    fn social_items_sum_independently() {
        let mut toggles = CostToggles::none();
        toggles.trust_erosion = true;
        toggles.unmet_care = true;
        let bundle = compute_costs(
            &benefits_with_vaccinated(0.0),
            &toggles,
            &defaults::cost_assumptions(),
            MandateScope::HighRiskOccupations,
            POPULATION,
        );
        assert_eq!(bundle.social, 800_000.0);
    }

    #[test]
    fn grand_total_sums_the_five_categories() {
        let bundle = compute_costs(
            &benefits_with_vaccinated(25_000.0),
            &CostToggles::default(),
            &defaults::cost_assumptions(),
            MandateScope::AllOccupationsAndPublicSpaces,
            POPULATION,
        );
        let expected = bundle.public_sector_fixed
            + bundle.programme_variable
            + bundle.employer
            + bundle.attrition
            + bundle.social;
        assert!((bundle.total - expected).abs() < 1e-6);
        assert!(bundle.total > 0.0);
    }
}
