use mandeval_core::types::{CountryMeta, EpidemiologyParameters, OutbreakSeverity};
use serde::{Deserialize, Serialize};

use crate::uptake::UptakeResult;

/// Population-level health outcomes and their monetised value. All
/// counts are non-negative by construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenefitBundle {
    pub baseline_coverage: f64,
    pub new_coverage: f64,
    pub additional_vaccinated: f64,
    pub baseline_cases: f64,
    pub new_cases: f64,
    pub cases_averted: f64,
    pub hospitalisations_averted: f64,
    pub icu_admissions_averted: f64,
    pub deaths_averted: f64,
    pub qaly_gained: f64,
    /// Treated as numerically identical to QALYs gained. A documented
    /// approximation, not an independent estimate.
    pub dalys_averted: f64,
    pub medical_costs_avoided: f64,
    pub productivity_loss_avoided: f64,
    pub vsl_component: f64,
    pub monetised_benefits: f64,
}

/// Scale predicted uptake into averted outcomes and monetised benefit.
///
/// The coverage response is a capped linear map centred at uptake 0.5:
/// uptake below 0.5 never pushes coverage under the baseline, and the
/// ceiling is 99%. Everything downstream is a fixed-rate multiplicative
/// model, static and cross-sectional.
pub fn compute_benefits(
    uptake: &UptakeResult,
    epidemiology: &EpidemiologyParameters,
    outbreak: OutbreakSeverity,
    meta: &CountryMeta,
) -> BenefitBundle {
    let population = epidemiology.population;
    let baseline_coverage = epidemiology.baseline_coverage;
    let rates = epidemiology.rates_for(outbreak);

    let coverage_delta = epidemiology.max_coverage_gain * (uptake.composite - 0.5);
    let new_coverage = f64::min(
        0.99,
        f64::max(baseline_coverage, baseline_coverage + coverage_delta),
    );

    let additional_vaccinated = f64::max(0.0, population * (new_coverage - baseline_coverage));

    let baseline_cases = population * rates.attack_rate;
    let cases_averted =
        additional_vaccinated * rates.attack_rate * epidemiology.vaccine_risk_reduction;
    let new_cases = f64::max(0.0, baseline_cases - cases_averted);

    let hospitalisations_averted = cases_averted * rates.hospitalisation_rate;
    let icu_admissions_averted = cases_averted * rates.icu_rate;
    let deaths_averted = cases_averted * rates.death_rate;

    let qaly = &epidemiology.qaly_loss;
    let qaly_gained = hospitalisations_averted * qaly.hospitalisation
        + icu_admissions_averted * qaly.icu
        + deaths_averted * qaly.death;
    let dalys_averted = qaly_gained;

    let unit = &epidemiology.illness_costs;
    let medical_costs_avoided = cases_averted * unit.medical_per_case
        + hospitalisations_averted * unit.medical_per_hospitalisation
        + icu_admissions_averted * unit.medical_per_icu;
    let productivity_loss_avoided = cases_averted * unit.productivity_per_case;
    let vsl_component = deaths_averted * meta.vsl;
    let monetised_benefits = medical_costs_avoided + productivity_loss_avoided + vsl_component;

    BenefitBundle {
        baseline_coverage,
        new_coverage,
        additional_vaccinated,
        baseline_cases,
        new_cases,
        cases_averted,
        hospitalisations_averted,
        icu_admissions_averted,
        deaths_averted,
        qaly_gained,
        dalys_averted,
        medical_costs_avoided,
        productivity_loss_avoided,
        vsl_component,
        monetised_benefits,
    }
}
