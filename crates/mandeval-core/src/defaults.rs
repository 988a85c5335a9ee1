//! Built-in model tables.
//!
//! Mixed-logit means and two-class latent-class coefficients from the
//! discrete choice experiments fielded in Australia, Italy, and France
//! under mild and severe outbreak vignettes, plus stylised epidemiology,
//! costing, and equity defaults. Everything here is a fixed constant;
//! a JSON configuration file can replace any of it at startup.

use std::collections::HashMap;

use crate::config::ModelConfig;
use crate::types::{
    ChoiceCoefficients, CostAssumptions, Country, CountryMeta, CountryTables, CoverageThreshold,
    EpidemiologyParameters, EquityWeights, ExemptionPolicy, IllnessCosts, LatentClassModel,
    ModelSet, OutcomeRates, PreferenceClass, PreferenceModel, QalyLoss,
};

pub const SUPPORTER_CLASS: &str = "supporters";
pub const RESISTER_CLASS: &str = "resisters";

#[allow(clippy::too_many_arguments)]
fn coefficients(
    asc_mandate: f64,
    asc_opt_out: f64,
    scope_all_public: f64,
    exemption_med_religious: f64,
    exemption_med_religious_personal: f64,
    coverage_70: f64,
    coverage_90: f64,
    lives_saved: f64,
) -> ChoiceCoefficients {
    ChoiceCoefficients {
        asc_mandate,
        asc_opt_out,
        scope_all_public,
        exemptions: HashMap::from([
            (ExemptionPolicy::MedicalReligious, exemption_med_religious),
            (ExemptionPolicy::MedicalReligiousPersonal, exemption_med_religious_personal),
        ]),
        coverage: HashMap::from([
            (CoverageThreshold::Seventy, coverage_70),
            (CoverageThreshold::Ninety, coverage_90),
        ]),
        lives_saved,
        intensity: HashMap::new(),
    }
}

fn latent_class(
    supporter_share: f64,
    supporters: ChoiceCoefficients,
    resisters: ChoiceCoefficients,
) -> LatentClassModel {
    LatentClassModel {
        classes: vec![
            PreferenceClass {
                id: SUPPORTER_CLASS.to_string(),
                share: supporter_share,
                coefficients: supporters,
            },
            PreferenceClass {
                id: RESISTER_CLASS.to_string(),
                share: 1.0 - supporter_share,
                coefficients: resisters,
            },
        ],
    }
}

fn australia_tables() -> CountryTables {
    CountryTables {
        mild: ModelSet {
            mixed_logit: coefficients(0.464, -0.572, -0.319, -0.157, -0.267, 0.171, 0.158, 0.072),
            latent_class: latent_class(
                0.7468,
                coefficients(0.28, -1.01, -0.19, -0.18, -0.21, 0.1, 0.17, 0.04),
                coefficients(0.11, 2.96, -0.26, 0.11, 0.15, -0.09, -0.26, 0.02),
            ),
        },
        severe: ModelSet {
            mixed_logit: coefficients(0.535, -0.694, 0.19, -0.181, -0.305, 0.371, 0.398, 0.079),
            latent_class: latent_class(
                0.7776,
                coefficients(0.27, -0.82, 0.12, -0.15, -0.23, 0.16, 0.24, 0.04),
                coefficients(0.15, 2.68, 0.0, -0.09, 0.06, 0.09, 0.05, 0.01),
            ),
        },
    }
}

fn italy_tables() -> CountryTables {
    CountryTables {
        mild: ModelSet {
            mixed_logit: coefficients(0.625, -0.238, -0.276, -0.176, -0.289, 0.185, 0.148, 0.039),
            latent_class: latent_class(
                0.7005,
                coefficients(0.42, -0.96, -0.18, -0.14, -0.24, 0.13, 0.18, 0.03),
                coefficients(0.1, 2.7, -0.24, -0.12, 0.07, -0.09, -0.18, 0.01),
            ),
        },
        severe: ModelSet {
            mixed_logit: coefficients(0.799, -0.463, 0.174, -0.178, -0.207, 0.305, 0.515, 0.045),
            latent_class: latent_class(
                0.7477,
                coefficients(0.44, -0.74, 0.17, -0.12, -0.23, 0.2, 0.36, 0.03),
                coefficients(0.34, 2.6, -0.06, -0.17, 0.09, -0.06, -0.02, 0.0),
            ),
        },
    }
}

fn france_tables() -> CountryTables {
    CountryTables {
        mild: ModelSet {
            mixed_logit: coefficients(0.899, 0.307, -0.16, -0.121, -0.124, 0.232, 0.264, 0.049),
            latent_class: latent_class(
                0.7169,
                coefficients(0.56, -0.68, -0.11, -0.16, -0.15, 0.12, 0.19, 0.03),
                coefficients(0.45, 2.75, -0.18, 0.07, 0.18, -0.01, -0.02, 0.01),
            ),
        },
        severe: ModelSet {
            mixed_logit: coefficients(0.884, 0.083, -0.019, -0.192, -0.247, 0.267, 0.398, 0.052),
            latent_class: latent_class(
                0.7504,
                coefficients(0.53, -0.57, 0.06, -0.12, -0.18, 0.15, 0.27, 0.04),
                coefficients(0.41, 2.4, -0.2, -0.1, -0.05, 0.11, 0.18, 0.0),
            ),
        },
    }
}

pub fn preference_model() -> PreferenceModel {
    PreferenceModel {
        countries: HashMap::from([
            (Country::Australia, australia_tables()),
            (Country::Italy, italy_tables()),
            (Country::France, france_tables()),
        ]),
    }
}

pub fn country_metadata() -> HashMap<Country, CountryMeta> {
    HashMap::from([
        (
            Country::Australia,
            CountryMeta {
                label: "Australia".to_string(),
                currency_code: "AUD".to_string(),
                currency_symbol: "A$".to_string(),
                value_per_qaly: 50_000.0,
                vsl: 7_000_000.0,
            },
        ),
        (
            Country::Italy,
            CountryMeta {
                label: "Italy".to_string(),
                currency_code: "EUR".to_string(),
                currency_symbol: "€".to_string(),
                value_per_qaly: 40_000.0,
                vsl: 5_000_000.0,
            },
        ),
        (
            Country::France,
            CountryMeta {
                label: "France".to_string(),
                currency_code: "EUR".to_string(),
                currency_symbol: "€".to_string(),
                value_per_qaly: 45_000.0,
                vsl: 5_500_000.0,
            },
        ),
    ])
}

pub fn epidemiology() -> EpidemiologyParameters {
    EpidemiologyParameters {
        population: 1_000_000.0,
        baseline_coverage: 0.75,
        max_coverage_gain: 0.2,
        vaccine_risk_reduction: 0.5,
        mild: OutcomeRates {
            attack_rate: 0.15,
            hospitalisation_rate: 0.015,
            icu_rate: 0.004,
            death_rate: 0.0015,
        },
        severe: OutcomeRates {
            attack_rate: 0.35,
            hospitalisation_rate: 0.03,
            icu_rate: 0.01,
            death_rate: 0.005,
        },
        qaly_loss: QalyLoss {
            hospitalisation: 0.05,
            icu: 0.2,
            death: 10.0,
        },
        illness_costs: IllnessCosts {
            medical_per_case: 300.0,
            medical_per_hospitalisation: 8_000.0,
            medical_per_icu: 25_000.0,
            productivity_per_case: 400.0,
        },
    }
}

pub fn cost_assumptions() -> CostAssumptions {
    CostAssumptions {
        policy_drafting: 200_000.0,
        communications: 1_000_000.0,
        it_systems: 1_200_000.0,
        enforcement: 1_500_000.0,
        exemption_processing: 500_000.0,
        vaccination_capacity: 600_000.0,
        dose_base_price: 15.0,
        dose_cold_chain: 4.0,
        dose_staffing: 6.0,
        dose_capital: 2.0,
        dose_overhead: 3.0,
        workforce_share_high_risk: 0.15,
        workforce_share_all_public: 0.65,
        working_age_share: 0.5,
        hr_time_per_worker: 30.0,
        paid_time_off_per_worker: 40.0,
        testing_per_worker: 25.0,
        attrition_rate_high_risk: 0.005,
        attrition_rate_all_public: 0.015,
        replacement_cost_per_worker: 20_000.0,
        trust_erosion: 500_000.0,
        protests: 400_000.0,
        unmet_care: 300_000.0,
    }
}

pub fn equity_weights() -> EquityWeights {
    EquityWeights {
        share_low: 0.45,
        share_mid: 0.35,
        share_high: 0.2,
        weight_low: 1.3,
        weight_mid: 1.0,
        weight_high: 0.7,
        concentration_scale: 0.2,
    }
}

pub fn model_config() -> ModelConfig {
    ModelConfig {
        countries: country_metadata(),
        preferences: preference_model(),
        epidemiology: epidemiology(),
        cost_assumptions: cost_assumptions(),
        equity: equity_weights(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutbreakSeverity;

    #[test]
    fn builtin_tables_cover_every_country_and_outbreak() {
        let model = preference_model();
        for country in Country::ALL {
            assert!(model.has_country(country));
            for outbreak in [OutbreakSeverity::Mild, OutbreakSeverity::Severe] {
                let set = model.models_for(country, outbreak);
                assert_eq!(set.latent_class.classes.len(), 2);
            }
        }
    }

    #[test]
    fn class_shares_sum_to_one() {
        let model = preference_model();
        for country in Country::ALL {
            for outbreak in [OutbreakSeverity::Mild, OutbreakSeverity::Severe] {
                let set = model.models_for(country, outbreak);
                assert!(
                    (set.latent_class.share_total() - 1.0).abs() < 1e-6,
                    "{country}/{outbreak} shares do not sum to one"
                );
            }
        }
    }

    #[test]
    fn australia_mild_mixed_logit_matches_published_values() {
        let model = preference_model();
        let set = model.models_for(Country::Australia, OutbreakSeverity::Mild);
        let mxl = &set.mixed_logit;
        assert_eq!(mxl.asc_mandate, 0.464);
        assert_eq!(mxl.asc_opt_out, -0.572);
        assert_eq!(mxl.lives_saved, 0.072);
        assert_eq!(mxl.coverage_effect(CoverageThreshold::Seventy), 0.171);
        assert_eq!(mxl.exemption_effect(ExemptionPolicy::MedicalReligiousPersonal), -0.267);
    }

    #[test]
    fn metadata_has_an_entry_per_country() {
        let meta = country_metadata();
        for country in Country::ALL {
            assert!(meta.contains_key(&country));
        }
        assert_eq!(meta[&Country::Australia].value_per_qaly, 50_000.0);
        assert_eq!(meta[&Country::France].vsl, 5_500_000.0);
    }
}
