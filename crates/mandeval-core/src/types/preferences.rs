use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::policy::{Country, CoverageThreshold, ExemptionPolicy, OutbreakSeverity};

/// Utility coefficients for one choice model. Alternative-specific
/// constants plus per-attribute effects; attribute levels absent from a
/// lookup are reference levels and contribute zero utility.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceCoefficients {
    pub asc_mandate: f64,
    pub asc_opt_out: f64,
    /// Effect of extending scope to all occupations and public spaces
    /// (high-risk-only is the reference).
    pub scope_all_public: f64,
    #[serde(default)]
    pub exemptions: HashMap<ExemptionPolicy, f64>,
    #[serde(default)]
    pub coverage: HashMap<CoverageThreshold, f64>,
    /// Slope per expected life saved per 100,000 (continuous, linear).
    pub lives_saved: f64,
    /// Optional effects for mandate intensity levels, keyed by level id.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub intensity: HashMap<String, f64>,
}

impl ChoiceCoefficients {
    pub fn exemption_effect(&self, tier: ExemptionPolicy) -> f64 {
        self.exemptions.get(&tier).copied().unwrap_or(0.0)
    }

    pub fn coverage_effect(&self, threshold: CoverageThreshold) -> f64 {
        self.coverage.get(&threshold).copied().unwrap_or(0.0)
    }

    pub fn intensity_effect(&self, level: &str) -> f64 {
        self.intensity.get(level).copied().unwrap_or(0.0)
    }
}

/// One latent preference class: a name, a population share, and its own
/// coefficient set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreferenceClass {
    pub id: String,
    pub share: f64,
    pub coefficients: ChoiceCoefficients,
}

/// A latent-class choice model. Class shares must sum to one; this is
/// enforced when a configuration is validated, not here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatentClassModel {
    pub classes: Vec<PreferenceClass>,
}

impl LatentClassModel {
    pub fn class(&self, id: &str) -> Option<&PreferenceClass> {
        self.classes.iter().find(|class| class.id == id)
    }

    pub fn share_total(&self) -> f64 {
        self.classes.iter().map(|class| class.share).sum()
    }
}

/// The estimated models for one (country, outbreak) cell: mixed-logit
/// mean coefficients plus the latent-class decomposition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSet {
    pub mixed_logit: ChoiceCoefficients,
    pub latent_class: LatentClassModel,
}

/// Per-country model tables for both outbreak vignettes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryTables {
    pub mild: ModelSet,
    pub severe: ModelSet,
}

impl CountryTables {
    pub fn for_outbreak(&self, outbreak: OutbreakSeverity) -> &ModelSet {
        match outbreak {
            OutbreakSeverity::Mild => &self.mild,
            OutbreakSeverity::Severe => &self.severe,
        }
    }
}

/// The immutable country -> outbreak -> coefficients mapping. Loaded once
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreferenceModel {
    pub countries: HashMap<Country, CountryTables>,
}

impl PreferenceModel {
    /// Look up the model set for a selection. A country without tables
    /// falls back to the default country key; validation guarantees the
    /// default key is present.
    pub fn models_for(&self, country: Country, outbreak: OutbreakSeverity) -> &ModelSet {
        let tables = self
            .countries
            .get(&country)
            .or_else(|| self.countries.get(&Country::DEFAULT))
            .expect("validated configuration always contains the default country");
        tables.for_outbreak(outbreak)
    }

    pub fn has_country(&self, country: Country) -> bool {
        self.countries.contains_key(&country)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coefficients() -> ChoiceCoefficients {
        ChoiceCoefficients {
            asc_mandate: 0.5,
            asc_opt_out: -0.5,
            scope_all_public: -0.3,
            exemptions: HashMap::from([(ExemptionPolicy::MedicalReligious, -0.15)]),
            coverage: HashMap::from([(CoverageThreshold::Seventy, 0.2)]),
            lives_saved: 0.05,
            intensity: HashMap::from([("strict".to_string(), -0.1)]),
        }
    }

    #[test]
    fn missing_lookup_keys_default_to_zero() {
        let coeffs = coefficients();
        assert_eq!(coeffs.exemption_effect(ExemptionPolicy::MedicalOnly), 0.0);
        assert_eq!(coeffs.exemption_effect(ExemptionPolicy::MedicalReligious), -0.15);
        assert_eq!(coeffs.coverage_effect(CoverageThreshold::Fifty), 0.0);
        assert_eq!(coeffs.coverage_effect(CoverageThreshold::Eighty), 0.0);
        assert_eq!(coeffs.coverage_effect(CoverageThreshold::Seventy), 0.2);
        assert_eq!(coeffs.intensity_effect("lenient"), 0.0);
        assert_eq!(coeffs.intensity_effect("strict"), -0.1);
    }

    #[test]
    fn coefficient_maps_serialize_with_string_keys() {
        let coeffs = coefficients();
        let json = serde_json::to_value(&coeffs).unwrap();
        assert_eq!(json["exemptions"]["med_religious"], -0.15);
        assert_eq!(json["coverage"]["70"], 0.2);

        let back: ChoiceCoefficients = serde_json::from_value(json).unwrap();
        assert_eq!(back, coeffs);
    }

    #[test]
    fn latent_class_lookup_by_id() {
        let model = LatentClassModel {
            classes: vec![
                PreferenceClass {
                    id: "supporters".to_string(),
                    share: 0.75,
                    coefficients: coefficients(),
                },
                PreferenceClass {
                    id: "resisters".to_string(),
                    share: 0.25,
                    coefficients: coefficients(),
                },
            ],
        };
        assert!(model.class("supporters").is_some());
        assert!(model.class("undecided").is_none());
        assert!((model.share_total() - 1.0).abs() < 1e-12);
    }
}
