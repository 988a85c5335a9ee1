//! Model configuration loading and validation.
//!
//! The evaluator runs against a `ModelConfig`: country metadata, the DCE
//! preference tables, epidemiology parameters, cost assumptions, and
//! equity weights. The built-in tables cover the three study countries;
//! a JSON document can replace them at startup. A document that fails to
//! load or validate is fatal, so the pipeline never computes on partial
//! data.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::types::{
    CostAssumptions, Country, CountryMeta, EpidemiologyParameters, EquityWeights, PreferenceModel,
};

/// Tolerance for share sums (latent classes, equity strata).
pub const SHARE_TOLERANCE: f64 = 1e-6;

/// Errors raised while loading or validating a configuration document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// The process-wide constant inputs of the evaluator. Loaded once and
/// treated as immutable afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub countries: HashMap<Country, CountryMeta>,
    pub preferences: PreferenceModel,
    pub epidemiology: EpidemiologyParameters,
    pub cost_assumptions: CostAssumptions,
    pub equity: EquityWeights,
}

impl ModelConfig {
    /// The hand-authored built-in tables.
    pub fn builtin() -> Self {
        defaults::model_config()
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Country metadata for a selection, falling back to the default
    /// country key when absent.
    pub fn country_meta(&self, country: Country) -> &CountryMeta {
        self.countries
            .get(&country)
            .or_else(|| self.countries.get(&Country::DEFAULT))
            .expect("validated configuration always contains the default country")
    }

    /// Check structural invariants. Called automatically by the loaders;
    /// `builtin()` is covered by tests instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.countries.contains_key(&Country::DEFAULT) {
            return Err(ConfigError::Validation(format!(
                "country metadata must include the default country {}",
                Country::DEFAULT
            )));
        }
        if !self.preferences.has_country(Country::DEFAULT) {
            return Err(ConfigError::Validation(format!(
                "preference tables must include the default country {}",
                Country::DEFAULT
            )));
        }

        for (country, tables) in &self.preferences.countries {
            for (outbreak, set) in [("mild", &tables.mild), ("severe", &tables.severe)] {
                let classes = &set.latent_class.classes;
                if classes.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "latent-class model for {country}/{outbreak} has no classes"
                    )));
                }
                if classes.iter().any(|class| class.share < 0.0) {
                    return Err(ConfigError::Validation(format!(
                        "latent-class model for {country}/{outbreak} has a negative class share"
                    )));
                }
                let total = set.latent_class.share_total();
                if (total - 1.0).abs() > SHARE_TOLERANCE {
                    return Err(ConfigError::Validation(format!(
                        "latent-class shares for {country}/{outbreak} sum to {total}, expected 1"
                    )));
                }
            }
        }

        let epi = &self.epidemiology;
        if epi.population <= 0.0 {
            return Err(ConfigError::Validation("population must be positive".to_string()));
        }
        if !(0.0..=0.99).contains(&epi.baseline_coverage) {
            return Err(ConfigError::Validation(format!(
                "baseline coverage {} must lie in [0, 0.99]",
                epi.baseline_coverage
            )));
        }
        if epi.max_coverage_gain < 0.0 {
            return Err(ConfigError::Validation("max coverage gain must be non-negative".to_string()));
        }
        for (name, rates) in [("mild", &epi.mild), ("severe", &epi.severe)] {
            for (field, value) in [
                ("attack rate", rates.attack_rate),
                ("hospitalisation rate", rates.hospitalisation_rate),
                ("ICU rate", rates.icu_rate),
                ("death rate", rates.death_rate),
            ] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ConfigError::Validation(format!(
                        "{name} {field} {value} must lie in [0, 1]"
                    )));
                }
            }
        }
        if !(0.0..=1.0).contains(&epi.vaccine_risk_reduction) {
            return Err(ConfigError::Validation(format!(
                "vaccine risk reduction {} must lie in [0, 1]",
                epi.vaccine_risk_reduction
            )));
        }

        let equity_total = self.equity.share_total();
        if (equity_total - 1.0).abs() > SHARE_TOLERANCE {
            return Err(ConfigError::Validation(format!(
                "equity strata shares sum to {equity_total}, expected 1"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutbreakSeverity;

    #[test]
    fn builtin_configuration_validates() {
        ModelConfig::builtin().validate().expect("built-in tables are consistent");
    }

    #[test]
    fn json_round_trip_preserves_the_configuration() {
        let config = ModelConfig::builtin();
        let json = serde_json::to_string(&config).unwrap();
        let back = ModelConfig::from_json_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ModelConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ModelConfig::from_path("/nonexistent/mandeval.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn drifted_class_shares_fail_validation() {
        let mut config = ModelConfig::builtin();
        let tables = config
            .preferences
            .countries
            .get_mut(&Country::Australia)
            .unwrap();
        tables.mild.latent_class.classes[0].share += 0.01;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("latent-class shares"));
    }

    #[test]
    fn missing_default_country_fails_validation() {
        let mut config = ModelConfig::builtin();
        config.countries.remove(&Country::Australia);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default country"));
    }

    #[test]
    fn out_of_range_baseline_coverage_fails_validation() {
        let mut config = ModelConfig::builtin();
        config.epidemiology.baseline_coverage = 0.995;
        assert!(config.validate().is_err());
    }

    #[test]
    fn drifted_equity_shares_fail_validation() {
        let mut config = ModelConfig::builtin();
        config.equity.share_high = 0.25;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("equity"));
    }

    #[test]
    fn country_meta_falls_back_to_default_key() {
        let mut config = ModelConfig::builtin();
        config.countries.remove(&Country::Italy);
        let meta = config.country_meta(Country::Italy);
        assert_eq!(meta.label, "Australia");
    }

    #[test]
    fn preference_lookup_falls_back_to_default_country() {
        let mut config = ModelConfig::builtin();
        config.preferences.countries.remove(&Country::France);
        let set = config
            .preferences
            .models_for(Country::France, OutbreakSeverity::Mild);
        assert_eq!(set.mixed_logit.asc_mandate, 0.464);
    }
}
