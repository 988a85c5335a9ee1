use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Countries with estimated preference tables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "AUS")]
    Australia,
    #[serde(rename = "ITA")]
    Italy,
    #[serde(rename = "FRA")]
    France,
}

impl Country {
    /// All countries covered by the built-in tables, in display order.
    pub const ALL: [Country; 3] = [Country::Australia, Country::Italy, Country::France];

    /// Fallback key used when a configuration lacks a table for the
    /// selected country.
    pub const DEFAULT: Country = Country::Australia;

    pub fn code(&self) -> &'static str {
        match self {
            Country::Australia => "AUS",
            Country::Italy => "ITA",
            Country::France => "FRA",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AUS" | "AU" | "AUSTRALIA" => Ok(Country::Australia),
            "ITA" | "IT" | "ITALY" => Ok(Country::Italy),
            "FRA" | "FR" | "FRANCE" => Ok(Country::France),
            other => Err(format!("unknown country '{other}' (expected AUS, ITA, or FRA)")),
        }
    }
}

/// Outbreak vignette under which preferences were elicited
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutbreakSeverity {
    #[serde(rename = "mild")]
    Mild,
    #[serde(rename = "severe")]
    Severe,
}

impl fmt::Display for OutbreakSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutbreakSeverity::Mild => write!(f, "mild"),
            OutbreakSeverity::Severe => write!(f, "severe"),
        }
    }
}

impl FromStr for OutbreakSeverity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mild" => Ok(OutbreakSeverity::Mild),
            "severe" => Ok(OutbreakSeverity::Severe),
            other => Err(format!("unknown outbreak severity '{other}' (expected mild or severe)")),
        }
    }
}

/// Who the mandate applies to. High-risk occupations are the reference
/// level in the choice models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MandateScope {
    #[serde(rename = "high_risk")]
    HighRiskOccupations,
    #[serde(rename = "all_public")]
    AllOccupationsAndPublicSpaces,
}

impl fmt::Display for MandateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MandateScope::HighRiskOccupations => write!(f, "high_risk"),
            MandateScope::AllOccupationsAndPublicSpaces => write!(f, "all_public"),
        }
    }
}

impl FromStr for MandateScope {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high_risk" => Ok(MandateScope::HighRiskOccupations),
            "all_public" => Ok(MandateScope::AllOccupationsAndPublicSpaces),
            other => Err(format!("unknown mandate scope '{other}' (expected high_risk or all_public)")),
        }
    }
}

/// Exemption tiers, ordered from strictest to most permissive.
/// Medical-only is the reference level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExemptionPolicy {
    #[serde(rename = "med_only")]
    MedicalOnly,
    #[serde(rename = "med_religious")]
    MedicalReligious,
    #[serde(rename = "med_religious_personal")]
    MedicalReligiousPersonal,
}

impl fmt::Display for ExemptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExemptionPolicy::MedicalOnly => write!(f, "med_only"),
            ExemptionPolicy::MedicalReligious => write!(f, "med_religious"),
            ExemptionPolicy::MedicalReligiousPersonal => write!(f, "med_religious_personal"),
        }
    }
}

impl FromStr for ExemptionPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "med_only" => Ok(ExemptionPolicy::MedicalOnly),
            "med_religious" => Ok(ExemptionPolicy::MedicalReligious),
            "med_religious_personal" => Ok(ExemptionPolicy::MedicalReligiousPersonal),
            other => Err(format!(
                "unknown exemption policy '{other}' (expected med_only, med_religious, or med_religious_personal)"
            )),
        }
    }
}

/// Coverage threshold at which the mandate lifts, in percent of the
/// population vaccinated. The lowest tier is the reference level; tiers
/// without a coefficient in the loaded tables contribute zero utility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CoverageThreshold {
    #[serde(rename = "50")]
    Fifty,
    #[serde(rename = "70")]
    Seventy,
    #[serde(rename = "80")]
    Eighty,
    #[serde(rename = "90")]
    Ninety,
}

impl CoverageThreshold {
    pub fn percent(&self) -> u32 {
        match self {
            CoverageThreshold::Fifty => 50,
            CoverageThreshold::Seventy => 70,
            CoverageThreshold::Eighty => 80,
            CoverageThreshold::Ninety => 90,
        }
    }
}

impl fmt::Display for CoverageThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percent())
    }
}

impl FromStr for CoverageThreshold {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "50" => Ok(CoverageThreshold::Fifty),
            "70" => Ok(CoverageThreshold::Seventy),
            "80" => Ok(CoverageThreshold::Eighty),
            "90" => Ok(CoverageThreshold::Ninety),
            other => Err(format!("unknown coverage threshold '{other}' (expected 50, 70, 80, or 90)")),
        }
    }
}

/// Population segment used for subgroup views of predicted uptake
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PopulationSegment {
    #[default]
    #[serde(rename = "full")]
    FullSample,
    #[serde(rename = "supporters")]
    Supporters,
    #[serde(rename = "resisters")]
    Resisters,
}

impl fmt::Display for PopulationSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulationSegment::FullSample => write!(f, "full"),
            PopulationSegment::Supporters => write!(f, "supporters"),
            PopulationSegment::Resisters => write!(f, "resisters"),
        }
    }
}

impl FromStr for PopulationSegment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(PopulationSegment::FullSample),
            "supporters" => Ok(PopulationSegment::Supporters),
            "resisters" => Ok(PopulationSegment::Resisters),
            other => Err(format!("unknown segment '{other}' (expected full, supporters, or resisters)")),
        }
    }
}

/// Optional mandate intensity sub-attributes. Each level key is resolved
/// against the model's intensity lookup; unknown levels contribute zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MandateIntensity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mandate_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforcement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incentives: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testing: Option<String>,
}

impl MandateIntensity {
    /// Level keys that are set, in attribute order.
    pub fn levels(&self) -> impl Iterator<Item = &str> {
        [
            self.mandate_type.as_deref(),
            self.enforcement.as_deref(),
            self.incentives.as_deref(),
            self.testing.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Current policy selections. One instance per evaluation; mutated by the
/// input surface and read by the pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfiguration {
    #[serde(default = "default_country")]
    pub country: Country,
    #[serde(default = "default_outbreak")]
    pub outbreak: OutbreakSeverity,
    #[serde(default)]
    pub segment: PopulationSegment,
    #[serde(default = "default_scope")]
    pub scope: MandateScope,
    #[serde(default = "default_exemptions")]
    pub exemptions: ExemptionPolicy,
    #[serde(default = "default_coverage")]
    pub coverage: CoverageThreshold,
    /// Expected lives saved per 100,000 population. Bounded by the input
    /// control, not by the utility mapper.
    #[serde(default = "default_lives_saved")]
    pub lives_saved: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<MandateIntensity>,
}

fn default_country() -> Country {
    Country::Australia
}

fn default_outbreak() -> OutbreakSeverity {
    OutbreakSeverity::Mild
}

fn default_scope() -> MandateScope {
    MandateScope::HighRiskOccupations
}

fn default_exemptions() -> ExemptionPolicy {
    ExemptionPolicy::MedicalOnly
}

fn default_coverage() -> CoverageThreshold {
    CoverageThreshold::Fifty
}

fn default_lives_saved() -> f64 {
    25.0
}

impl Default for PolicyConfiguration {
    fn default() -> Self {
        Self {
            country: default_country(),
            outbreak: default_outbreak(),
            segment: PopulationSegment::default(),
            scope: default_scope(),
            exemptions: default_exemptions(),
            coverage: default_coverage(),
            lives_saved: default_lives_saved(),
            intensity: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_round_trips_through_str() {
        for country in Country::ALL {
            assert_eq!(country.code().parse::<Country>().unwrap(), country);
        }
        assert!("DEU".parse::<Country>().is_err());
    }

    #[test]
    fn coverage_threshold_parses_all_tiers() {
        for (raw, percent) in [("50", 50), ("70", 70), ("80", 80), ("90", 90)] {
            assert_eq!(raw.parse::<CoverageThreshold>().unwrap().percent(), percent);
        }
    }

    #[test]
    fn default_configuration_matches_initial_selections() {
        let config = PolicyConfiguration::default();
        assert_eq!(config.country, Country::Australia);
        assert_eq!(config.outbreak, OutbreakSeverity::Mild);
        assert_eq!(config.scope, MandateScope::HighRiskOccupations);
        assert_eq!(config.exemptions, ExemptionPolicy::MedicalOnly);
        assert_eq!(config.coverage, CoverageThreshold::Fifty);
        assert_eq!(config.lives_saved, 25.0);
        assert!(config.intensity.is_none());
    }

    #[test]
    fn configuration_serde_uses_ui_domains() {
        let config = PolicyConfiguration {
            country: Country::France,
            outbreak: OutbreakSeverity::Severe,
            scope: MandateScope::AllOccupationsAndPublicSpaces,
            exemptions: ExemptionPolicy::MedicalReligious,
            coverage: CoverageThreshold::Ninety,
            ..PolicyConfiguration::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["country"], "FRA");
        assert_eq!(json["outbreak"], "severe");
        assert_eq!(json["scope"], "all_public");
        assert_eq!(json["exemptions"], "med_religious");
        assert_eq!(json["coverage"], "90");

        let back: PolicyConfiguration = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn intensity_levels_skip_unset_attributes() {
        let intensity = MandateIntensity {
            mandate_type: Some("proof_required".to_string()),
            testing: Some("weekly".to_string()),
            ..MandateIntensity::default()
        };
        let levels: Vec<&str> = intensity.levels().collect();
        assert_eq!(levels, vec!["proof_required", "weekly"]);
    }
}
