//! Core data model for the MandEval vaccine-mandate decision aid.
//!
//! Holds the typed policy-selection surface, the immutable discrete
//! choice experiment coefficient tables, and the epidemiology, costing,
//! and equity constants, together with configuration loading and
//! validation. The evaluation pipeline lives in `mandeval-evaluation`.

pub mod config;
pub mod defaults;
pub mod types;

pub use config::{ConfigError, ModelConfig, SHARE_TOLERANCE};
pub use types::{
    ChoiceCoefficients, CostAssumptions, CostToggles, Country, CountryMeta, CountryTables,
    CoverageThreshold, EpidemiologyParameters, EquityWeights, ExemptionPolicy, IllnessCosts,
    LatentClassModel, MandateIntensity, MandateScope, ModelSet, OutbreakSeverity, OutcomeRates,
    PolicyConfiguration, PopulationSegment, PreferenceClass, PreferenceModel, QalyLoss,
};
