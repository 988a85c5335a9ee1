pub mod costs;
pub mod country;
pub mod epidemiology;
pub mod equity;
pub mod policy;
pub mod preferences;

pub use costs::{CostAssumptions, CostToggles};
pub use country::CountryMeta;
pub use epidemiology::{EpidemiologyParameters, IllnessCosts, OutcomeRates, QalyLoss};
pub use equity::EquityWeights;
pub use policy::{
    Country, CoverageThreshold, ExemptionPolicy, MandateIntensity, MandateScope, OutbreakSeverity,
    PolicyConfiguration, PopulationSegment,
};
pub use preferences::{
    ChoiceCoefficients, CountryTables, LatentClassModel, ModelSet, PreferenceClass, PreferenceModel,
};
