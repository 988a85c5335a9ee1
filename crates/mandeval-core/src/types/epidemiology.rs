use serde::{Deserialize, Serialize};

use super::policy::OutbreakSeverity;

/// Outcome rates for one outbreak severity preset. Attack rate applies to
/// the whole population; the remaining rates apply per case.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRates {
    pub attack_rate: f64,
    pub hospitalisation_rate: f64,
    pub icu_rate: f64,
    pub death_rate: f64,
}

/// QALY losses per averted event, used to convert counts into QALYs
/// gained.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QalyLoss {
    pub hospitalisation: f64,
    pub icu: f64,
    pub death: f64,
}

/// Unit costs of illness avoided per averted event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct IllnessCosts {
    pub medical_per_case: f64,
    pub medical_per_hospitalisation: f64,
    pub medical_per_icu: f64,
    pub productivity_per_case: f64,
}

/// Static cross-sectional epidemiology parameters. This is a
/// multiplicative scaling model, not a time-stepped epidemic model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EpidemiologyParameters {
    pub population: f64,
    pub baseline_coverage: f64,
    /// Maximum coverage gain in percentage points, reached as predicted
    /// uptake approaches 1.
    pub max_coverage_gain: f64,
    /// Infection risk reduction per newly vaccinated person.
    pub vaccine_risk_reduction: f64,
    pub mild: OutcomeRates,
    pub severe: OutcomeRates,
    pub qaly_loss: QalyLoss,
    pub illness_costs: IllnessCosts,
}

impl EpidemiologyParameters {
    pub fn rates_for(&self, outbreak: OutbreakSeverity) -> &OutcomeRates {
        match outbreak {
            OutbreakSeverity::Mild => &self.mild,
            OutbreakSeverity::Severe => &self.severe,
        }
    }
}
