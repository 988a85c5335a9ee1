//! Configuration and result types for the sensitivity analyses.

use serde::{Deserialize, Serialize};

/// Fewest Monte Carlo draws accepted; requests below are clamped up.
pub const MIN_RUNS: usize = 200;
/// Most Monte Carlo draws accepted; requests above are clamped down.
pub const MAX_RUNS: usize = 3000;

/// Willingness-to-pay grid for the CEAC, as multiples of the country
/// threshold.
pub const WTP_MULTIPLIERS: [f64; 5] = [0.5, 0.75, 1.0, 1.25, 1.5];

/// Configuration for the probabilistic sensitivity analysis.
///
/// Each draw samples independent normal multipliers (mean 1) for the
/// perturbed parameter groups and reruns the full deterministic pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PsaConfig {
    /// Number of pipeline reruns; clamped to `[MIN_RUNS, MAX_RUNS]`.
    pub runs: usize,

    /// RNG seed; a fixed seed reproduces the analysis exactly.
    pub seed: u64,

    /// Standard deviation of the attack-rate multiplier.
    pub attack_rate_sd: f64,

    /// Standard deviation of the unit-cost multiplier.
    pub unit_cost_sd: f64,

    /// Standard deviation of the value-of-statistical-life multiplier.
    pub vsl_sd: f64,

    /// Standard deviation of the value-per-QALY multiplier.
    pub value_per_qaly_sd: f64,
}

impl Default for PsaConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            seed: 42,
            attack_rate_sd: 0.2,
            unit_cost_sd: 0.2,
            vsl_sd: 0.15,
            value_per_qaly_sd: 0.15,
        }
    }
}

impl PsaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_attack_rate_sd(mut self, sd: f64) -> Self {
        self.attack_rate_sd = sd;
        self
    }

    pub fn with_unit_cost_sd(mut self, sd: f64) -> Self {
        self.unit_cost_sd = sd;
        self
    }

    pub fn with_vsl_sd(mut self, sd: f64) -> Self {
        self.vsl_sd = sd;
        self
    }

    pub fn with_value_per_qaly_sd(mut self, sd: f64) -> Self {
        self.value_per_qaly_sd = sd;
        self
    }
}

/// One Monte Carlo draw: the headline figures of a full pipeline rerun.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsaSample {
    pub nmb: f64,
    pub total_costs: f64,
    pub monetised_benefits: f64,
    pub qaly_gained: f64,
}

/// One point on the cost-effectiveness acceptability curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CeacPoint {
    pub willingness_to_pay: f64,
    pub probability_cost_effective: f64,
}

/// Result of a probabilistic sensitivity analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PsaResult {
    /// Draws actually executed (after clamping).
    pub runs: usize,
    pub mean_nmb: f64,
    pub probability_positive_nmb: f64,
    pub ceac: Vec<CeacPoint>,
    pub samples: Vec<PsaSample>,
}

/// Configuration for the one-way deterministic sensitivity analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TornadoConfig {
    /// Fractional swing applied to each parameter in turn (0.25 means
    /// plus and minus 25 percent).
    pub swing: f64,
}

impl Default for TornadoConfig {
    fn default() -> Self {
        Self { swing: 0.25 }
    }
}

impl TornadoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_swing(mut self, swing: f64) -> Self {
        self.swing = swing;
        self
    }
}

/// NMB response to swinging one parameter while holding the rest fixed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TornadoEntry {
    pub parameter: String,
    pub nmb_low: f64,
    pub nmb_high: f64,
}

impl TornadoEntry {
    /// Width of the bar: how far the two ends lie apart.
    pub fn span(&self) -> f64 {
        (self.nmb_high - self.nmb_low).abs()
    }
}

/// One-way sensitivity result, entries ordered widest bar first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TornadoResult {
    pub base_nmb: f64,
    pub entries: Vec<TornadoEntry>,
}
