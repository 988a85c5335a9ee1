//! Sensitivity analyses for the MandEval decision aid.
//!
//! The probabilistic analysis resamples a small set of parameters and
//! reruns the deterministic pipeline per draw; the one-way analysis
//! swings each parameter group in turn. Both work on a cloned copy of
//! the model constants and leave the base configuration untouched.

pub mod perturb;
pub mod psa;
pub mod tornado;
pub mod types;

pub use perturb::{apply_multipliers, ParameterMultipliers, MIN_MULTIPLIER};
pub use psa::run_psa;
pub use tornado::run_tornado;
pub use types::{
    CeacPoint, PsaConfig, PsaResult, PsaSample, TornadoConfig, TornadoEntry, TornadoResult,
    MAX_RUNS, MIN_RUNS, WTP_MULTIPLIERS,
};
