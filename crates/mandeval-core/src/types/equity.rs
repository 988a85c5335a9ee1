use serde::{Deserialize, Serialize};

/// Fixed socioeconomic strata shares and welfare weights used to
/// redistribute QALY gains. Shares must sum to one (validated at load).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquityWeights {
    pub share_low: f64,
    pub share_mid: f64,
    pub share_high: f64,
    pub weight_low: f64,
    pub weight_mid: f64,
    pub weight_high: f64,
    /// Scale constant for the concentration-index proxy. The proxy is a
    /// linear function of the share parameters, not a Lorenz-curve
    /// concentration index.
    pub concentration_scale: f64,
}

impl EquityWeights {
    pub fn share_total(&self) -> f64 {
        self.share_low + self.share_mid + self.share_high
    }
}
