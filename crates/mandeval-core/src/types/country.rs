use serde::{Deserialize, Serialize};

/// Country-level economic metadata: display label, currency, and the two
/// monetisation constants used by the evaluator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryMeta {
    pub label: String,
    pub currency_code: String,
    pub currency_symbol: String,
    /// Willingness-to-pay threshold per QALY gained.
    pub value_per_qaly: f64,
    /// Value of a statistical life.
    pub vsl: f64,
}
