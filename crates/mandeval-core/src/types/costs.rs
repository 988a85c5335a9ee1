use serde::{Deserialize, Serialize};

use super::policy::MandateScope;

/// Boolean gates for every cost line item. Defaults represent a typical
/// mandate costing; `none()` switches every gate off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostToggles {
    // Public-sector fixed items
    pub policy_drafting: bool,
    pub communications: bool,
    pub it_systems: bool,
    pub enforcement: bool,
    pub exemption_processing: bool,
    pub vaccination_capacity: bool,
    // Programme per-dose add-ons (any of these enables the base price)
    pub procurement: bool,
    pub cold_chain: bool,
    pub staffing: bool,
    pub capital: bool,
    pub overhead: bool,
    // Employer per-worker items
    pub hr_time: bool,
    pub paid_time_off: bool,
    pub testing: bool,
    // Workforce attrition
    pub attrition: bool,
    // Social / political items
    pub trust_erosion: bool,
    pub protests: bool,
    pub unmet_care: bool,
}

impl CostToggles {
    /// Every gate off: the zero-cost configuration.
    pub fn none() -> Self {
        Self {
            policy_drafting: false,
            communications: false,
            it_systems: false,
            enforcement: false,
            exemption_processing: false,
            vaccination_capacity: false,
            procurement: false,
            cold_chain: false,
            staffing: false,
            capital: false,
            overhead: false,
            hr_time: false,
            paid_time_off: false,
            testing: false,
            attrition: false,
            trust_erosion: false,
            protests: false,
            unmet_care: false,
        }
    }

    /// True if any programme per-dose item is enabled, which switches the
    /// base dose price on as well.
    pub fn any_programme_item(&self) -> bool {
        self.procurement || self.cold_chain || self.staffing || self.capital || self.overhead
    }
}

impl Default for CostToggles {
    fn default() -> Self {
        Self {
            policy_drafting: true,
            communications: true,
            it_systems: true,
            enforcement: true,
            exemption_processing: true,
            vaccination_capacity: true,
            procurement: true,
            cold_chain: true,
            staffing: true,
            capital: false,
            overhead: false,
            hr_time: true,
            paid_time_off: true,
            testing: false,
            attrition: false,
            trust_erosion: false,
            protests: false,
            unmet_care: false,
        }
    }
}

/// Fixed dollar amounts and rates behind the toggles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    // Public-sector fixed items
    pub policy_drafting: f64,
    pub communications: f64,
    pub it_systems: f64,
    pub enforcement: f64,
    pub exemption_processing: f64,
    pub vaccination_capacity: f64,
    // Per-dose unit cost accumulator
    pub dose_base_price: f64,
    pub dose_cold_chain: f64,
    pub dose_staffing: f64,
    pub dose_capital: f64,
    pub dose_overhead: f64,
    // Employer-side parameters
    pub workforce_share_high_risk: f64,
    pub workforce_share_all_public: f64,
    pub working_age_share: f64,
    pub hr_time_per_worker: f64,
    pub paid_time_off_per_worker: f64,
    pub testing_per_worker: f64,
    // Attrition
    pub attrition_rate_high_risk: f64,
    pub attrition_rate_all_public: f64,
    pub replacement_cost_per_worker: f64,
    // Social / political items
    pub trust_erosion: f64,
    pub protests: f64,
    pub unmet_care: f64,
}

impl CostAssumptions {
    pub fn workforce_share(&self, scope: MandateScope) -> f64 {
        match scope {
            MandateScope::HighRiskOccupations => self.workforce_share_high_risk,
            MandateScope::AllOccupationsAndPublicSpaces => self.workforce_share_all_public,
        }
    }

    pub fn attrition_rate(&self, scope: MandateScope) -> f64 {
        match scope {
            MandateScope::HighRiskOccupations => self.attrition_rate_high_risk,
            MandateScope::AllOccupationsAndPublicSpaces => self.attrition_rate_all_public,
        }
    }

    /// A copy with every monetary amount multiplied by `factor`. Shares
    /// and rates are left untouched; used by sensitivity analyses.
    pub fn with_unit_costs_scaled(&self, factor: f64) -> Self {
        Self {
            policy_drafting: self.policy_drafting * factor,
            communications: self.communications * factor,
            it_systems: self.it_systems * factor,
            enforcement: self.enforcement * factor,
            exemption_processing: self.exemption_processing * factor,
            vaccination_capacity: self.vaccination_capacity * factor,
            dose_base_price: self.dose_base_price * factor,
            dose_cold_chain: self.dose_cold_chain * factor,
            dose_staffing: self.dose_staffing * factor,
            dose_capital: self.dose_capital * factor,
            dose_overhead: self.dose_overhead * factor,
            workforce_share_high_risk: self.workforce_share_high_risk,
            workforce_share_all_public: self.workforce_share_all_public,
            working_age_share: self.working_age_share,
            hr_time_per_worker: self.hr_time_per_worker * factor,
            paid_time_off_per_worker: self.paid_time_off_per_worker * factor,
            testing_per_worker: self.testing_per_worker * factor,
            attrition_rate_high_risk: self.attrition_rate_high_risk,
            attrition_rate_all_public: self.attrition_rate_all_public,
            replacement_cost_per_worker: self.replacement_cost_per_worker * factor,
            trust_erosion: self.trust_erosion * factor,
            protests: self.protests * factor,
            unmet_care: self.unmet_care * factor,
        }
    }
}
