use mandeval_core::types::{CostToggles, Country, PolicyConfiguration};
use mandeval_core::ModelConfig;
use serde::{Deserialize, Serialize};

use crate::benefits::{compute_benefits, BenefitBundle};
use crate::costs::{compute_costs, CostBundle};
use crate::economics::{compute_economics, EconomicEvaluation};
use crate::equity::{compute_equity, EquityResult};
use crate::uptake::{compute_uptake, three_alternative_uptake, ThreeWayUptake, UptakeResult};
use crate::utility::compute_utility;

/// Everything one evaluation cycle produces. Rebuilt from scratch on
/// every call; nothing is cached or updated incrementally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub uptake: UptakeResult,
    pub benefits: BenefitBundle,
    pub costs: CostBundle,
    pub economics: EconomicEvaluation,
    pub equity: EquityResult,
}

/// Utilities and choice shares for two mandate designs against opt-out.
/// Mandate B is the zero-utility numeraire, so both utilities are
/// expressed relative to it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignComparison {
    pub utility_mandate_a: f64,
    pub utility_mandate_b: f64,
    pub utility_opt_out: f64,
    pub shares: ThreeWayUptake,
}

/// The evaluation engine: immutable model constants plus pure evaluation
/// methods. The presentation layer owns the mutable selections and asks
/// for a fresh bundle on every change.
#[derive(Clone, Debug)]
pub struct MandateEvaluator {
    config: ModelConfig,
}

impl MandateEvaluator {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run the full pipeline for one selection: utility, uptake,
    /// benefits, costs, economics, equity.
    pub fn evaluate(&self, selection: &PolicyConfiguration, toggles: &CostToggles) -> ResultBundle {
        let models = self
            .config
            .preferences
            .models_for(selection.country, selection.outbreak);
        let meta = self.config.country_meta(selection.country);

        let uptake = compute_uptake(models, selection);
        let benefits = compute_benefits(&uptake, &self.config.epidemiology, selection.outbreak, meta);
        let costs = compute_costs(
            &benefits,
            toggles,
            &self.config.cost_assumptions,
            selection.scope,
            self.config.epidemiology.population,
        );
        let economics = compute_economics(&benefits, &costs, meta);
        let equity = compute_equity(&benefits, &economics, &self.config.equity, meta.value_per_qaly);

        ResultBundle {
            uptake,
            benefits,
            costs,
            economics,
            equity,
        }
    }

    /// Evaluate the same selection across every country with built
    /// tables, for cross-country comparison views.
    pub fn evaluate_all_countries(
        &self,
        selection: &PolicyConfiguration,
        toggles: &CostToggles,
    ) -> Vec<(Country, ResultBundle)> {
        Country::ALL
            .into_iter()
            .map(|country| {
                let mut per_country = selection.clone();
                per_country.country = country;
                (country, self.evaluate(&per_country, toggles))
            })
            .collect()
    }

    /// Compare two mandate designs under design A's preference model,
    /// with design B as the zero-utility numeraire of a three-way
    /// multinomial logit.
    pub fn compare_designs(
        &self,
        design_a: &PolicyConfiguration,
        design_b: &PolicyConfiguration,
    ) -> DesignComparison {
        let models = self
            .config
            .preferences
            .models_for(design_a.country, design_a.outbreak);
        let utility_a = compute_utility(&models.mixed_logit, design_a);
        let utility_b = compute_utility(&models.mixed_logit, design_b);

        let relative_a = utility_a.mandate - utility_b.mandate;
        let relative_opt_out = utility_a.opt_out - utility_b.mandate;
        let shares = three_alternative_uptake(relative_a, relative_opt_out);

        DesignComparison {
            utility_mandate_a: relative_a,
            utility_mandate_b: 0.0,
            utility_opt_out: relative_opt_out,
            shares,
        }
    }
}

/// An immutable snapshot of a selection and the bundle it produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedScenario {
    pub label: String,
    pub selection: PolicyConfiguration,
    pub toggles: CostToggles,
    pub results: ResultBundle,
}

/// Append-only list of saved scenarios. Snapshots are never mutated
/// after creation; re-evaluating a stored selection reproduces its
/// bundle exactly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioLog {
    scenarios: Vec<SavedScenario>,
}

impl ScenarioLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(
        &mut self,
        label: impl Into<String>,
        selection: &PolicyConfiguration,
        toggles: &CostToggles,
        results: &ResultBundle,
    ) -> &SavedScenario {
        self.scenarios.push(SavedScenario {
            label: label.into(),
            selection: selection.clone(),
            toggles: *toggles,
            results: results.clone(),
        });
        self.scenarios.last().expect("push succeeded")
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedScenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandeval_core::types::{MandateScope, OutbreakSeverity};

    fn evaluator() -> MandateEvaluator {
        MandateEvaluator::new(ModelConfig::builtin())
    }

    #[test]
    fn evaluation_is_deterministic() {
        let evaluator = evaluator();
        let selection = PolicyConfiguration::default();
        let toggles = CostToggles::default();
        let first = evaluator.evaluate(&selection, &toggles);
        let second = evaluator.evaluate(&selection, &toggles);
        assert_eq!(first, second);
    }

    #[test]
    fn cross_country_evaluation_covers_every_table() {
        let evaluator = evaluator();
        let results = evaluator
            .evaluate_all_countries(&PolicyConfiguration::default(), &CostToggles::default());
        assert_eq!(results.len(), Country::ALL.len());
        for (country, bundle) in &results {
            assert!((0.0..=1.0).contains(&bundle.uptake.composite), "{country} out of range");
        }
    }

    #[test]
    fn design_comparison_shares_sum_to_one() {
        let evaluator = evaluator();
        let design_a = PolicyConfiguration::default();
        let design_b = PolicyConfiguration {
            scope: MandateScope::AllOccupationsAndPublicSpaces,
            outbreak: OutbreakSeverity::Mild,
            ..PolicyConfiguration::default()
        };
        let comparison = evaluator.compare_designs(&design_a, &design_b);
        let total =
            comparison.shares.mandate_a + comparison.shares.mandate_b + comparison.shares.opt_out;
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(comparison.utility_mandate_b, 0.0);
    }

    #[test]
    fn identical_designs_split_mandate_share_evenly() {
        let evaluator = evaluator();
        let design = PolicyConfiguration::default();
        let comparison = evaluator.compare_designs(&design, &design);
        assert_eq!(comparison.utility_mandate_a, 0.0);
        assert!((comparison.shares.mandate_a - comparison.shares.mandate_b).abs() < 1e-12);
    }

    #[test]
    fn scenario_log_round_trips_saved_selections() {
        let evaluator = evaluator();
        let mut log = ScenarioLog::new();
        let selection = PolicyConfiguration {
            country: Country::Italy,
            outbreak: OutbreakSeverity::Severe,
            ..PolicyConfiguration::default()
        };
        let toggles = CostToggles::default();
        let bundle = evaluator.evaluate(&selection, &toggles);
        log.save("severe Italy", &selection, &toggles, &bundle);

        assert_eq!(log.len(), 1);
        let saved = log.iter().next().unwrap();
        let recomputed = evaluator.evaluate(&saved.selection, &saved.toggles);
        assert_eq!(recomputed, saved.results);
    }

    #[test]
    fn scenario_log_is_append_only_in_order() {
        let evaluator = evaluator();
        let mut log = ScenarioLog::new();
        let toggles = CostToggles::default();
        for (label, country) in [("first", Country::Australia), ("second", Country::France)] {
            let selection = PolicyConfiguration {
                country,
                ..PolicyConfiguration::default()
            };
            let bundle = evaluator.evaluate(&selection, &toggles);
            log.save(label, &selection, &toggles, &bundle);
        }
        let labels: Vec<&str> = log.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["first", "second"]);
    }
}
