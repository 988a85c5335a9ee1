//! One-way deterministic sensitivity analysis.
//!
//! Swings each parameter group down and up by a fixed fraction, rerunning
//! the pipeline at both ends while everything else stays at base values.

use mandeval_core::types::{CostToggles, PolicyConfiguration};
use mandeval_core::ModelConfig;
use mandeval_evaluation::MandateEvaluator;

use crate::perturb::{apply_multipliers, ParameterMultipliers};
use crate::types::{TornadoConfig, TornadoEntry, TornadoResult};

type Lever = fn(&mut ParameterMultipliers, f64);

// The outcome metric is the NMB, so the levers are the four parameter
// groups that enter it: the value of statistical life moves monetised
// benefits and NPV but not the NMB, and is left to the probabilistic
// analysis.
const LEVERS: [(&str, Lever); 4] = [
    ("Value per QALY", |m, f| m.value_per_qaly = f),
    ("Unit costs", |m, f| m.unit_costs = f),
    ("Attack rate", |m, f| m.attack_rate = f),
    ("Vaccine risk reduction", |m, f| m.risk_reduction = f),
];

fn nmb_with(
    base: &ModelConfig,
    selection: &PolicyConfiguration,
    toggles: &CostToggles,
    multipliers: &ParameterMultipliers,
) -> f64 {
    let evaluator = MandateEvaluator::new(apply_multipliers(base, multipliers));
    evaluator.evaluate(selection, toggles).economics.nmb
}

/// Run the one-way analysis for one scenario. Entries come back ordered
/// widest bar first, ready for a tornado chart.
pub fn run_tornado(
    base: &ModelConfig,
    selection: &PolicyConfiguration,
    toggles: &CostToggles,
    config: &TornadoConfig,
) -> TornadoResult {
    let base_nmb = nmb_with(base, selection, toggles, &ParameterMultipliers::IDENTITY);

    let mut entries: Vec<TornadoEntry> = LEVERS
        .iter()
        .map(|(parameter, lever)| {
            let mut low = ParameterMultipliers::IDENTITY;
            lever(&mut low, 1.0 - config.swing);
            let mut high = ParameterMultipliers::IDENTITY;
            lever(&mut high, 1.0 + config.swing);
            TornadoEntry {
                parameter: parameter.to_string(),
                nmb_low: nmb_with(base, selection, toggles, &low),
                nmb_high: nmb_with(base, selection, toggles, &high),
            }
        })
        .collect();

    entries.sort_by(|a, b| b.span().total_cmp(&a.span()));

    TornadoResult { base_nmb, entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> TornadoResult {
        run_tornado(
            &ModelConfig::builtin(),
            &PolicyConfiguration::default(),
            &CostToggles::default(),
            &TornadoConfig::default(),
        )
    }

    #[test]
    fn every_lever_produces_an_entry() {
        let result = result();
        assert_eq!(result.entries.len(), LEVERS.len());
        let mut parameters: Vec<&str> =
            result.entries.iter().map(|e| e.parameter.as_str()).collect();
        parameters.sort_unstable();
        assert_eq!(
            parameters,
            vec!["Attack rate", "Unit costs", "Vaccine risk reduction", "Value per QALY"]
        );
    }

    #[test]
    fn entries_are_ordered_widest_first() {
        let result = result();
        for window in result.entries.windows(2) {
            assert!(window[0].span() >= window[1].span());
        }
    }

    #[test]
    fn swinging_a_parameter_moves_the_nmb() {
        let result = result();
        for entry in &result.entries {
            assert!(entry.span() > 0.0, "{} did not move the NMB", entry.parameter);
        }
    }

    #[test]
    fn value_per_qaly_swings_in_the_expected_direction() {
        let result = result();
        let entry = result
            .entries
            .iter()
            .find(|e| e.parameter == "Value per QALY")
            .unwrap();
        // NMB rises with the willingness-to-pay threshold.
        assert!(entry.nmb_high > result.base_nmb);
        assert!(entry.nmb_low < result.base_nmb);
    }

    #[test]
    fn unit_costs_swing_against_the_nmb() {
        let result = result();
        let entry = result.entries.iter().find(|e| e.parameter == "Unit costs").unwrap();
        assert!(entry.nmb_high < result.base_nmb);
        assert!(entry.nmb_low > result.base_nmb);
    }

    #[test]
    fn zero_swing_collapses_onto_the_base_case() {
        let result = run_tornado(
            &ModelConfig::builtin(),
            &PolicyConfiguration::default(),
            &CostToggles::default(),
            &TornadoConfig::new().with_swing(0.0),
        );
        for entry in &result.entries {
            assert!((entry.nmb_low - result.base_nmb).abs() < 1e-6);
            assert!((entry.nmb_high - result.base_nmb).abs() < 1e-6);
        }
    }
}
