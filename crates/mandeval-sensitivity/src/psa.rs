//! Probabilistic sensitivity analysis.
//!
//! Each draw samples independent multipliers for the perturbed parameter
//! groups, rebuilds the model constants, and reruns the whole
//! deterministic pipeline. Draws share nothing but the read-only base
//! configuration, so ordering is irrelevant.

use mandeval_core::types::{CostToggles, PolicyConfiguration};
use mandeval_core::ModelConfig;
use mandeval_evaluation::MandateEvaluator;
use rand::{distr::Distribution, rngs::StdRng, SeedableRng};
use rand_distr::Normal;

use crate::perturb::{apply_multipliers, ParameterMultipliers, MIN_MULTIPLIER};
use crate::types::{CeacPoint, PsaConfig, PsaResult, PsaSample, MAX_RUNS, MIN_RUNS, WTP_MULTIPLIERS};

struct MultiplierSampler {
    attack_rate: Normal<f64>,
    unit_costs: Normal<f64>,
    vsl: Normal<f64>,
    value_per_qaly: Normal<f64>,
}

impl MultiplierSampler {
    fn new(config: &PsaConfig) -> Result<Self, String> {
        let normal = |sd: f64, name: &str| {
            Normal::new(1.0, sd).map_err(|e| format!("invalid {name} standard deviation {sd}: {e}"))
        };
        Ok(Self {
            attack_rate: normal(config.attack_rate_sd, "attack-rate")?,
            unit_costs: normal(config.unit_cost_sd, "unit-cost")?,
            vsl: normal(config.vsl_sd, "VSL")?,
            value_per_qaly: normal(config.value_per_qaly_sd, "value-per-QALY")?,
        })
    }

    fn draw(&self, rng: &mut StdRng) -> ParameterMultipliers {
        ParameterMultipliers {
            attack_rate: self.attack_rate.sample(rng).max(MIN_MULTIPLIER),
            unit_costs: self.unit_costs.sample(rng).max(MIN_MULTIPLIER),
            vsl: self.vsl.sample(rng).max(MIN_MULTIPLIER),
            value_per_qaly: self.value_per_qaly.sample(rng).max(MIN_MULTIPLIER),
            ..ParameterMultipliers::IDENTITY
        }
    }
}

/// Run the Monte Carlo analysis for one scenario.
///
/// The CEAC is evaluated on the willingness-to-pay grid around the
/// (unperturbed) country threshold: each point is the fraction of draws
/// whose net monetary benefit at that threshold is positive.
pub fn run_psa(
    base: &ModelConfig,
    selection: &PolicyConfiguration,
    toggles: &CostToggles,
    config: &PsaConfig,
) -> Result<PsaResult, String> {
    let runs = config.runs.clamp(MIN_RUNS, MAX_RUNS);
    let sampler = MultiplierSampler::new(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut samples = Vec::with_capacity(runs);
    for _ in 0..runs {
        let multipliers = sampler.draw(&mut rng);
        let perturbed = apply_multipliers(base, &multipliers);
        let evaluator = MandateEvaluator::new(perturbed);
        let bundle = evaluator.evaluate(selection, toggles);
        samples.push(PsaSample {
            nmb: bundle.economics.nmb,
            total_costs: bundle.economics.total_costs,
            monetised_benefits: bundle.economics.monetised_benefits,
            qaly_gained: bundle.benefits.qaly_gained,
        });
    }

    let count = samples.len() as f64;
    let mean_nmb = samples.iter().map(|s| s.nmb).sum::<f64>() / count;
    let probability_positive_nmb =
        samples.iter().filter(|s| s.nmb > 0.0).count() as f64 / count;

    let base_threshold = base.country_meta(selection.country).value_per_qaly;
    let ceac = WTP_MULTIPLIERS
        .iter()
        .map(|multiplier| {
            let willingness_to_pay = base_threshold * multiplier;
            let cost_effective = samples
                .iter()
                .filter(|s| s.qaly_gained * willingness_to_pay - s.total_costs > 0.0)
                .count() as f64;
            CeacPoint {
                willingness_to_pay,
                probability_cost_effective: cost_effective / count,
            }
        })
        .collect();

    Ok(PsaResult {
        runs,
        mean_nmb,
        probability_positive_nmb,
        ceac,
        samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(config: PsaConfig) -> PsaResult {
        run_psa(
            &ModelConfig::builtin(),
            &PolicyConfiguration::default(),
            &CostToggles::default(),
            &config,
        )
        .expect("analysis runs")
    }

    #[test]
    fn a_fixed_seed_reproduces_the_analysis() {
        let config = PsaConfig::new().with_runs(250).with_seed(7);
        let first = run(config.clone());
        let second = run(config);
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_give_different_draws() {
        let first = run(PsaConfig::new().with_runs(250).with_seed(1));
        let second = run(PsaConfig::new().with_runs(250).with_seed(2));
        assert_ne!(first.samples, second.samples);
    }

    #[test]
    fn run_counts_are_clamped_to_the_documented_range() {
        assert_eq!(run(PsaConfig::new().with_runs(5)).runs, MIN_RUNS);
        assert_eq!(run(PsaConfig::new().with_runs(50_000)).runs, MAX_RUNS);
        let result = run(PsaConfig::new().with_runs(300));
        assert_eq!(result.runs, 300);
        assert_eq!(result.samples.len(), 300);
    }

    #[test]
    fn ceac_probabilities_are_valid_and_monotone() {
        let result = run(PsaConfig::new().with_runs(400).with_seed(11));
        assert_eq!(result.ceac.len(), WTP_MULTIPLIERS.len());
        let mut previous = 0.0;
        for point in &result.ceac {
            assert!((0.0..=1.0).contains(&point.probability_cost_effective));
            // QALY gains are non-negative, so acceptability cannot fall
            // as the threshold rises.
            assert!(point.probability_cost_effective + 1e-12 >= previous);
            previous = point.probability_cost_effective;
        }
    }

    #[test]
    fn zero_spread_collapses_to_the_deterministic_result() {
        let config = PsaConfig::new()
            .with_runs(200)
            .with_attack_rate_sd(0.0)
            .with_unit_cost_sd(0.0)
            .with_vsl_sd(0.0)
            .with_value_per_qaly_sd(0.0);
        let result = run(config);

        let evaluator = MandateEvaluator::new(ModelConfig::builtin());
        let bundle = evaluator.evaluate(&PolicyConfiguration::default(), &CostToggles::default());
        for sample in &result.samples {
            assert!((sample.nmb - bundle.economics.nmb).abs() < 1e-6);
        }
        assert!((result.mean_nmb - bundle.economics.nmb).abs() < 1e-6);
    }

    #[test]
    fn negative_spread_is_rejected() {
        let config = PsaConfig::new().with_vsl_sd(-0.5);
        let err = run_psa(
            &ModelConfig::builtin(),
            &PolicyConfiguration::default(),
            &CostToggles::default(),
            &config,
        )
        .unwrap_err();
        assert!(err.contains("VSL"));
    }
}
