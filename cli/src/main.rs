mod brief;
mod format;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mandeval_core::types::{
    CostToggles, Country, CoverageThreshold, ExemptionPolicy, MandateScope, OutbreakSeverity,
    PolicyConfiguration, PopulationSegment,
};
use mandeval_core::{ConfigError, ModelConfig};
use mandeval_evaluation::{MandateEvaluator, ResultBundle, ScenarioLog};
use mandeval_sensitivity::{run_psa, run_tornado, PsaConfig, TornadoConfig};

use brief::BriefContext;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sensitivity analysis failed: {0}")]
    Analysis(String),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "mandeval",
    about = "Decision aid for vaccine-mandate policy: predicted uptake, health benefits, costs, and equity",
    version
)]
struct Cli {
    /// Model configuration JSON; the built-in tables are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate the current scenario and print the result bundle
    Evaluate(EvaluateArgs),
    /// Evaluate a file of saved scenarios and compare them
    Compare(CompareArgs),
    /// Evaluate the current scenario across every country
    Countries(ScenarioArgs),
    /// Compare two mandate designs against opting out
    Designs(DesignsArgs),
    /// Probabilistic sensitivity analysis (Monte Carlo)
    Psa(PsaArgs),
    /// One-way deterministic sensitivity analysis
    Tornado(TornadoArgs),
    /// Export a policy brief for the current scenario
    Brief(BriefArgs),
}

#[derive(Args, Debug, Clone)]
struct ScenarioArgs {
    #[arg(long, default_value = "AUS", value_parser = parse_country)]
    country: Country,
    #[arg(long, default_value = "mild", value_parser = parse_outbreak)]
    outbreak: OutbreakSeverity,
    #[arg(long, default_value = "full", value_parser = parse_segment)]
    segment: PopulationSegment,
    #[arg(long, default_value = "high_risk", value_parser = parse_scope)]
    scope: MandateScope,
    #[arg(long, default_value = "med_only", value_parser = parse_exemptions)]
    exemptions: ExemptionPolicy,
    #[arg(long, default_value = "50", value_parser = parse_coverage)]
    coverage: CoverageThreshold,
    /// Expected lives saved per 100,000 population
    #[arg(long, default_value_t = 25.0)]
    lives_saved: f64,
    /// Cost toggle JSON file; unlisted toggles keep their defaults
    #[arg(long, conflicts_with = "no_costs")]
    toggles: Option<PathBuf>,
    /// Switch every cost line item off
    #[arg(long)]
    no_costs: bool,
}

impl ScenarioArgs {
    fn selection(&self) -> PolicyConfiguration {
        PolicyConfiguration {
            country: self.country,
            outbreak: self.outbreak,
            segment: self.segment,
            scope: self.scope,
            exemptions: self.exemptions,
            coverage: self.coverage,
            lives_saved: self.lives_saved,
            intensity: None,
        }
    }

    fn toggles(&self) -> Result<CostToggles, AppError> {
        if self.no_costs {
            return Ok(CostToggles::none());
        }
        match &self.toggles {
            Some(path) => read_json(path),
            None => Ok(CostToggles::default()),
        }
    }
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Print the result bundle as JSON instead of text tables
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// JSON array of scenario specifications to evaluate and compare
    #[arg(long)]
    scenarios: PathBuf,
}

#[derive(Args, Debug)]
struct DesignsArgs {
    /// Scenario JSON for mandate design A
    #[arg(long)]
    design_a: PathBuf,
    /// Scenario JSON for mandate design B (the reference design)
    #[arg(long)]
    design_b: PathBuf,
}

#[derive(Args, Debug)]
struct PsaArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Number of Monte Carlo draws (clamped to 200..=3000)
    #[arg(long, default_value_t = 1000)]
    runs: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Write per-draw samples to a CSV file
    #[arg(long)]
    samples_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TornadoArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Fractional swing applied to each parameter (0.25 = +/-25%)
    #[arg(long, default_value_t = 0.25)]
    swing: f64,
}

#[derive(Args, Debug)]
struct BriefArgs {
    #[command(flatten)]
    scenario: ScenarioArgs,
    /// Output format: html or pages
    #[arg(long, default_value = "html", value_parser = parse_brief_format)]
    format: BriefFormat,
    /// Output file; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug)]
enum BriefFormat {
    Html,
    Pages,
}

/// Scenario specification accepted in comparison files. Selection fields
/// sit at the top level; missing ones keep their defaults.
#[derive(Debug, Deserialize)]
struct ScenarioSpec {
    #[serde(default)]
    label: Option<String>,
    #[serde(flatten)]
    selection: PolicyConfiguration,
    #[serde(default)]
    toggles: CostToggles,
}

fn parse_country(raw: &str) -> Result<Country, String> {
    raw.parse()
}

fn parse_outbreak(raw: &str) -> Result<OutbreakSeverity, String> {
    raw.parse()
}

fn parse_segment(raw: &str) -> Result<PopulationSegment, String> {
    raw.parse()
}

fn parse_scope(raw: &str) -> Result<MandateScope, String> {
    raw.parse()
}

fn parse_exemptions(raw: &str) -> Result<ExemptionPolicy, String> {
    raw.parse()
}

fn parse_coverage(raw: &str) -> Result<CoverageThreshold, String> {
    raw.parse()
}

fn parse_brief_format(raw: &str) -> Result<BriefFormat, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "html" => Ok(BriefFormat::Html),
        "pages" => Ok(BriefFormat::Pages),
        other => Err(format!("unknown brief format '{other}' (expected html or pages)")),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| AppError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    if let Err(err) = run_cli() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let evaluator = MandateEvaluator::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Command::Evaluate(args) => run_evaluate(&evaluator, args),
        Command::Compare(args) => run_compare(&evaluator, args),
        Command::Countries(args) => run_countries(&evaluator, args),
        Command::Designs(args) => run_designs(&evaluator, args),
        Command::Psa(args) => run_psa_command(&evaluator, args),
        Command::Tornado(args) => run_tornado_command(&evaluator, args),
        Command::Brief(args) => run_brief(&evaluator, args),
    }
}

/// Load the model constants. A configuration file that fails to load or
/// validate aborts before anything is computed.
fn load_config(path: Option<&Path>) -> Result<ModelConfig, AppError> {
    match path {
        Some(path) => {
            let config = ModelConfig::from_path(path)?;
            info!(path = %path.display(), "loaded model configuration");
            Ok(config)
        }
        None => Ok(ModelConfig::builtin()),
    }
}

fn run_evaluate(evaluator: &MandateEvaluator, args: EvaluateArgs) -> Result<(), AppError> {
    let selection = args.scenario.selection();
    let toggles = args.scenario.toggles()?;
    let bundle = evaluator.evaluate(&selection, &toggles);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&bundle).expect("result bundle serializes")
        );
        return Ok(());
    }

    render_bundle(evaluator, &selection, &bundle);
    Ok(())
}

fn render_bundle(evaluator: &MandateEvaluator, selection: &PolicyConfiguration, bundle: &ResultBundle) {
    let meta = evaluator.config().country_meta(selection.country);
    let symbol = meta.currency_symbol.as_str();

    println!("Scenario: {} | {} outbreak | scope {} | exemptions {} | lift at {}% | {} lives per 100k",
        meta.label,
        selection.outbreak,
        selection.scope,
        selection.exemptions,
        selection.coverage,
        selection.lives_saved,
    );

    println!("\nPredicted uptake");
    println!("- Mixed logit (mean): {}", format::percent(bundle.uptake.mixed_logit));
    for class in &bundle.uptake.classes {
        println!(
            "- Latent class {} (share {}): {}",
            class.id,
            format::percent(class.share),
            format::percent(class.probability)
        );
    }
    println!("- Latent class weighted: {}", format::percent(bundle.uptake.class_weighted));
    println!("- Composite: {}", format::percent(bundle.uptake.composite));
    if selection.segment != PopulationSegment::FullSample {
        println!(
            "- Segment view ({}): {}",
            selection.segment,
            format::percent(bundle.uptake.for_segment(selection.segment))
        );
    }

    println!("\nHealth outcomes");
    println!(
        "- Coverage: {} -> {}",
        format::percent(bundle.benefits.baseline_coverage),
        format::percent(bundle.benefits.new_coverage)
    );
    println!("- Additional vaccinated: {}", format::count(bundle.benefits.additional_vaccinated));
    println!("- Cases averted: {}", format::count(bundle.benefits.cases_averted));
    println!(
        "- Hospitalisations / ICU / deaths averted: {} / {} / {}",
        format::count(bundle.benefits.hospitalisations_averted),
        format::count(bundle.benefits.icu_admissions_averted),
        format::count(bundle.benefits.deaths_averted)
    );
    println!("- QALYs gained: {:.1}", bundle.benefits.qaly_gained);

    println!("\nCosts ({})", meta.currency_code);
    println!("- Public sector fixed: {}", format::currency(symbol, bundle.costs.public_sector_fixed));
    println!("- Programme variable: {}", format::currency(symbol, bundle.costs.programme_variable));
    println!("- Employer: {}", format::currency(symbol, bundle.costs.employer));
    println!("- Attrition: {}", format::currency(symbol, bundle.costs.attrition));
    println!("- Social: {}", format::currency(symbol, bundle.costs.social));
    println!("- Total: {}", format::currency(symbol, bundle.costs.total));

    println!("\nEconomic evaluation");
    println!("- Monetised benefits: {}", format::currency(symbol, bundle.economics.monetised_benefits));
    println!("- NPV: {}", format::currency(symbol, bundle.economics.npv));
    println!("- Benefit-cost ratio: {}", format::ratio(&bundle.economics.bcr));
    println!("- Cost per QALY: {}", format::currency_ratio(symbol, &bundle.economics.cost_per_qaly));
    println!("- NMB: {}", format::currency(symbol, bundle.economics.nmb));
    println!("- Payback: {}", format::payback(bundle.economics.payback_years));

    println!("\nEquity");
    println!(
        "- QALYs low/mid/high SES: {:.1} / {:.1} / {:.1}",
        bundle.equity.qaly_low_ses, bundle.equity.qaly_mid_ses, bundle.equity.qaly_high_ses
    );
    println!("- Equity-weighted NMB: {}", format::currency(symbol, bundle.equity.equity_adjusted_nmb));
    println!("- Concentration index (proxy): {:.3}", bundle.equity.concentration_index);
}

fn run_compare(evaluator: &MandateEvaluator, args: CompareArgs) -> Result<(), AppError> {
    let specs: Vec<ScenarioSpec> = read_json(&args.scenarios)?;
    let mut log = ScenarioLog::new();

    for (index, spec) in specs.iter().enumerate() {
        let label = spec
            .label
            .clone()
            .unwrap_or_else(|| format!("scenario {}", index + 1));
        let bundle = evaluator.evaluate(&spec.selection, &spec.toggles);
        log.save(label, &spec.selection, &spec.toggles, &bundle);
    }

    println!("Saved scenarios: {}", log.len());
    println!(
        "{:<24} {:>10} {:>12} {:>16} {:>16} {:>8}",
        "Label", "Uptake", "QALYs", "Total costs", "NMB", "BCR"
    );
    for saved in log.iter() {
        let meta = evaluator.config().country_meta(saved.selection.country);
        println!(
            "{:<24} {:>10} {:>12.1} {:>16} {:>16} {:>8}",
            saved.label,
            format::percent(saved.results.uptake.composite),
            saved.results.benefits.qaly_gained,
            format::currency(&meta.currency_symbol, saved.results.costs.total),
            format::currency(&meta.currency_symbol, saved.results.economics.nmb),
            format::ratio(&saved.results.economics.bcr),
        );
    }
    Ok(())
}

fn run_countries(evaluator: &MandateEvaluator, args: ScenarioArgs) -> Result<(), AppError> {
    let selection = args.selection();
    let toggles = args.toggles()?;
    let results = evaluator.evaluate_all_countries(&selection, &toggles);

    println!(
        "{:<12} {:>10} {:>16} {:>12} {:>18}",
        "Country", "Uptake", "Cases averted", "QALYs", "NMB"
    );
    for (country, bundle) in results {
        let meta = evaluator.config().country_meta(country);
        println!(
            "{:<12} {:>10} {:>16} {:>12.1} {:>18}",
            meta.label,
            format::percent(bundle.uptake.composite),
            format::count(bundle.benefits.cases_averted),
            bundle.benefits.qaly_gained,
            format::currency(&meta.currency_symbol, bundle.economics.nmb),
        );
    }
    Ok(())
}

fn run_designs(evaluator: &MandateEvaluator, args: DesignsArgs) -> Result<(), AppError> {
    let design_a: PolicyConfiguration = read_json(&args.design_a)?;
    let design_b: PolicyConfiguration = read_json(&args.design_b)?;
    let comparison = evaluator.compare_designs(&design_a, &design_b);

    println!("Utilities relative to mandate B (numeraire)");
    println!("- Mandate A: {:.2}", comparison.utility_mandate_a);
    println!("- Mandate B: {:.2}", comparison.utility_mandate_b);
    println!("- Opt out:   {:.2}", comparison.utility_opt_out);
    println!("\nPredicted choice shares");
    println!("- Mandate A: {}", format::percent(comparison.shares.mandate_a));
    println!("- Mandate B: {}", format::percent(comparison.shares.mandate_b));
    println!("- Opt out:   {}", format::percent(comparison.shares.opt_out));
    Ok(())
}

fn run_psa_command(evaluator: &MandateEvaluator, args: PsaArgs) -> Result<(), AppError> {
    let selection = args.scenario.selection();
    let toggles = args.scenario.toggles()?;
    let psa_config = PsaConfig::new().with_runs(args.runs).with_seed(args.seed);

    let result = run_psa(evaluator.config(), &selection, &toggles, &psa_config)
        .map_err(AppError::Analysis)?;
    info!(runs = result.runs, "probabilistic sensitivity analysis complete");

    let meta = evaluator.config().country_meta(selection.country);
    println!("Monte Carlo draws: {}", result.runs);
    println!("Mean NMB: {}", format::currency(&meta.currency_symbol, result.mean_nmb));
    println!("P(NMB > 0): {}", format::percent(result.probability_positive_nmb));

    println!("\nCost-effectiveness acceptability");
    println!("{:>18} {:>16}", "WTP per QALY", "P(cost-effective)");
    for point in &result.ceac {
        println!(
            "{:>18} {:>16}",
            format::currency(&meta.currency_symbol, point.willingness_to_pay),
            format::percent(point.probability_cost_effective)
        );
    }

    if let Some(path) = &args.samples_csv {
        write_samples_csv(path, &result)?;
        info!(path = %path.display(), "wrote PSA samples");
    }
    Ok(())
}

fn write_samples_csv(path: &Path, result: &mandeval_sensitivity::PsaResult) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["draw", "nmb", "total_costs", "monetised_benefits", "qaly_gained"])?;
    for (index, sample) in result.samples.iter().enumerate() {
        writer.write_record([
            index.to_string(),
            sample.nmb.to_string(),
            sample.total_costs.to_string(),
            sample.monetised_benefits.to_string(),
            sample.qaly_gained.to_string(),
        ])?;
    }
    writer.flush().map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

fn run_tornado_command(evaluator: &MandateEvaluator, args: TornadoArgs) -> Result<(), AppError> {
    let selection = args.scenario.selection();
    let toggles = args.scenario.toggles()?;
    let tornado_config = TornadoConfig::new().with_swing(args.swing);
    let result = run_tornado(evaluator.config(), &selection, &toggles, &tornado_config);

    let meta = evaluator.config().country_meta(selection.country);
    let symbol = meta.currency_symbol.as_str();
    println!("Base NMB: {}", format::currency(symbol, result.base_nmb));
    println!("\n{:<28} {:>18} {:>18}", "Parameter", "NMB at -swing", "NMB at +swing");
    for entry in &result.entries {
        println!(
            "{:<28} {:>18} {:>18}",
            entry.parameter,
            format::currency(symbol, entry.nmb_low),
            format::currency(symbol, entry.nmb_high),
        );
    }
    Ok(())
}

fn run_brief(evaluator: &MandateEvaluator, args: BriefArgs) -> Result<(), AppError> {
    let selection = args.scenario.selection();
    let toggles = args.scenario.toggles()?;
    let bundle = evaluator.evaluate(&selection, &toggles);

    let ctx = BriefContext {
        meta: evaluator.config().country_meta(selection.country),
        selection: &selection,
        bundle: &bundle,
    };
    let rendered = match args.format {
        BriefFormat::Html => brief::render_html(&ctx),
        BriefFormat::Pages => brief::render_pages(&ctx),
    };

    match &args.out {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| AppError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            info!(path = %path.display(), "wrote policy brief");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
