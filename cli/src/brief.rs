//! Policy-brief export.
//!
//! Renders the latest result bundle into a standalone document:
//! configuration, predicted uptake, health outcomes, costs and economic
//! evaluation, and the equity summary, in that order. Two formats are
//! supported: a styled single-page HTML document and a paginated plain
//! text document with one section per page.

use mandeval_core::types::{
    CountryMeta, ExemptionPolicy, MandateScope, OutbreakSeverity, PolicyConfiguration,
};
use mandeval_evaluation::ResultBundle;

use crate::format;

pub struct BriefContext<'a> {
    pub meta: &'a CountryMeta,
    pub selection: &'a PolicyConfiguration,
    pub bundle: &'a ResultBundle,
}

fn outbreak_label(outbreak: OutbreakSeverity) -> &'static str {
    match outbreak {
        OutbreakSeverity::Mild => "Mild outbreak",
        OutbreakSeverity::Severe => "Severe outbreak",
    }
}

fn scope_label(scope: MandateScope) -> &'static str {
    match scope {
        MandateScope::HighRiskOccupations => "High-risk occupations only",
        MandateScope::AllOccupationsAndPublicSpaces => "All occupations & public spaces",
    }
}

fn exemptions_label(exemptions: ExemptionPolicy) -> &'static str {
    match exemptions {
        ExemptionPolicy::MedicalOnly => "Medical only",
        ExemptionPolicy::MedicalReligious => "Medical + religious",
        ExemptionPolicy::MedicalReligiousPersonal => "Medical + religious + personal belief",
    }
}

const METHODS_NOTE: &str = "Methods: Prediction of mandate uptake is based on mixed logit and \
latent class models estimated from discrete choice experiment data in Australia, Italy, and \
France under mild and severe outbreak vignettes. Epidemiological and costing parameters are \
stylised placeholders for decision-support and should be replaced with context-specific values \
before use in formal policy processes.";

fn configuration_rows(ctx: &BriefContext) -> Vec<(String, String)> {
    vec![
        ("Country".to_string(), ctx.meta.label.clone()),
        ("Outbreak context".to_string(), outbreak_label(ctx.selection.outbreak).to_string()),
        ("Scope".to_string(), scope_label(ctx.selection.scope).to_string()),
        ("Exemptions".to_string(), exemptions_label(ctx.selection.exemptions).to_string()),
        (
            "Coverage threshold".to_string(),
            format!("{}% of population vaccinated", ctx.selection.coverage),
        ),
        (
            "Expected lives saved".to_string(),
            format!("{} per 100,000 population", ctx.selection.lives_saved),
        ),
    ]
}

fn uptake_rows(ctx: &BriefContext) -> Vec<(String, String)> {
    let uptake = &ctx.bundle.uptake;
    let mut rows = vec![(
        "Mixed logit (mean)".to_string(),
        format::percent(uptake.mixed_logit),
    )];
    for class in &uptake.classes {
        rows.push((
            format!("Latent class - {}", class.id),
            format::percent(class.probability),
        ));
    }
    rows.push(("Latent class - weighted".to_string(), format::percent(uptake.class_weighted)));
    rows.push(("Composite uptake".to_string(), format::percent(uptake.composite)));
    rows
}

fn health_rows(ctx: &BriefContext) -> Vec<(String, String)> {
    let benefits = &ctx.bundle.benefits;
    vec![
        ("Additional vaccinated".to_string(), format::count(benefits.additional_vaccinated)),
        ("Cases averted".to_string(), format::count(benefits.cases_averted)),
        (
            "Hospitalisations averted".to_string(),
            format::count(benefits.hospitalisations_averted),
        ),
        ("ICU admissions averted".to_string(), format::count(benefits.icu_admissions_averted)),
        ("Deaths averted".to_string(), format::count(benefits.deaths_averted)),
        ("QALYs gained".to_string(), format!("{:.1}", benefits.qaly_gained)),
        ("DALYs averted".to_string(), format!("{:.1}", benefits.dalys_averted)),
    ]
}

fn economics_rows(ctx: &BriefContext) -> Vec<(String, String)> {
    let economics = &ctx.bundle.economics;
    let symbol = ctx.meta.currency_symbol.as_str();
    vec![
        ("Total programme costs".to_string(), format::currency(symbol, economics.total_costs)),
        (
            "Monetised benefits".to_string(),
            format::currency(symbol, economics.monetised_benefits),
        ),
        ("Net present value (NPV)".to_string(), format::currency(symbol, economics.npv)),
        ("Benefit-cost ratio".to_string(), format::ratio(&economics.bcr)),
        (
            "Cost per additional vaccinated".to_string(),
            format::currency_ratio(symbol, &economics.cost_per_vaccinated),
        ),
        (
            "Cost per case averted".to_string(),
            format::currency_ratio(symbol, &economics.cost_per_case_averted),
        ),
        (
            "Cost per death averted".to_string(),
            format::currency_ratio(symbol, &economics.cost_per_death_averted),
        ),
        (
            "Cost per QALY gained".to_string(),
            format::currency_ratio(symbol, &economics.cost_per_qaly),
        ),
        ("Net monetary benefit (NMB)".to_string(), format::currency(symbol, economics.nmb)),
        ("Payback time".to_string(), format::payback(economics.payback_years)),
    ]
}

fn equity_rows(ctx: &BriefContext) -> Vec<(String, String)> {
    let equity = &ctx.bundle.equity;
    let symbol = ctx.meta.currency_symbol.as_str();
    vec![
        ("Low SES".to_string(), format!("{:.1}", equity.qaly_low_ses)),
        ("Middle SES".to_string(), format!("{:.1}", equity.qaly_mid_ses)),
        ("High SES".to_string(), format!("{:.1}", equity.qaly_high_ses)),
        ("Equity-weighted QALYs".to_string(), format!("{:.1}", equity.weighted_qaly_total)),
        (
            "Equity-weighted NMB".to_string(),
            format::currency(symbol, equity.equity_adjusted_nmb),
        ),
        ("Concentration index (proxy)".to_string(), format!("{:.3}", equity.concentration_index)),
    ]
}

fn sections(ctx: &BriefContext) -> Vec<(String, Vec<(String, String)>)> {
    vec![
        ("Mandate Configuration".to_string(), configuration_rows(ctx)),
        ("DCE Predicted Uptake".to_string(), uptake_rows(ctx)),
        ("Health Outcomes".to_string(), health_rows(ctx)),
        (
            format!("Costs & Economic Evaluation ({})", ctx.meta.currency_code),
            economics_rows(ctx),
        ),
        ("Equity Summary".to_string(), equity_rows(ctx)),
    ]
}

fn html_escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Styled HTML brief, one document with all five sections.
pub fn render_html(ctx: &BriefContext) -> String {
    let mut html = String::new();
    html.push_str("<html>\n<head>\n<title>Vaccine Mandate Policy Brief</title>\n<style>\n");
    html.push_str(
        "body { font-family: system-ui, sans-serif; padding: 24px; color: #111827; }\n\
         h1 { font-size: 22px; }\n\
         h2 { font-size: 18px; margin-top: 24px; }\n\
         table { border-collapse: collapse; width: 100%; margin-top: 8px; }\n\
         th, td { border: 1px solid #e5e7eb; padding: 6px 8px; font-size: 13px; text-align: left; }\n\
         th { background: #f3f4f6; }\n\
         .tagline { color: #4b5563; margin-bottom: 4px; }\n\
         .methods { margin-top: 24px; font-size: 12px; color: #6b7280; }\n",
    );
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str("<h1>Vaccine Mandate Policy Brief - Scenario Summary</h1>\n");
    html.push_str(&format!(
        "<div class=\"tagline\">{} &bull; {}</div>\n",
        html_escape(&ctx.meta.label),
        outbreak_label(ctx.selection.outbreak)
    ));
    html.push_str(
        "<p>This brief summarises predicted uptake, health benefits, costs, and \
         cost-effectiveness for the selected vaccine mandate configuration.</p>\n",
    );

    for (title, rows) in sections(ctx) {
        html.push_str(&format!("<h2>{}</h2>\n<table>\n", html_escape(&title)));
        for (label, value) in rows {
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                html_escape(&label),
                html_escape(&value)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str(&format!("<p class=\"methods\">{METHODS_NOTE}</p>\n"));
    html.push_str("</body>\n</html>\n");
    html
}

/// Paginated plain-text brief: one section per page, pages separated by
/// form feeds.
pub fn render_pages(ctx: &BriefContext) -> String {
    let sections = sections(ctx);
    let total_pages = sections.len() + 1;
    let mut pages = Vec::with_capacity(total_pages);

    let width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter())
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);

    for (index, (title, rows)) in sections.into_iter().enumerate() {
        let mut page = String::new();
        page.push_str(&format!(
            "Vaccine Mandate Policy Brief - {} - {}\n",
            ctx.meta.label,
            outbreak_label(ctx.selection.outbreak)
        ));
        page.push_str(&format!("Page {} of {total_pages}\n\n", index + 1));
        page.push_str(&format!("{title}\n"));
        page.push_str(&"-".repeat(title.len()));
        page.push('\n');
        for (label, value) in rows {
            page.push_str(&format!("{label:<width$}  {value}\n"));
        }
        pages.push(page);
    }

    let mut methods_page = String::new();
    methods_page.push_str(&format!(
        "Vaccine Mandate Policy Brief - {} - {}\n",
        ctx.meta.label,
        outbreak_label(ctx.selection.outbreak)
    ));
    methods_page.push_str(&format!("Page {total_pages} of {total_pages}\n\nNotes\n-----\n"));
    methods_page.push_str(METHODS_NOTE);
    methods_page.push('\n');
    pages.push(methods_page);

    pages.join("\u{0c}")
}
