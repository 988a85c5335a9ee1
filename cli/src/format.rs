//! Number formatting shared by the text tables and the policy brief.

use mandeval_evaluation::Ratio;

/// Probability as a percentage with one decimal, "-" for non-finite
/// input.
pub fn percent(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{:.1}%", value * 100.0)
}

/// Count rounded to a whole number with thousands separators.
pub fn count(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let negative = value < 0.0;
    let rounded = value.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Currency amount: symbol plus grouped whole-number value.
pub fn currency(symbol: &str, value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    if value < 0.0 {
        format!("-{symbol}{}", count(-value))
    } else {
        format!("{symbol}{}", count(value))
    }
}

/// A dimensionless ratio with two decimals; fallback values are marked
/// so a zero denominator is visible rather than silently substituted.
pub fn ratio(value: &Ratio) -> String {
    match value {
        Ratio::Defined(v) => format!("{v:.2}"),
        Ratio::UnitDenominator(v) => format!("{v:.2} (zero denominator)"),
    }
}

/// A currency-valued ratio, same fallback marking.
pub fn currency_ratio(symbol: &str, value: &Ratio) -> String {
    match value {
        Ratio::Defined(v) => currency(symbol, *v),
        Ratio::UnitDenominator(v) => format!("{} (zero denominator)", currency(symbol, *v)),
    }
}

/// Payback in years, "not reached" when undefined.
pub fn payback(value: Option<f64>) -> String {
    match value {
        Some(years) => format!("{years:.1} years"),
        None => "not reached".to_string(),
    }
}
