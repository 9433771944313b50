use crate::catalog;
use crate::model::{AnalysisResult, DealQuality, PropertyInput, SelectedRepairs};
use serde::{Deserialize, Serialize};

/// Cost rates applied to the after-repair value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealAssumptions {
    pub closing_cost_rate: f64,       // 3% of ARV
    pub hard_money_rate: f64,         // 6% of ARV, six months of hard money
    pub default_target_percent: f64,
}

impl Default for DealAssumptions {
    fn default() -> Self {
        DealAssumptions {
            closing_cost_rate: 0.03,
            hard_money_rate: 0.06,
            default_target_percent: 70.0,
        }
    }
}

pub fn analyze(input: &PropertyInput, selected: &SelectedRepairs) -> AnalysisResult {
    analyze_with(&DealAssumptions::default(), input, selected)
}

/// Runs the analysis only once both ARV and square footage are filled in.
pub fn analyze_if_ready(
    assumptions: &DealAssumptions,
    input: &PropertyInput,
    selected: &SelectedRepairs,
) -> Option<AnalysisResult> {
    if input.has_required_fields() {
        Some(analyze_with(assumptions, input, selected))
    } else {
        None
    }
}

pub fn analyze_with(
    assumptions: &DealAssumptions,
    input: &PropertyInput,
    selected: &SelectedRepairs,
) -> AnalysisResult {
    let arv = coerce(&input.estimated_arv, 0.0);
    let target_percent = coerce(&input.target_percent, assumptions.default_target_percent);
    let sqft = coerce(&input.square_footage, 0.0);

    let total_repair_costs = catalog::total_repair_costs(selected);

    let closing_costs = arv * assumptions.closing_cost_rate;
    let hard_money_interest = arv * assumptions.hard_money_rate;

    let raw_offer = (arv * (target_percent / 100.0))
        - total_repair_costs
        - closing_costs
        - hard_money_interest;

    // Uses the unfloored offer, so this is always arv * target_percent / 100.
    let total_investment = raw_offer + total_repair_costs + closing_costs + hard_money_interest;
    let projected_profit = arv - total_investment;
    let profit_margin = if arv > 0.0 {
        (projected_profit / arv) * 100.0
    } else {
        0.0
    };

    let deal_quality = DealQuality::from_margin(profit_margin);

    if raw_offer < 0.0 {
        tracing::debug!(raw_offer, "costs exceed the target price, offer floored at zero");
    }
    tracing::debug!(
        arv,
        target_percent,
        sqft,
        repairs = selected.len(),
        total_repair_costs,
        profit_margin,
        quality = deal_quality.label(),
        "deal analyzed"
    );

    AnalysisResult {
        max_allowable_offer: raw_offer.max(0.0),
        raw_offer,
        projected_profit,
        profit_margin,
        total_investment,
        total_repair_costs,
        closing_costs,
        hard_money_interest,
        deal_quality,
        arv,
        target_percent,
        sqft,
    }
}

/// Parsed value of `text`, with unparseable, NaN and zero values replaced by `default`.
pub fn coerce(text: &str, default: f64) -> f64 {
    match parse_number(text) {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => default,
    }
}

/// Parses the longest numeric prefix of `text` after leading whitespace,
/// so "250000 USD" reads as 250000.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when it carries digits: "5e" parses as 5.
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
