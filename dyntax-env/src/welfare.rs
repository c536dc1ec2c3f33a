//! Inequality and social welfare measures

use dyntax_core::{mean, WelfareRule};

/// Floor applied to incomes before the Atkinson power mean
const ATKINSON_FLOOR: f64 = 1e-6;

/// Gini coefficient of `values`, with negative entries clamped to zero.
///
/// Uses `1 - (2 / (n - 1)) * (n - sum(cumsum) / total)` over the ascending
/// sort. Empty, single-element and all-zero inputs return `0`. Any NaN input
/// yields NaN.
#[must_use]
pub fn gini(values: &[f64]) -> f64 {
    if values.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }

    let mut sorted: Vec<f64> = values.iter().map(|v| v.max(0.0)).collect();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    if n <= 1 {
        return 0.0;
    }

    let mut running = 0.0;
    let mut cum_sum = 0.0;
    for v in &sorted {
        running += v;
        cum_sum += running;
    }
    let total = running;
    if total <= 0.0 {
        return 0.0;
    }

    let n = n as f64;
    1.0 - (2.0 / (n - 1.0)) * (n - cum_sum / total)
}

/// Social welfare of `incomes` after a flat `transfer` under `rule`.
///
/// A NaN income makes the result NaN under every rule.
#[must_use]
pub fn welfare(rule: WelfareRule, incomes: &[f64], transfer: f64, epsilon: f64) -> f64 {
    match rule {
        WelfareRule::Utilitarian => mean(incomes.iter().map(|y| (1.0 + y + transfer).ln())),
        WelfareRule::Rawls => incomes
            .iter()
            .map(|y| (1.0 + y + transfer).ln())
            .fold(f64::INFINITY, nan_min),
        WelfareRule::Atkinson => atkinson(incomes, transfer, epsilon),
    }
}

fn atkinson(incomes: &[f64], transfer: f64, epsilon: f64) -> f64 {
    let post = incomes.iter().map(|y| {
        let v = y + transfer;
        if v.is_nan() {
            v
        } else {
            v.max(ATKINSON_FLOOR)
        }
    });
    if (1.0 - epsilon).abs() < 1e-6 {
        return mean(post.map(f64::ln));
    }
    let power = 1.0 - epsilon;
    mean(post.map(|y| y.powf(power))).powf(1.0 / power)
}

/// Minimum that keeps NaN, unlike `f64::min`
fn nan_min(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.min(v)
    }
}
