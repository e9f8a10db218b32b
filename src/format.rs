//! Display formatting for prices, volumes and percentages.
//!
//! Output follows `en-US` grouping with at most two fraction digits, trailing zeros
//! dropped. Absent and NaN values collapse to [`PLACEHOLDER`].

use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::*;

pub const PLACEHOLDER: &str = "-";

const CENT_DIGITS: u32 = 2;

/// `$` + grouped value, or the placeholder for `None`/NaN.
pub fn format_money(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("${}", format_number(v)),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Fixed two decimals followed by `%`, or the placeholder for `None`/NaN.
///
/// Rounds the exact binary value, ties away from zero. -0.0 prints unsigned.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_nan() => PLACEHOLDER.to_string(),
        Some(v) if v.is_infinite() => {
            if v > 0.0 { "Infinity%".to_string() } else { "-Infinity%".to_string() }
        }
        Some(v) => {
            let sign = if v < 0.0 { "-" } else { "" };
            format!("{}{}%", sign, fixed_two(v.abs()))
        }
        None => PLACEHOLDER.to_string(),
    }
}

/// Grouped number without a currency marker. NaN is rendered as the placeholder.
///
/// Rounds the shortest decimal form of `value` to cents, ties away from zero.
/// A negative value keeps its sign even when it rounds to zero.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return PLACEHOLDER.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let (whole, frac) = round_to_cents(value.abs());
    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_whole(&whole));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

fn fixed_two(abs: f64) -> String {
    match Decimal::from_f64_retain(abs) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(CENT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Out of Decimal range: the value is integral, so there is nothing to round
        None => format!("{:.2}", abs),
    }
}

/// Whole digits and trimmed fraction digits of a non-negative finite value.
fn round_to_cents(abs: f64) -> (String, String) {
    if abs < 0.005 {
        return ("0".to_string(), String::new());
    }
    let shortest = abs.to_string();
    match Decimal::from_str(&shortest) {
        Ok(d) => {
            let rounded = d
                .round_dp_with_strategy(CENT_DIGITS, RoundingStrategy::MidpointAwayFromZero)
                .normalize()
                .to_string();
            match rounded.split_once('.') {
                Some((whole, frac)) => (whole.to_string(), frac.to_string()),
                None => (rounded, String::new()),
            }
        }
        // Above Decimal::MAX every f64 is an integer
        Err(_) => (shortest, String::new()),
    }
}

fn group_whole(digits: &str) -> String {
    match digits.parse::<u128>() {
        Ok(n) => n.to_formatted_string(&Locale::en),
        Err(_) => {
            let lead = match digits.len() % 3 {
                0 => 3,
                n => n,
            };
            let (head, rest) = digits.split_at(lead);
            std::iter::once(head)
                .chain(rest.as_bytes().chunks(3).map(|c| std::str::from_utf8(c).unwrap_or_default()))
                .join(Locale::en.separator())
        }
    }
}
