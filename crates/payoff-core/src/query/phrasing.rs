//! Human-readable rendering of amounts, durations and dates.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Whole-dollar, comma-grouped currency: `$1,501`, `-$1,000`, `$0`.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();
    let grouped = group_thousands(&digits);
    if rounded < Decimal::ZERO {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `2 years and 3 months`, `1 year`, `7 months`.
pub fn format_duration(total_months: u32) -> String {
    let years = total_months / 12;
    let months = total_months % 12;

    if years == 0 {
        return plural(months, "month");
    }
    if months == 0 {
        return plural(years, "year");
    }
    format!("{} and {}", plural(years, "year"), plural(months, "month"))
}

/// US long form: `December 25, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

fn plural(n: u32, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
