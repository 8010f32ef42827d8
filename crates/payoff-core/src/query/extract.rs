//! Numeric token extraction from free-text questions.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Money;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?(\d+(?:,\d{3})*(?:\.\d+)?)").expect("amount pattern compiles"));

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*years?").expect("years pattern compiles"));

/// A lower-cased question with its first dollar amount and year count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub lowered: String,
    pub amount: Option<Money>,
    pub years: Option<u32>,
}

pub fn parse_query(query: &str) -> ParsedQuery {
    let lowered = query.to_lowercase();
    ParsedQuery {
        amount: extract_amount(&lowered),
        years: extract_years(&lowered),
        lowered,
    }
}

/// First number in the text, with an optional `$` and thousands commas.
pub fn extract_amount(text: &str) -> Option<Money> {
    let caps = AMOUNT_RE.captures(text)?;
    caps[1].replace(',', "").parse::<Decimal>().ok()
}

/// First `<n> year(s)` phrase.
pub fn extract_years(text: &str) -> Option<u32> {
    let caps = YEARS_RE.captures(text)?;
    caps[1].parse::<u32>().ok()
}
