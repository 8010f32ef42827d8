//! Plain-language "what-if" questions about a mortgage.
//!
//! A question is lower-cased, its first dollar amount and year count are
//! extracted, and the first intent rule whose keywords appear (and whose
//! required number is present) re-runs the scenario calculator to produce a
//! sentence. Anything else gets [`HELP_MESSAGE`]. Interpretation never fails.

pub mod context;
pub mod extract;
pub mod phrasing;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::scenario::{compute_scenario, ScenarioResult};
use crate::error::PayoffError;
use crate::time_value::annuity_payment;
use crate::types::Money;

pub use context::MortgageSnapshot;
pub use extract::{parse_query, ParsedQuery};
pub use phrasing::{format_currency, format_duration, format_long_date};

pub const HELP_MESSAGE: &str = "I'd be happy to help with your mortgage calculations! \
Please ask about additional payments, time savings, or interest savings.";

pub const PAID_OFF_MESSAGE: &str =
    "Your mortgage appears to be already paid off based on the start date provided.";

pub const INVALID_YEARS_MESSAGE: &str = "Please specify a positive number of years for payoff.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryIntent {
    /// How much sooner the loan is repaid with an extra amount.
    TimeSavings,
    /// How much interest an extra amount saves.
    InterestSavings,
    /// Extra payment needed to finish within a number of years.
    TargetTerm,
}

pub struct IntentRule {
    pub intent: QueryIntent,
    pub keywords: &'static [&'static str],
}

impl IntentRule {
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Rules in precedence order.
pub const INTENT_RULES: [IntentRule; 3] = [
    IntentRule {
        intent: QueryIntent::TimeSavings,
        keywords: &["sooner", "earlier", "faster"],
    },
    IntentRule {
        intent: QueryIntent::InterestSavings,
        keywords: &["total interest", "interest save"],
    },
    IntentRule {
        intent: QueryIntent::TargetTerm,
        keywords: &["finish", "pay off"],
    },
];

/// Highest-precedence intent mentioned in the question, if any.
pub fn classify(query: &str) -> Option<QueryIntent> {
    let lowered = query.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.intent)
}

/// Answer `query` against `context` as of `as_of`.
pub fn interpret(query: &str, context: Option<&MortgageSnapshot>, as_of: NaiveDate) -> String {
    let Some(context) = context else {
        return HELP_MESSAGE.to_string();
    };

    let parsed = parse_query(query);

    for rule in INTENT_RULES.iter().filter(|r| r.matches(&parsed.lowered)) {
        if let Some(answer) = answer(rule.intent, &parsed, context, as_of) {
            tracing::debug!(intent = ?rule.intent, "answered query locally");
            return answer;
        }
    }

    tracing::debug!("no intent answered; returning help");
    HELP_MESSAGE.to_string()
}

/// `None` when the intent's required number is missing from the question.
fn answer(
    intent: QueryIntent,
    parsed: &ParsedQuery,
    context: &MortgageSnapshot,
    as_of: NaiveDate,
) -> Option<String> {
    match intent {
        QueryIntent::TimeSavings => {
            let amount = positive(parsed.amount)?;
            Some(with_scenario(context, amount, as_of, |r| {
                let mut text = format!(
                    "Adding {} per month would allow you to pay off your mortgage {} sooner, \
                     saving you {} in total interest.",
                    format_currency(amount),
                    format_duration(r.months_saved),
                    format_currency(r.interest_saved)
                );
                if r.payments_already_made > 0 {
                    text.push_str(&format!(
                        " (Based on your current balance of {} after {} payments already made)",
                        format_currency(r.current_balance),
                        r.payments_already_made
                    ));
                }
                text
            }))
        }
        QueryIntent::InterestSavings => {
            let amount = positive(parsed.amount)?;
            Some(with_scenario(context, amount, as_of, |r| {
                let mut text = format!(
                    "With an additional {} per month, you would save {} in total interest \
                     over the life of your loan.",
                    format_currency(amount),
                    format_currency(r.interest_saved)
                );
                text.push_str(&balance_clause(r));
                text
            }))
        }
        QueryIntent::TargetTerm => {
            let years = parsed.years?;
            Some(target_term(context, years, as_of))
        }
    }
}

fn target_term(context: &MortgageSnapshot, years: u32, as_of: NaiveDate) -> String {
    let current = match compute_scenario(&context.with_extra(Decimal::ZERO), as_of) {
        Ok(r) => r,
        Err(e) => return unusable_context(&e),
    };
    if current.is_already_paid_off {
        return PAID_OFF_MESSAGE.to_string();
    }

    let target_months = years.saturating_mul(12);
    if target_months == 0 {
        return INVALID_YEARS_MESSAGE.to_string();
    }

    // The standard schedule already ends within any horizon at least as long
    // as the payments it has left.
    let remaining_payments = u32::try_from(current.baseline_schedule.len()).unwrap_or(u32::MAX);
    if target_months >= remaining_payments {
        return already_on_track(years);
    }

    let monthly_rate = context.loan_terms().monthly_rate();
    let required = match annuity_payment(current.current_balance, monthly_rate, target_months) {
        Ok(p) => p,
        Err(e) => return unusable_context(&e),
    };
    let additional_needed = required - current.monthly_payment;

    if additional_needed > Decimal::ZERO {
        format!(
            "To pay off your mortgage in {} years from today, you would need to add \
             approximately {} per month to your payments.{}",
            years,
            format_currency(additional_needed),
            balance_clause(&current)
        )
    } else {
        already_on_track(years)
    }
}

fn already_on_track(years: u32) -> String {
    format!(
        "Great news! Your current payment schedule will already pay off your mortgage \
         in less than {years} years from today."
    )
}

fn with_scenario(
    context: &MortgageSnapshot,
    extra: Money,
    as_of: NaiveDate,
    phrase: impl FnOnce(&ScenarioResult) -> String,
) -> String {
    match compute_scenario(&context.with_extra(extra), as_of) {
        Ok(r) if r.is_already_paid_off => PAID_OFF_MESSAGE.to_string(),
        Ok(r) => phrase(&r),
        Err(e) => unusable_context(&e),
    }
}

fn balance_clause(r: &ScenarioResult) -> String {
    if r.payments_already_made > 0 {
        format!(
            " (Based on your current balance of {})",
            format_currency(r.current_balance)
        )
    } else {
        String::new()
    }
}

fn positive(amount: Option<Money>) -> Option<Money> {
    amount.filter(|a| *a > Decimal::ZERO)
}

fn unusable_context(err: &PayoffError) -> String {
    tracing::debug!(error = %err, "mortgage details rejected");
    match err {
        PayoffError::InvalidInput { reason, .. } => format!(
            "I couldn't run that calculation with the mortgage details provided. {reason}."
        ),
        other => format!("I couldn't run that calculation with the mortgage details provided ({other})."),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
