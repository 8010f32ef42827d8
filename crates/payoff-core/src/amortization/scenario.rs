//! Baseline vs. accelerated payoff scenario.
//!
//! Runs the simulator twice (standard P&I payment, and standard payment plus
//! an additional monthly principal amount) and derives interest and time
//! savings. Loans that started before the as-of date are first rolled
//! forward to their current balance, and both schedules are re-anchored at
//! the as-of date.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{payoff_date, simulate, total_interest, PaymentRecord};
use crate::calendar::months_between;
use crate::error::PayoffError;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, LoanTerms, Money};
use crate::PayoffResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    #[serde(flatten)]
    pub loan: LoanTerms,
    /// Extra principal paid every month on top of the standard payment.
    #[serde(default)]
    pub additional_monthly_payment: Money,
}

impl ScenarioInput {
    pub fn validate(&self) -> PayoffResult<()> {
        self.loan.validate()?;
        if self.additional_monthly_payment < Decimal::ZERO {
            return Err(PayoffError::InvalidInput {
                field: "additional_monthly_payment".into(),
                reason: "Please enter a valid additional payment amount".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub baseline_schedule: Vec<PaymentRecord>,
    pub accelerated_schedule: Vec<PaymentRecord>,
    /// Standard P&I payment for the original terms.
    pub monthly_payment: Money,
    pub baseline_total_interest: Money,
    pub accelerated_total_interest: Money,
    pub interest_saved: Money,
    pub months_saved: u32,
    pub baseline_payoff_date: NaiveDate,
    pub accelerated_payoff_date: NaiveDate,
    /// Outstanding balance as of the evaluation date.
    pub current_balance: Money,
    /// Remaining term in years, one decimal place.
    pub remaining_term_years: Decimal,
    pub payments_already_made: u32,
    pub is_already_paid_off: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the baseline and accelerated schedules as of `as_of`.
pub fn compute_scenario(input: &ScenarioInput, as_of: NaiveDate) -> PayoffResult<ScenarioResult> {
    input.validate()?;

    let loan = &input.loan;
    let monthly_rate = loan.monthly_rate();
    let term_months = loan.term_months();
    let monthly_payment = annuity_payment(loan.principal, monthly_rate, term_months)?;

    let months_elapsed = months_between(loan.start_date, as_of);

    if loan.start_date <= as_of && months_elapsed >= i64::from(term_months) {
        tracing::debug!(
            months_elapsed,
            term_months,
            "loan term has fully elapsed; treating as paid off"
        );
        return Ok(paid_off(loan, monthly_payment, months_elapsed));
    }

    // Roll an in-progress loan forward to today's balance.
    let (current_balance, remaining_months, payments_made, anchor) =
        if months_elapsed > 0 && months_elapsed < i64::from(term_months) {
            let elapsed = months_elapsed as u32;
            let history = simulate(
                loan.principal,
                monthly_rate,
                monthly_payment,
                elapsed,
                loan.start_date,
            )?;
            let balance = history
                .last()
                .map(|p| p.remaining_balance)
                .unwrap_or(loan.principal);
            (balance, term_months - elapsed, elapsed, as_of)
        } else {
            (loan.principal, term_months, 0, loan.start_date)
        };

    let baseline_schedule = simulate(
        current_balance,
        monthly_rate,
        monthly_payment,
        remaining_months,
        anchor,
    )?;
    let accelerated_payment = monthly_payment
        .checked_add(input.additional_monthly_payment)
        .ok_or_else(|| PayoffError::InvalidInput {
            field: "additional_monthly_payment".into(),
            reason: "Please enter a valid additional payment amount".into(),
        })?;
    let accelerated_schedule = simulate(
        current_balance,
        monthly_rate,
        accelerated_payment,
        remaining_months,
        anchor,
    )?;

    let baseline_total_interest = total_interest(&baseline_schedule)?;
    let accelerated_total_interest = total_interest(&accelerated_schedule)?;

    let baseline_payoff_date = payoff_date(&baseline_schedule).unwrap_or(anchor);
    let accelerated_payoff_date = payoff_date(&accelerated_schedule).unwrap_or(anchor);
    let months_saved = months_between(accelerated_payoff_date, baseline_payoff_date).max(0) as u32;

    tracing::debug!(
        payments_made,
        remaining_months,
        baseline_len = baseline_schedule.len(),
        accelerated_len = accelerated_schedule.len(),
        months_saved,
        "computed payoff scenario"
    );

    Ok(ScenarioResult {
        baseline_schedule,
        accelerated_schedule,
        monthly_payment,
        baseline_total_interest,
        accelerated_total_interest,
        interest_saved: baseline_total_interest - accelerated_total_interest,
        months_saved,
        baseline_payoff_date,
        accelerated_payoff_date,
        current_balance,
        remaining_term_years: years_one_decimal(remaining_months),
        payments_already_made: payments_made,
        is_already_paid_off: false,
    })
}

/// [`compute_scenario`] wrapped in the standard output envelope.
pub fn analyze_scenario(
    input: &ScenarioInput,
    as_of: NaiveDate,
) -> PayoffResult<ComputationOutput<ScenarioResult>> {
    let start = Instant::now();
    let result = compute_scenario(input, as_of)?;

    let mut warnings = Vec::new();
    if result.is_already_paid_off {
        warnings.push(format!(
            "Loan started {} and its {}-year term has elapsed as of {}; no payments remain",
            input.loan.start_date, input.loan.term_years, as_of
        ));
    }
    if input.loan.start_date > as_of {
        warnings.push(format!(
            "Start date {} is after the evaluation date {}; schedules begin at the start date",
            input.loan.start_date, as_of
        ));
    }
    if input.additional_monthly_payment > result.current_balance && !result.is_already_paid_off {
        warnings.push(
            "Additional payment exceeds the outstanding balance; loan clears in the first month"
                .to_string(),
        );
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-rate amortization with additional principal",
        input,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn paid_off(loan: &LoanTerms, monthly_payment: Money, months_elapsed: i64) -> ScenarioResult {
    ScenarioResult {
        baseline_schedule: Vec::new(),
        accelerated_schedule: Vec::new(),
        monthly_payment,
        baseline_total_interest: Decimal::ZERO,
        accelerated_total_interest: Decimal::ZERO,
        interest_saved: Decimal::ZERO,
        months_saved: 0,
        baseline_payoff_date: loan.start_date,
        accelerated_payoff_date: loan.start_date,
        current_balance: Decimal::ZERO,
        remaining_term_years: Decimal::ZERO,
        payments_already_made: u32::try_from(months_elapsed).unwrap_or(u32::MAX),
        is_already_paid_off: true,
    }
}

fn years_one_decimal(months: u32) -> Decimal {
    (Decimal::from(months) / dec!(12))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
