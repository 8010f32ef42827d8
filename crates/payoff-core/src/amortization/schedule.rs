//! Month-by-month amortization simulator.
//!
//! Produces a finite, ordered payment schedule for a fixed payment amount.
//! The schedule ends when the balance is repaid (within `BALANCE_EPSILON`)
//! or when the payment cap is reached, whichever comes first. All math in
//! `rust_decimal::Decimal`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calendar::add_months;
use crate::error::PayoffError;
use crate::types::{Money, Rate};
use crate::PayoffResult;

/// Balance at or below which the loan is considered fully paid.
pub const BALANCE_EPSILON: Decimal = dec!(0.01);

/// One simulated monthly payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// 1-based sequence number within the schedule.
    pub payment_number: u32,
    pub date: NaiveDate,
    /// Cash paid this month (principal + interest).
    pub payment_amount: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    /// Balance after this payment, floored at zero.
    pub remaining_balance: Money,
}

/// Simulate a level-payment schedule.
///
/// `max_months` caps the schedule length. If `payment_amount` does not cover
/// the monthly interest the balance grows and the schedule runs the full cap
/// without reaching zero.
pub fn simulate(
    principal: Money,
    monthly_rate: Rate,
    payment_amount: Money,
    max_months: u32,
    start_date: NaiveDate,
) -> PayoffResult<Vec<PaymentRecord>> {
    let mut schedule = Vec::new();
    let mut balance = principal;
    let mut payment_number: u32 = 0;

    while balance > BALANCE_EPSILON && payment_number < max_months {
        let interest = balance.checked_mul(monthly_rate).ok_or_else(precision_exceeded)?;
        let mut principal_portion = payment_amount
            .checked_sub(interest)
            .ok_or_else(precision_exceeded)?;

        // Final payment only needs to clear what is left.
        if principal_portion > balance {
            principal_portion = balance;
        }

        balance = balance
            .checked_sub(principal_portion)
            .ok_or_else(precision_exceeded)?;

        schedule.push(PaymentRecord {
            payment_number: payment_number + 1,
            date: add_months(start_date, payment_number)?,
            payment_amount: principal_portion
                .checked_add(interest)
                .ok_or_else(precision_exceeded)?,
            principal_portion,
            interest_portion: interest,
            remaining_balance: balance.max(Decimal::ZERO),
        });

        payment_number += 1;
    }

    Ok(schedule)
}

/// Sum of the interest portions of a schedule.
pub fn total_interest(schedule: &[PaymentRecord]) -> PayoffResult<Money> {
    schedule
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.interest_portion))
        .ok_or_else(precision_exceeded)
}

fn precision_exceeded() -> PayoffError {
    PayoffError::InvalidInput {
        field: "principal".into(),
        reason: "Loan balance exceeds decimal precision".into(),
    }
}

/// Date of the final payment, if any.
pub fn payoff_date(schedule: &[PaymentRecord]) -> Option<NaiveDate> {
    schedule.last().map(|p| p.date)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::annuity_payment;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn standard_rate() -> Rate {
        dec!(6.5) / dec!(100) / dec!(12)
    }

    fn standard_schedule() -> Vec<PaymentRecord> {
        let pmt = annuity_payment(dec!(300_000), standard_rate(), 360).unwrap();
        simulate(dec!(300_000), standard_rate(), pmt, 360, start()).unwrap()
    }

    #[test]
    fn test_full_term_length() {
        let s = standard_schedule();
        assert_eq!(s.len(), 360);
        assert_eq!(s[0].payment_number, 1);
        assert_eq!(s[359].payment_number, 360);
    }

    #[test]
    fn test_final_balance_cleared() {
        let s = standard_schedule();
        assert!(s.last().unwrap().remaining_balance < dec!(1));
    }

    #[test]
    fn test_first_month_split() {
        let s = standard_schedule();
        // 300,000 * 0.065 / 12 = 1,625.00 interest
        assert_eq!(s[0].interest_portion.round_dp(2), dec!(1625.00));
        assert_eq!(
            s[0].principal_portion + s[0].interest_portion,
            s[0].payment_amount
        );
    }

    #[test]
    fn test_dates_advance_monthly() {
        let s = standard_schedule();
        assert_eq!(s[0].date, start());
        assert_eq!(s[1].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(s[12].date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(
            payoff_date(&s),
            Some(NaiveDate::from_ymd_opt(2053, 12, 1).unwrap())
        );
    }

    #[test]
    fn test_month_end_start_clamps() {
        let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let s = simulate(dec!(1000), dec!(0.01), dec!(100), 3, jan31).unwrap();
        assert_eq!(s[1].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(s[2].date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_balance_monotonically_decreasing() {
        let s = standard_schedule();
        for w in s.windows(2) {
            assert!(w[1].remaining_balance <= w[0].remaining_balance);
        }
    }

    #[test]
    fn test_overpayment_terminates_early_with_partial_payment() {
        let s = simulate(dec!(1000), dec!(0.01), dec!(600), 12, start()).unwrap();
        assert_eq!(s.len(), 2);
        let last = s.last().unwrap();
        assert!(last.payment_amount < dec!(600));
        assert_eq!(last.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_insufficient_payment_runs_to_cap() {
        // Interest is 10/month; paying 5 grows the balance.
        let s = simulate(dec!(1000), dec!(0.01), dec!(5), 24, start()).unwrap();
        assert_eq!(s.len(), 24);
        assert!(s.last().unwrap().remaining_balance > dec!(1000));
    }

    #[test]
    fn test_zero_cap_is_empty() {
        let s = simulate(dec!(1000), dec!(0.01), dec!(100), 0, start()).unwrap();
        assert!(s.is_empty());
        assert_eq!(payoff_date(&s), None);
    }

    #[test]
    fn test_dust_principal_is_empty() {
        let s = simulate(dec!(0.01), dec!(0.01), dec!(100), 12, start()).unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn test_total_interest_sums_portions() {
        let s = simulate(dec!(1000), dec!(0.01), dec!(600), 12, start()).unwrap();
        let expected = s[0].interest_portion + s[1].interest_portion;
        assert_eq!(total_interest(&s).unwrap(), expected);
        assert_eq!(total_interest(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_growing_balance_overflow_is_an_error() {
        // Interest of 100% a month on a balance near Decimal::MAX.
        let r = simulate(Decimal::MAX / dec!(4), Decimal::ONE, dec!(1), 12, start());
        assert!(matches!(r, Err(PayoffError::InvalidInput { .. })));
    }
}
