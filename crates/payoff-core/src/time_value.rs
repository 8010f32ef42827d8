use rust_decimal::Decimal;

use crate::error::PayoffError;
use crate::types::{Money, Rate};
use crate::PayoffResult;

/// Level payment that fully amortizes `principal` over `periods` at `periodic_rate`.
///
/// `payment = P * r * (1+r)^n / ((1+r)^n - 1)`; a zero rate degrades to
/// equal principal instalments.
pub fn annuity_payment(principal: Money, periodic_rate: Rate, periods: u32) -> PayoffResult<Money> {
    if periods == 0 {
        return Err(PayoffError::InvalidInput {
            field: "periods".into(),
            reason: "Number of payments must be greater than zero".into(),
        });
    }
    if periodic_rate < Decimal::ZERO {
        return Err(PayoffError::InvalidInput {
            field: "periodic_rate".into(),
            reason: "Periodic rate cannot be negative".into(),
        });
    }
    if periodic_rate.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let growth = iterative_pow(Decimal::ONE + periodic_rate, periods).ok_or_else(|| {
        PayoffError::InvalidInput {
            field: "periodic_rate".into(),
            reason: format!("Compounding {periods} periods overflows decimal precision"),
        }
    })?;
    let denom = growth - Decimal::ONE;
    if denom <= Decimal::ZERO {
        return Err(PayoffError::InvalidInput {
            field: "periodic_rate".into(),
            reason: "Rate too small to amortize at decimal precision".into(),
        });
    }

    principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(growth))
        .and_then(|v| v.checked_div(denom))
        .ok_or_else(|| PayoffError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount is too large to amortize at decimal precision".into(),
        })
}

/// Compute base^n for a non-negative integer exponent via iterative multiplication.
/// Returns `None` if an intermediate product overflows.
pub fn iterative_pow(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..n {
        result = result.checked_mul(base)?;
    }
    Some(result)
}
