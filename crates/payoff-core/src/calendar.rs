//! Month arithmetic for payment dating.
//!
//! Day-of-month policy: advancing by whole months clamps to the last day of
//! a shorter target month (Jan 31 + 1 month = Feb 28/29), and offsets are
//! always taken from the anchor date, so Jan 31 + 2 months is Mar 31.
//! Elapsed months compare year and month only.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::PayoffError;
use crate::PayoffResult;

/// `anchor` advanced by `months` calendar months, clamping the day.
pub fn add_months(anchor: NaiveDate, months: u32) -> PayoffResult<NaiveDate> {
    anchor
        .checked_add_months(Months::new(months))
        .ok_or_else(|| PayoffError::DateError(format!("{anchor} + {months} months is out of range")))
}

/// Whole months from `from` to `to`, ignoring the day. Negative when `to`
/// precedes `from`.
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to.year() as i64 - from.year() as i64) * 12 + (to.month() as i64 - from.month() as i64)
}
