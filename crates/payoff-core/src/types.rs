use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::PayoffResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.005 = 0.5% per period). Never as percentages.
pub type Rate = Decimal;

/// Fixed-rate mortgage terms as entered by the borrower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount.
    pub principal: Money,
    /// Nominal annual rate as a percentage (6.5 = 6.5%).
    pub annual_rate_percent: Decimal,
    /// Original term in whole years.
    pub term_years: u32,
    /// Date of the first scheduled payment.
    pub start_date: NaiveDate,
}

impl LoanTerms {
    pub fn validate(&self) -> PayoffResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(PayoffError::InvalidInput {
                field: "principal".into(),
                reason: "Please enter a valid loan amount".into(),
            });
        }
        if self.annual_rate_percent <= Decimal::ZERO {
            return Err(PayoffError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Please enter a valid interest rate".into(),
            });
        }
        if self.term_years == 0 || self.term_years.checked_mul(12).is_none() {
            return Err(PayoffError::InvalidInput {
                field: "term_years".into(),
                reason: "Please enter a valid loan term".into(),
            });
        }
        Ok(())
    }

    /// Periodic rate: annual percent / 100 / 12.
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate_percent / dec!(100) / dec!(12)
    }

    /// Number of monthly payments; saturates for terms `validate` rejects.
    pub fn term_months(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
