//! The mortgage details a question is asked against.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::scenario::ScenarioInput;
use crate::types::{LoanTerms, Money};

/// Loan snapshot as exchanged with the chat relay.
///
/// Amounts travel as JSON numbers and `startDate` as an ISO-8601 instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageSnapshot {
    #[serde(with = "rust_decimal::serde::float")]
    pub principal: Money,
    /// Annual rate in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Term in years.
    pub term: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub additional_payment: Money,
    #[serde(with = "iso_instant")]
    pub start_date: NaiveDate,
}

impl MortgageSnapshot {
    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms {
            principal: self.principal,
            annual_rate_percent: self.rate,
            term_years: self.term,
            start_date: self.start_date,
        }
    }

    /// Scenario for these terms with a different extra payment.
    pub fn with_extra(&self, additional_monthly_payment: Money) -> ScenarioInput {
        ScenarioInput {
            loan: self.loan_terms(),
            additional_monthly_payment,
        }
    }
}

impl From<&ScenarioInput> for MortgageSnapshot {
    fn from(input: &ScenarioInput) -> Self {
        MortgageSnapshot {
            principal: input.loan.principal,
            rate: input.loan.annual_rate_percent,
            term: input.loan.term_years,
            additional_payment: input.additional_monthly_payment,
            start_date: input.loan.start_date,
        }
    }
}

/// Dates written as midnight UTC (`2024-01-01T00:00:00.000Z`); read from
/// either that form or a bare `2024-01-01`.
pub mod iso_instant {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{}T00:00:00.000Z", date.format("%Y-%m-%d")))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.date_naive())
            .map_err(|e| serde::de::Error::custom(format!("invalid startDate '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> MortgageSnapshot {
        MortgageSnapshot {
            principal: dec!(300000),
            rate: dec!(6.5),
            term: 30,
            additional_payment: dec!(200),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_serializes_camel_case_numbers() {
        let v = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(v["principal"], 300000.0);
        assert_eq!(v["rate"], 6.5);
        assert_eq!(v["term"], 30);
        assert_eq!(v["additionalPayment"], 200.0);
        assert_eq!(v["startDate"], "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_reads_iso_instant_and_plain_date() {
        let instant: MortgageSnapshot = serde_json::from_str(
            r#"{"principal":300000,"rate":6.5,"term":30,"additionalPayment":0,"startDate":"2024-01-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        let plain: MortgageSnapshot = serde_json::from_str(
            r#"{"principal":300000,"rate":6.5,"term":30,"startDate":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(instant.start_date, plain.start_date);
        assert_eq!(plain.additional_payment, Decimal::ZERO);
        assert_eq!(instant.rate, dec!(6.5));
    }

    #[test]
    fn test_rejects_garbage_date() {
        let r: Result<MortgageSnapshot, _> = serde_json::from_str(
            r#"{"principal":1,"rate":1,"term":1,"startDate":"not a date"}"#,
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_loan_terms_conversion() {
        let s = snapshot();
        let terms = s.loan_terms();
        assert_eq!(terms.principal, dec!(300000));
        assert_eq!(terms.annual_rate_percent, dec!(6.5));
        assert_eq!(terms.term_years, 30);
        let scenario = s.with_extra(dec!(50));
        assert_eq!(scenario.additional_monthly_payment, dec!(50));
        assert_eq!(MortgageSnapshot::from(&scenario).additional_payment, dec!(50));
    }
}
