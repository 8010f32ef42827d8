use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use payoff_core::amortization::scenario::ScenarioInput;
use payoff_core::LoanTerms;

use crate::input;

/// Loan terms shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Original loan amount (e.g. 300000)
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Additional principal paid every month
    #[arg(long, alias = "additional-payment")]
    pub extra: Option<Decimal>,

    /// Date of the first payment (YYYY-MM-DD); defaults to the evaluation date
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Evaluation date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

impl LoanArgs {
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub fn has_flags(&self) -> bool {
        self.principal.is_some() || self.rate.is_some() || self.term.is_some()
    }

    /// Scenario from `--input`, piped JSON, or flags, in that order.
    pub fn scenario_input(&self) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::file::read_json(path);
        }
        if !self.has_flags() {
            if let Some(piped) = input::stdin::read_stdin()? {
                return Ok(piped);
            }
        }
        self.build_from_flags()
    }

    fn build_from_flags(&self) -> Result<ScenarioInput, Box<dyn std::error::Error>> {
        Ok(ScenarioInput {
            loan: LoanTerms {
                principal: self
                    .principal
                    .ok_or("--principal is required (or provide --input)")?,
                annual_rate_percent: self
                    .rate
                    .ok_or("--rate is required (or provide --input)")?,
                term_years: self.term.ok_or("--term is required (or provide --input)")?,
                start_date: self.start.unwrap_or_else(|| self.as_of()),
            },
            additional_monthly_payment: self.extra.unwrap_or(dec!(0)),
        })
    }

    /// Loan context for questions; `None` when no terms were given.
    pub fn optional_scenario_input(
        &self,
    ) -> Result<Option<ScenarioInput>, Box<dyn std::error::Error>> {
        if self.input.is_some() || self.has_flags() {
            return self.scenario_input().map(Some);
        }
        Ok(None)
    }
}
