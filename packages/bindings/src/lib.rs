use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use payoff_core::amortization::chart::{balance_chart as sample_chart, DEFAULT_CHART_POINTS};
use payoff_core::amortization::scenario::{analyze_scenario, ScenarioInput, ScenarioResult};
use payoff_core::query::{self, MortgageSnapshot};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// `YYYY-MM-DD`, or the host's local date when omitted.
fn evaluation_date(as_of: Option<String>) -> NapiResult<NaiveDate> {
    match as_of {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| to_napi_error(format!("invalid asOf '{raw}': {e}"))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_scenario(input_json: String, as_of: Option<String>) -> NapiResult<String> {
    let input: ScenarioInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = analyze_scenario(&input, evaluation_date(as_of)?).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn balance_chart(result_json: String, max_points: Option<u32>) -> NapiResult<String> {
    let result: ScenarioResult = serde_json::from_str(&result_json).map_err(to_napi_error)?;
    let points = max_points.map_or(DEFAULT_CHART_POINTS, |n| n as usize);
    serde_json::to_string(&sample_chart(&result, points)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// Answers locally; `contextJson` is the relay's `mortgageData` shape.
#[napi]
pub fn interpret_query(
    query: String,
    context_json: Option<String>,
    as_of: Option<String>,
) -> NapiResult<String> {
    let context: Option<MortgageSnapshot> = context_json
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(to_napi_error)?;
    Ok(query::interpret(
        &query,
        context.as_ref(),
        evaluation_date(as_of)?,
    ))
}

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let value: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(query::format_currency(value))
}
