use clap::Args;
use serde_json::Value;

use payoff_core::amortization::chart::{balance_chart, DEFAULT_CHART_POINTS};
use payoff_core::amortization::scenario::{analyze_scenario, compute_scenario};

use super::loan::LoanArgs;

/// Arguments for a baseline vs. accelerated payoff comparison
#[derive(Args)]
pub struct ScenarioArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Arguments for printing a month-by-month schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Print the schedule with the additional payment applied
    #[arg(long)]
    pub accelerated: bool,
}

/// Arguments for the down-sampled balance chart
#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Maximum number of sampled points per curve
    #[arg(long, default_value_t = DEFAULT_CHART_POINTS)]
    pub points: usize,
}

pub fn run_scenario(args: ScenarioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = args.loan.scenario_input()?;
    let result = analyze_scenario(&input, args.loan.as_of())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let input = args.loan.scenario_input()?;
    let result = compute_scenario(&input, args.loan.as_of())?;
    let schedule = if args.accelerated {
        result.accelerated_schedule
    } else {
        result.baseline_schedule
    };
    Ok(serde_json::to_value(schedule)?)
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.points == 0 {
        return Err("--points must be at least 1".into());
    }
    let input = args.loan.scenario_input()?;
    let result = compute_scenario(&input, args.loan.as_of())?;
    Ok(serde_json::to_value(balance_chart(&result, args.points))?)
}
