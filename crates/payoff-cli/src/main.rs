mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::ask::{AskArgs, HealthArgs};
use commands::scenario::{ChartArgs, ScenarioArgs, ScheduleArgs};

/// Mortgage payoff what-if calculator
#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Mortgage payoff what-if calculator",
    long_about = "Compare a fixed-rate mortgage's standard amortization against one with \
                  extra monthly principal, print schedules and chart points, and answer \
                  plain-language questions such as \"How much sooner if I add $300?\"."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log at debug level (PAYOFF_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare the standard and accelerated payoff of a loan
    Scenario(ScenarioArgs),
    /// Print the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Down-sampled balance curves for both schedules
    Chart(ChartArgs),
    /// Ask a what-if question about the loan
    Ask(AskArgs),
    /// Check that the chat relay is reachable
    Health(HealthArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Scenario(args) => commands::scenario::run_scenario(args),
        Commands::Schedule(args) => commands::scenario::run_schedule(args),
        Commands::Chart(args) => commands::scenario::run_chart(args),
        Commands::Ask(args) => commands::ask::run_ask(args),
        Commands::Health(args) => commands::ask::run_health(args),
        Commands::Version => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
