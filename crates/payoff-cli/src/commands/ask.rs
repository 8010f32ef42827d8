use clap::Args;
use serde_json::{json, Value};

use payoff_core::query::{interpret, MortgageSnapshot};
use payoff_core::relay::{RelayAnswer, RelayClient, RelayConfig};

use super::loan::LoanArgs;

/// Arguments for a plain-language question
#[derive(Args)]
pub struct AskArgs {
    /// The question, e.g. "How much sooner if I add $300 per month?"
    pub question: String,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Send the question to the chat relay first (PAYOFF_API_URL)
    #[arg(long)]
    pub remote: bool,
}

/// Arguments for the relay health check
#[derive(Args)]
pub struct HealthArgs {
    /// Relay base URL (defaults to PAYOFF_API_URL)
    #[arg(long)]
    pub url: Option<String>,
}

pub fn run_ask(args: AskArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let as_of = args.loan.as_of();
    let snapshot = args
        .loan
        .optional_scenario_input()?
        .map(|input| MortgageSnapshot::from(&input));

    if !args.remote {
        return Ok(json!({
            "answer": interpret(&args.question, snapshot.as_ref(), as_of),
            "source": "local",
        }));
    }

    let client = RelayClient::new(RelayConfig::from_env())?;
    let answer = client.ask(&args.question, snapshot.as_ref(), as_of);
    Ok(match answer {
        RelayAnswer::Remote(reply) => json!({
            "answer": reply.response,
            "source": "remote",
            "model": reply.model,
            "tokens": reply.tokens,
        }),
        RelayAnswer::Local { text, reason } => json!({
            "answer": text,
            "source": "local",
            "fallback_reason": reason,
        }),
    })
}

pub fn run_health(args: HealthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut config = RelayConfig::from_env();
    if let Some(url) = args.url {
        config.base_url = url;
    }
    let client = RelayClient::new(config)?;
    let health = client.health()?;
    Ok(serde_json::to_value(health)?)
}
