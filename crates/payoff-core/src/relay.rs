//! Client for the remote chat relay, with a local fallback.
//!
//! One attempt is made per question. Any transport failure, non-2xx status
//! or unreadable body is answered by [`crate::query::interpret`] instead, so
//! the caller always gets text to display.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PayoffError;
use crate::query::{interpret, MortgageSnapshot};
use crate::PayoffResult;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

const UA: &str = concat!("payoff/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_query: String,
    pub mortgage_data: Option<MortgageSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default)]
    pub tokens: u64,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    #[serde(default)]
    pub openai_configured: bool,
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("relay unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("relay returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("relay response was not understood: {0}")]
    MalformedBody(#[source] reqwest::Error),
}

/// Where the displayed answer came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayAnswer {
    Remote(ChatReply),
    Local { text: String, reason: String },
}

impl RelayAnswer {
    pub fn text(&self) -> &str {
        match self {
            RelayAnswer::Remote(reply) => &reply.response,
            RelayAnswer::Local { text, .. } => text,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, RelayAnswer::Remote(_))
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        RelayConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RelayConfig {
    /// Reads `PAYOFF_API_URL` and `PAYOFF_API_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = RelayConfig::default();
        RelayConfig {
            base_url: lookup("PAYOFF_API_URL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            timeout_secs: lookup("PAYOFF_API_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct RelayClient {
    config: RelayConfig,
    http: reqwest::blocking::Client,
}

impl RelayClient {
    pub fn new(config: RelayConfig) -> PayoffResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(UA)
            .build()
            .map_err(|e| PayoffError::Relay(e.to_string()))?;
        Ok(RelayClient { config, http })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// `POST /api/chat`.
    pub fn chat(&self, request: &ChatRequest) -> Result<ChatReply, RelayError> {
        let url = self.config.endpoint("/api/chat");
        tracing::debug!(%url, has_mortgage = request.mortgage_data.is_some(), "sending chat request");

        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .map_err(RelayError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.json::<ErrorBody>().unwrap_or_default();
            let message = body
                .message
                .or(body.error)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            return Err(RelayError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let reply = resp.json::<ChatReply>().map_err(RelayError::MalformedBody)?;
        tracing::debug!(tokens = reply.tokens, model = %reply.model, "chat reply received");
        Ok(reply)
    }

    /// Ask the relay, answering locally on any failure.
    pub fn ask(
        &self,
        query: &str,
        mortgage: Option<&MortgageSnapshot>,
        as_of: NaiveDate,
    ) -> RelayAnswer {
        let request = ChatRequest {
            user_query: query.to_string(),
            mortgage_data: mortgage.cloned(),
        };

        match self.chat(&request) {
            Ok(reply) => RelayAnswer::Remote(reply),
            Err(e) => {
                tracing::warn!(error = %e, "chat relay failed; answering locally");
                RelayAnswer::Local {
                    text: interpret(query, mortgage, as_of),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// `GET /api/health`.
    pub fn health(&self) -> Result<HealthStatus, RelayError> {
        let resp = self
            .http
            .get(self.config.endpoint("/api/health"))
            .send()
            .map_err(RelayError::Transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("request failed").to_string(),
            });
        }
        resp.json::<HealthStatus>().map_err(RelayError::MalformedBody)
    }
}
