pub mod amortization;
pub mod calendar;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "query")]
pub mod query;

#[cfg(feature = "relay")]
pub mod relay;

pub use error::PayoffError;
pub use types::*;

/// Standard result type for all payoff operations
pub type PayoffResult<T> = Result<T, PayoffError>;
