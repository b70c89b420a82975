//! Error taxonomy for rate lookups

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    /// The local snapshot could not be read or parsed.
    #[error("snapshot source '{path}' is unavailable: {reason}")]
    SourceUnavailable { path: String, reason: String },

    /// A single provider round trip failed.
    #[error("failed to fetch rates for base {base}: {cause}")]
    FetchFailed { base: String, cause: String },

    /// The requested window cannot be served as a series of days.
    #[error("history window of {days} days is not supported: {reason}")]
    InvalidWindow { days: usize, reason: String },

    /// Caller input could not be turned into a currency code.
    #[error("invalid base currency: '{input}'")]
    InvalidBase { input: String },
}

impl RateError {
    pub fn fetch_failed(base: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        RateError::FetchFailed {
            base: base.into(),
            cause: cause.to_string(),
        }
    }

    pub fn invalid_window(days: usize, reason: impl Into<String>) -> Self {
        RateError::InvalidWindow {
            days,
            reason: reason.into(),
        }
    }
}
