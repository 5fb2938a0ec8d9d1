use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the mento-prices workspace.
///
/// This wraps argument validation errors, bad data returned by a price source,
/// source-tagged failures, store failures, and an aggregate for multi-source
/// attempts.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PriceHistoryError {
    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with returned price data (non-finite prices, negative timestamps, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "prices for CELO".
        what: String,
    },

    /// An individual price source returned an error.
    #[error("{name} failed: {msg}")]
    Source {
        /// Source name that failed.
        name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// An individual source call exceeded the configured timeout.
    #[error("price source timed out: {name}")]
    SourceTimeout {
        /// Source name that timed out.
        name: String,
    },

    /// All attempted sources failed; contains the individual failures.
    #[error("all price sources failed: {0:?}")]
    AllSourcesFailed(Vec<PriceHistoryError>),

    /// Every attempted source timed out.
    #[error("all price sources timed out")]
    AllSourcesTimedOut,

    /// The history store could not load or save state.
    #[error("store error: {0}")]
    Store(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl PriceHistoryError {
    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            name: name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(name: impl Into<String>) -> Self {
        Self::SourceTimeout { name: name.into() }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Returns true if this error is a per-source timeout.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::SourceTimeout { .. } | Self::AllSourcesTimedOut)
    }

    /// Flatten nested `AllSourcesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllSourcesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
