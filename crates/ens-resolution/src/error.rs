//! Error types

use ens_rpc::{AttemptError, TransportError};
use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// One provider's failed attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Provider display name
    pub provider: String,
    /// Why the attempt failed
    pub error: AttemptError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Terminal resolution errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input failed normalization; no provider was contacted
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Provider list was empty
    #[error("No providers configured")]
    NoProvidersConfigured,

    /// Every provider failed
    #[error("All {} providers failed; last error: {last}", .failures.len())]
    AllProvidersExhausted {
        /// Failure of the last provider tried
        last: AttemptError,
        /// Every failure, in provider order
        failures: Vec<ProviderFailure>,
    },

    /// Caller cancelled the resolution
    #[error("Resolution cancelled")]
    Cancelled,

    /// Bad configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport could not be set up
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl Error {
    /// Per-provider failures, if any provider was tried
    pub fn failures(&self) -> &[ProviderFailure] {
        match self {
            Self::AllProvidersExhausted { failures, .. } => failures,
            _ => &[],
        }
    }

    /// Failure of the last provider tried
    pub fn last_attempt_error(&self) -> Option<&AttemptError> {
        match self {
            Self::AllProvidersExhausted { last, .. } => Some(last),
            _ => None,
        }
    }
}

impl From<ens_core::Error> for Error {
    fn from(e: ens_core::Error) -> Self {
        match e {
            ens_core::Error::InvalidName(msg) => Error::InvalidName(msg),
            other => Error::Config(other.to_string()),
        }
    }
}
