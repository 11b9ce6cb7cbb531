//! Error types

use ens_core::Address;
use std::fmt;
use std::time::Duration;

/// Result type for single transport calls
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// Transport-level failure of one remote read
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Could not reach the endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success HTTP status
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// Error message from the node
        message: String,
    },

    /// Read exceeded the provider timeout
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// Response could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Which of the two dependent reads failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStage {
    /// `resolver(bytes32)` on the registry
    Resolver,
    /// `addr(bytes32)` on the resolver
    Addr,
}

impl fmt::Display for ReadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolver => f.write_str("resolver lookup"),
            Self::Addr => f.write_str("address lookup"),
        }
    }
}

/// Failure of one resolution attempt against one provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    /// Registry holds no resolver for the node
    #[error("Name not found: no resolver configured (via {provider})")]
    NameNotFound {
        /// Provider that answered
        provider: String,
    },

    /// Resolver exists but has no address record
    #[error("No address set: resolver {resolver} holds no address record (via {provider})")]
    NoAddressSet {
        /// Provider that answered
        provider: String,
        /// Resolver that was queried
        resolver: Address,
    },

    /// Transport failure, retry budget spent
    #[error("Provider {provider} unavailable during {stage}: {source}")]
    ProviderUnavailable {
        /// Provider that failed
        provider: String,
        /// Read that failed
        stage: ReadStage,
        /// Last transport failure
        #[source]
        source: TransportError,
    },

    /// Caller cancelled the resolution
    #[error("Cancelled")]
    Cancelled,
}

impl AttemptError {
    /// Provider answered definitively (as opposed to failing to answer)
    pub fn is_definitive(&self) -> bool {
        matches!(self, Self::NameNotFound { .. } | Self::NoAddressSet { .. })
    }

    /// Stage the attempt stopped at
    pub fn stage(&self) -> Option<ReadStage> {
        match self {
            Self::NameNotFound { .. } => Some(ReadStage::Resolver),
            Self::NoAddressSet { .. } => Some(ReadStage::Addr),
            Self::ProviderUnavailable { stage, .. } => Some(*stage),
            Self::Cancelled => None,
        }
    }
}
