//! Error types for ENS core primitives

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Core errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Name failed normalization
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Malformed address string
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed node string
    #[error("Invalid node: {0}")]
    InvalidNode(String),
}

impl Error {
    /// Check if this is a name validation failure
    pub fn is_invalid_name(&self) -> bool {
        matches!(self, Self::InvalidName(_))
    }
}
