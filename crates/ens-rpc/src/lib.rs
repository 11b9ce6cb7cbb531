//! Registry query layer
//!
//! Provides the JSON-RPC transport seam, the ABI codec for the two registry
//! reads, and the per-provider attempt (`resolver(node)` then `addr(node)`)
//! with per-read timeouts, a bounded retry budget and cancellation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod abi;
mod cancel;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-helpers"))]
pub mod mock;
pub mod provider;
pub mod registry;
pub mod transport;

pub use cancel::CancelToken;
pub use error::{AttemptError, ReadStage, TransportError};
pub use http::HttpTransport;
pub use provider::{Provider, DEFAULT_READ_TIMEOUT, DEFAULT_RETRIES};
pub use registry::{RegistryClient, ENS_REGISTRY};
pub use transport::RpcTransport;
