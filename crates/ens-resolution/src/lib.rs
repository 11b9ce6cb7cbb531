//! Name resolution for registry names
//!
//! Resolves a name such as `vitalik.eth` to an account address by walking an
//! ordered list of JSON-RPC providers and returning the first answer.
//!
//! ```no_run
//! use ens_resolution::{ResolveRequest, Resolver, ResolverConfig};
//!
//! # async fn run() -> ens_resolution::Result<()> {
//! let resolver = Resolver::with_http(ResolverConfig::default())?;
//! let resolution = resolver.resolve(&ResolveRequest::new("vitalik.eth")).await?;
//! println!("{}", resolution.address);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod request;
pub mod resolver;

pub use config::{ProviderSettings, ResolverConfig, DEFAULT_PROVIDERS};
pub use error::{Error, ProviderFailure, Result};
pub use request::ResolveRequest;
pub use resolver::{Resolution, Resolver};

pub use ens_core::{namehash, normalize, Address, Node, NormalizedName};
pub use ens_rpc::{AttemptError, CancelToken, Provider, ReadStage, TransportError};
