//! Core primitives for registry name resolution
//!
//! Name normalization, namehash derivation and the fixed-size value types
//! (`Node`, `Address`) shared by the RPC and resolution layers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod namehash;
pub mod normalize;
pub mod types;

pub use error::{Error, Result};
pub use namehash::{keccak256, labelhash, namehash};
pub use normalize::{normalize, NormalizedName};
pub use types::{Address, Node};
