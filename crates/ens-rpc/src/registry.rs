//! Registry query client
//!
//! One attempt against one provider is two dependent reads:
//! 1. `resolver(node)` on the registry; zero means the name is not registered
//! 2. `addr(node)` on that resolver; zero means no address record
//!
//! Each read is bounded by the provider timeout and retried on transport
//! failure up to the provider's retry budget. Definitive answers are never
//! retried.

use crate::abi::{self, ADDR_SELECTOR, RESOLVER_SELECTOR};
use crate::error::{AttemptError, ReadStage, TransportError};
use crate::{CancelToken, Provider, RpcTransport};
use ens_core::{Address, Node};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Well-known registry contract (same address on mainnet and testnets)
pub const ENS_REGISTRY: Address = Address::from_bytes([
    0x00, 0x00, 0x00, 0x00, 0x00, 0x0c, 0x2e, 0x07, 0x4e, 0xc6, 0x9a, 0x0d, 0xfb, 0x29, 0x97,
    0xba, 0x6c, 0x7d, 0x2e, 0x1e,
]);

/// Base backoff between retries of the same read
const RETRY_BACKOFF_MS: u64 = 100;
/// Cap on the backoff exponent
const MAX_BACKOFF_SHIFT: u32 = 6;

impl ReadStage {
    fn selector(self) -> [u8; 4] {
        match self {
            Self::Resolver => RESOLVER_SELECTOR,
            Self::Addr => ADDR_SELECTOR,
        }
    }
}

/// Performs resolution attempts against single providers
#[derive(Clone)]
pub struct RegistryClient {
    transport: Arc<dyn RpcTransport>,
    registry: Address,
}

impl RegistryClient {
    /// Create client against the well-known registry
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self {
            transport,
            registry: ENS_REGISTRY,
        }
    }

    /// Use a different registry contract
    pub fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    /// Registry contract in use
    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Run one full attempt: resolver lookup, then address lookup
    pub async fn attempt(
        &self,
        provider: &Provider,
        node: &Node,
        cancel: &CancelToken,
    ) -> Result<Address, AttemptError> {
        let resolver = self.resolver(provider, node, cancel).await?;
        self.addr(provider, resolver, node, cancel).await
    }

    /// Look up the resolver responsible for `node`
    pub async fn resolver(
        &self,
        provider: &Provider,
        node: &Node,
        cancel: &CancelToken,
    ) -> Result<Address, AttemptError> {
        let resolver = self
            .read(provider, ReadStage::Resolver, self.registry, node, cancel)
            .await?;

        if resolver.is_zero() {
            debug!("No resolver for {} on {}", node, provider);
            return Err(AttemptError::NameNotFound {
                provider: provider.name.clone(),
            });
        }

        debug!("Resolver for {} on {}: {}", node, provider, resolver);
        Ok(resolver)
    }

    /// Ask `resolver` for the address of `node`
    pub async fn addr(
        &self,
        provider: &Provider,
        resolver: Address,
        node: &Node,
        cancel: &CancelToken,
    ) -> Result<Address, AttemptError> {
        let address = self
            .read(provider, ReadStage::Addr, resolver, node, cancel)
            .await?;

        if address.is_zero() {
            debug!("Resolver {} has no address for {} on {}", resolver, node, provider);
            return Err(AttemptError::NoAddressSet {
                provider: provider.name.clone(),
                resolver,
            });
        }

        Ok(address)
    }

    /// One read with timeout, retry budget and cancellation
    async fn read(
        &self,
        provider: &Provider,
        stage: ReadStage,
        to: Address,
        node: &Node,
        cancel: &CancelToken,
    ) -> Result<Address, AttemptError> {
        let data = abi::encode_node_call(stage.selector(), node);
        let mut attempts = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(AttemptError::Cancelled);
            }

            debug!("{} via {} (try {}/{})", stage, provider, attempts + 1, provider.retries + 1);

            let call = tokio::time::timeout(
                provider.timeout,
                self.transport.eth_call(provider, to, &data),
            );
            let result = tokio::select! {
                res = call => match res {
                    Ok(inner) => inner,
                    Err(_) => Err(TransportError::Timeout(provider.timeout)),
                },
                _ = cancel.cancelled() => return Err(AttemptError::Cancelled),
            };

            match result.and_then(|bytes| abi::decode_address(&bytes)) {
                Ok(address) => return Ok(address),
                Err(e) if attempts < provider.retries => {
                    attempts += 1;
                    let backoff = Duration::from_millis(
                        RETRY_BACKOFF_MS * (1u64 << attempts.min(MAX_BACKOFF_SHIFT)),
                    );
                    warn!(
                        "{} via {} failed (attempt {}/{}), retrying in {:?}: {}",
                        stage,
                        provider,
                        attempts,
                        provider.retries + 1,
                        backoff,
                        e
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = cancel.cancelled() => return Err(AttemptError::Cancelled),
                    }
                }
                Err(e) => {
                    return Err(AttemptError::ProviderUnavailable {
                        provider: provider.name.clone(),
                        stage,
                        source: e,
                    })
                }
            }
        }
    }
}
