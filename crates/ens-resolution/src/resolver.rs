//! Provider fallback orchestration
//!
//! Providers are tried strictly in order and one at a time. The first
//! success is authoritative; every failure, including "not found" and
//! "no address", is recorded and the next provider is tried.

use crate::error::ProviderFailure;
use crate::{Error, ResolveRequest, ResolverConfig, Result};
use ens_core::{namehash, normalize, Address, Node, NormalizedName};
use ens_rpc::{AttemptError, CancelToken, HttpTransport, Provider, RegistryClient, RpcTransport};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Successful resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Normalized name
    pub name: String,
    /// Registry node of the name
    pub node: Node,
    /// Resolved address
    pub address: Address,
    /// Provider that answered
    pub provider: String,
    /// Providers that failed before the answer, in order
    #[serde(skip)]
    pub failures: Vec<ProviderFailure>,
}

/// Result of resolving a node, before it is tied back to a name
struct NodeResolution {
    address: Address,
    provider: String,
    failures: Vec<ProviderFailure>,
}

/// Name resolver
///
/// Holds only immutable configuration and the transport, so one instance
/// can serve concurrent resolution calls.
pub struct Resolver {
    client: RegistryClient,
    config: ResolverConfig,
}

impl Resolver {
    /// Create resolver over any transport
    pub fn new(transport: Arc<dyn RpcTransport>, config: ResolverConfig) -> Self {
        info!(
            "Creating resolver with {} default providers",
            config.providers.len()
        );

        let mut client = RegistryClient::new(transport);
        if let Some(registry) = config.registry {
            info!("Using registry override {}", registry);
            client = client.with_registry(registry);
        }

        Self { client, config }
    }

    /// Create resolver over HTTP JSON-RPC
    pub fn with_http(config: ResolverConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new()?), config))
    }

    /// Current configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Providers a request will use: the override alone, or the defaults
    pub fn providers_for(&self, request: &ResolveRequest) -> Vec<Provider> {
        match &request.provider_override {
            Some(url) => vec![self.config.provider_for_url(url)],
            None => self.config.providers(),
        }
    }

    /// Resolve a request
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<Resolution> {
        self.resolve_with_cancel(request, &CancelToken::new()).await
    }

    /// Resolve a request, abandoning it when `cancel` fires
    pub async fn resolve_with_cancel(
        &self,
        request: &ResolveRequest,
        cancel: &CancelToken,
    ) -> Result<Resolution> {
        // Validate before touching any provider.
        let name = normalize(&request.name)?;
        let providers = self.providers_for(request);
        if request.provider_override.is_some() {
            debug!("Provider override set, default list bypassed");
        }
        self.resolve_normalized(&name, &providers, cancel).await
    }

    /// Resolve a raw name against an explicit provider list
    pub async fn resolve_name(
        &self,
        name: &str,
        providers: &[Provider],
        cancel: &CancelToken,
    ) -> Result<Resolution> {
        let name = normalize(name)?;
        self.resolve_normalized(&name, providers, cancel).await
    }

    async fn resolve_normalized(
        &self,
        name: &NormalizedName,
        providers: &[Provider],
        cancel: &CancelToken,
    ) -> Result<Resolution> {
        let node = namehash(name);
        debug!("Resolving {} (node {})", name, node);

        let resolved = self.resolve_node(&node, providers, cancel).await?;
        info!(
            "Resolved {} to {} via {}",
            name, resolved.address, resolved.provider
        );

        Ok(Resolution {
            name: name.to_string(),
            node,
            address: resolved.address,
            provider: resolved.provider,
            failures: resolved.failures,
        })
    }

    /// Try each provider in order until one attempt succeeds
    async fn resolve_node(
        &self,
        node: &Node,
        providers: &[Provider],
        cancel: &CancelToken,
    ) -> Result<NodeResolution> {
        if providers.is_empty() {
            return Err(Error::NoProvidersConfigured);
        }

        let mut failures: Vec<ProviderFailure> = Vec::with_capacity(providers.len());

        for (index, provider) in providers.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            debug!(
                "Trying provider {}/{}: {}",
                index + 1,
                providers.len(),
                provider
            );

            match self.client.attempt(provider, node, cancel).await {
                Ok(address) => {
                    return Ok(NodeResolution {
                        address,
                        provider: provider.name.clone(),
                        failures,
                    });
                }
                Err(AttemptError::Cancelled) => return Err(Error::Cancelled),
                Err(error) => {
                    match error.stage() {
                        Some(stage) => warn!("Provider {} failed at {}: {}", provider, stage, error),
                        None => warn!("Provider {} failed: {}", provider, error),
                    }
                    failures.push(ProviderFailure {
                        provider: provider.name.clone(),
                        error,
                    });
                }
            }
        }

        match failures.last() {
            Some(last) => Err(Error::AllProvidersExhausted {
                last: last.error.clone(),
                failures,
            }),
            None => Err(Error::NoProvidersConfigured),
        }
    }
}
