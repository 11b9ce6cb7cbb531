//! Resolver configuration
//!
//! The default provider list is an explicit value handed to the resolver,
//! never ambient state, so tests and callers can substitute their own.

use crate::{Error, Result};
use ens_core::Address;
use ens_rpc::{Provider, DEFAULT_READ_TIMEOUT, DEFAULT_RETRIES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable holding a comma-separated provider URL list
pub const RPC_URLS_ENV: &str = "ENS_RPC_URLS";

/// Built-in public providers, in priority order
pub const DEFAULT_PROVIDERS: &[(&str, &str)] = &[
    ("Cloudflare", "https://cloudflare-eth.com"),
    ("LlamaNodes", "https://eth.llamarpc.com"),
    ("PublicNode", "https://ethereum-rpc.publicnode.com"),
    ("Ankr", "https://rpc.ankr.com/eth"),
];

/// One provider entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Endpoint URL
    pub url: String,
    /// Display name (defaults to the URL host)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-read timeout override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Retry budget override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,
}

impl ProviderSettings {
    /// Entry with defaults for everything but the URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            timeout_ms: None,
            retries: None,
        }
    }
}

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Providers in priority order
    pub providers: Vec<ProviderSettings>,
    /// Per-read timeout for entries without their own
    #[serde(default = "default_timeout_ms")]
    pub default_timeout_ms: u64,
    /// Retry budget for entries without their own
    #[serde(default = "default_retries")]
    pub default_retries: u32,
    /// Registry contract override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Address>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_READ_TIMEOUT.as_millis() as u64
}

fn default_retries() -> u32 {
    DEFAULT_RETRIES
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            providers: DEFAULT_PROVIDERS
                .iter()
                .map(|(name, url)| ProviderSettings {
                    name: Some(name.to_string()),
                    ..ProviderSettings::new(*url)
                })
                .collect(),
            default_timeout_ms: default_timeout_ms(),
            default_retries: default_retries(),
            registry: None,
        }
    }
}

impl ResolverConfig {
    /// Configuration with the given provider URLs and default read discipline
    pub fn with_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            providers: urls.into_iter().map(ProviderSettings::new).collect(),
            ..Self::default()
        }
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading resolver config from {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Replace the provider list with `ENS_RPC_URLS` when set
    pub fn with_env_overrides(self) -> Self {
        self.with_url_list(std::env::var(RPC_URLS_ENV).ok().as_deref())
    }

    /// Replace the provider list with a comma-separated URL list, if non-blank
    pub fn with_url_list(mut self, list: Option<&str>) -> Self {
        let Some(list) = list else {
            return self;
        };
        let urls: Vec<ProviderSettings> = list
            .split(',')
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(ProviderSettings::new)
            .collect();
        if !urls.is_empty() {
            debug!("Provider list overridden with {} URLs", urls.len());
            self.providers = urls;
        }
        self
    }

    /// Check URLs and timeouts
    ///
    /// An empty provider list is allowed here; resolution reports it.
    pub fn validate(&self) -> Result<()> {
        if self.default_timeout_ms == 0 {
            return Err(Error::Config("default_timeout_ms must be > 0".to_string()));
        }
        for entry in &self.providers {
            if !(entry.url.starts_with("http://") || entry.url.starts_with("https://")) {
                return Err(Error::Config(format!(
                    "provider URL must be http(s): {}",
                    entry.url
                )));
            }
            if entry.timeout_ms == Some(0) {
                return Err(Error::Config(format!(
                    "timeout_ms must be > 0 for {}",
                    entry.url
                )));
            }
        }
        Ok(())
    }

    /// Providers in priority order
    pub fn providers(&self) -> Vec<Provider> {
        self.providers.iter().map(|entry| self.provider(entry)).collect()
    }

    /// Provider for an ad-hoc URL using the default read discipline
    pub fn provider_for_url(&self, url: &str) -> Provider {
        self.provider(&ProviderSettings::new(url))
    }

    fn provider(&self, entry: &ProviderSettings) -> Provider {
        let mut provider = Provider::new(entry.url.clone())
            .with_timeout(Duration::from_millis(
                entry.timeout_ms.unwrap_or(self.default_timeout_ms),
            ))
            .with_retries(entry.retries.unwrap_or(self.default_retries));
        if let Some(name) = &entry.name {
            provider = provider.with_name(name.clone());
        }
        provider
    }
}
