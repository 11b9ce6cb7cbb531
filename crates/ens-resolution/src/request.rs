//! Inbound resolution request

use serde::{Deserialize, Serialize};

/// Name to resolve, optionally pinned to a single endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    /// Raw, unnormalized name
    pub name: String,
    /// Endpoint URL that replaces the default provider list entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_override: Option<String>,
}

impl ResolveRequest {
    /// Request against the default providers
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider_override: None,
        }
    }

    /// Pin the request to one endpoint
    pub fn with_provider_override(mut self, url: impl Into<String>) -> Self {
        self.provider_override = Some(url.into());
        self
    }
}
