//! Transport seam between the registry client and the network

use crate::error::TransportResult;
use crate::Provider;
use async_trait::async_trait;
use ens_core::Address;

/// Executes read-only contract calls against one provider
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// `eth_call` with `to` and `data` at the latest block; returns raw return data
    async fn eth_call(
        &self,
        provider: &Provider,
        to: Address,
        data: &[u8],
    ) -> TransportResult<Vec<u8>>;
}
