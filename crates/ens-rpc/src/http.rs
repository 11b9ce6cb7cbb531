//! JSON-RPC over HTTP transport

use crate::error::{TransportError, TransportResult};
use crate::{Provider, RpcTransport};
use async_trait::async_trait;
use ens_core::Address;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// HTTP JSON-RPC transport
///
/// Idle connections are not pooled: every read opens a fresh connection, so
/// nothing outlives a resolution call.
pub struct HttpTransport {
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    /// Create new transport
    pub fn new() -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| TransportError::Connection(format!("HTTP client error: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// Create transport around an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            next_id: AtomicU64::new(1),
        }
    }

    /// Call JSON-RPC method
    async fn call<P: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        provider: &Provider,
        method: &str,
        params: P,
    ) -> TransportResult<R> {
        #[derive(Serialize)]
        struct RpcRequest<'a, P> {
            jsonrpc: &'static str,
            id: u64,
            method: &'a str,
            params: P,
        }

        #[derive(Deserialize)]
        struct RpcResponse<R> {
            result: Option<R>,
            error: Option<RpcErrorObject>,
        }

        #[derive(Deserialize)]
        struct RpcErrorObject {
            code: i64,
            message: String,
        }

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(&provider.url)
            .timeout(provider.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout(provider.timeout)
                } else {
                    TransportError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(TransportError::Http(format!("status {}", response.status())));
        }

        let body: RpcResponse<R> = response
            .json()
            .await
            .map_err(|e| TransportError::Malformed(format!("JSON decode error: {}", e)))?;

        if let Some(error) = body.error {
            return Err(TransportError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        body.result
            .ok_or_else(|| TransportError::Malformed("response has neither result nor error".to_string()))
    }
}

#[derive(Serialize)]
struct CallObject {
    to: String,
    data: String,
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn eth_call(
        &self,
        provider: &Provider,
        to: Address,
        data: &[u8],
    ) -> TransportResult<Vec<u8>> {
        let call = CallObject {
            to: to.to_hex_lower(),
            data: format!("0x{}", hex::encode(data)),
        };

        debug!("eth_call to {} via {}", call.to, provider);

        let result: String = self.call(provider, "eth_call", (call, "latest")).await?;
        decode_hex_result(&result)
    }
}

fn decode_hex_result(result: &str) -> TransportResult<Vec<u8>> {
    let digits = result
        .strip_prefix("0x")
        .ok_or_else(|| TransportError::Malformed(format!("result is not 0x-prefixed: {}", result)))?;
    hex::decode(digits).map_err(|e| TransportError::Malformed(format!("invalid hex result: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_result() {
        assert_eq!(decode_hex_result("0x").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_hex_result("0x0a0b").unwrap(), vec![0x0a, 0x0b]);
        assert!(decode_hex_result("0a0b").is_err());
        assert!(decode_hex_result("0xzz").is_err());
    }

    #[test]
    fn test_eth_call_params_shape() {
        let call = CallObject {
            to: "0x00000000000c2e074ec69a0dfb2997ba6c7d2e1e".to_string(),
            data: "0x0178b8bf".to_string(),
        };
        let json = serde_json::to_value((call, "latest")).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"to": "0x00000000000c2e074ec69a0dfb2997ba6c7d2e1e", "data": "0x0178b8bf"},
                "latest"
            ])
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let transport = HttpTransport::new().unwrap();
        // port 9 (discard) on localhost is closed on test machines
        let provider = Provider::new("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let err = transport
            .eth_call(&provider, Address::ZERO, &[0u8; 4])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connection(_) | TransportError::Timeout(_)
        ));
    }
}
