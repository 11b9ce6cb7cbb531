//! Scripted in-memory transport for tests
//!
//! Replies are scripted per provider URL and per read (`resolver` or
//! `addr`). A scripted sequence is consumed in order and its last reply
//! repeats. Every call is recorded so tests can assert on order and count.

use crate::abi::{self, ADDR_SELECTOR, RESOLVER_SELECTOR};
use crate::error::{TransportError, TransportResult};
use crate::{Provider, RpcTransport};
use async_trait::async_trait;
use ens_core::{Address, Node};
use parking_lot::Mutex;
use std::collections::HashMap;

/// Scripted reply to one read
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this address
    Address(Address),
    /// Return the zero address
    Zero,
    /// Fail with this transport error
    Fail(TransportError),
    /// Return undecodable data
    Malformed,
    /// Never answer (exercises timeouts)
    Hang,
}

/// One recorded `eth_call`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Provider URL
    pub provider: String,
    /// Contract called
    pub to: Address,
    /// Function selector
    pub selector: [u8; 4],
    /// Node argument
    pub node: Node,
}

#[derive(Default)]
struct Script {
    replies: Vec<MockReply>,
    served: usize,
}

impl Script {
    fn next(&mut self) -> Option<MockReply> {
        let reply = self
            .replies
            .get(self.served)
            .or_else(|| self.replies.last())
            .cloned();
        self.served += 1;
        reply
    }
}

/// In-memory transport with scripted replies and a call log
#[derive(Default)]
pub struct MockTransport {
    scripts: Mutex<HashMap<(String, [u8; 4]), Script>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    /// Create transport with no scripts; unscripted reads fail with a connection error
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the `resolver` read for a provider URL
    pub fn with_resolver(self, url: &str, reply: MockReply) -> Self {
        self.with_resolver_sequence(url, vec![reply])
    }

    /// Script the `addr` read for a provider URL
    pub fn with_addr(self, url: &str, reply: MockReply) -> Self {
        self.with_addr_sequence(url, vec![reply])
    }

    /// Script successive `resolver` replies for a provider URL
    pub fn with_resolver_sequence(self, url: &str, replies: Vec<MockReply>) -> Self {
        self.insert(url, RESOLVER_SELECTOR, replies);
        self
    }

    /// Script successive `addr` replies for a provider URL
    pub fn with_addr_sequence(self, url: &str, replies: Vec<MockReply>) -> Self {
        self.insert(url, ADDR_SELECTOR, replies);
        self
    }

    /// Script a provider that resolves every name to `target`
    pub fn with_working_provider(self, url: &str, resolver: Address, target: Address) -> Self {
        self.with_resolver(url, MockReply::Address(resolver))
            .with_addr(url, MockReply::Address(target))
    }

    fn insert(&self, url: &str, selector: [u8; 4], replies: Vec<MockReply>) {
        self.scripts.lock().insert(
            (url.to_string(), selector),
            Script {
                replies,
                served: 0,
            },
        );
    }

    /// All calls so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Provider URLs in the order they were first contacted
    pub fn providers_contacted(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for call in self.calls.lock().iter() {
            if !seen.contains(&call.provider) {
                seen.push(call.provider.clone());
            }
        }
        seen
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn eth_call(
        &self,
        provider: &Provider,
        to: Address,
        data: &[u8],
    ) -> TransportResult<Vec<u8>> {
        if data.len() != 4 + abi::WORD {
            return Err(TransportError::Malformed(format!(
                "unexpected calldata length {}",
                data.len()
            )));
        }
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&data[..4]);
        let mut node = [0u8; 32];
        node.copy_from_slice(&data[4..]);

        self.calls.lock().push(RecordedCall {
            provider: provider.url.clone(),
            to,
            selector,
            node: Node::from_bytes(node),
        });

        let reply = self
            .scripts
            .lock()
            .get_mut(&(provider.url.clone(), selector))
            .and_then(Script::next);

        match reply {
            Some(MockReply::Address(address)) => Ok(abi::encode_address(&address)),
            Some(MockReply::Zero) => Ok(abi::encode_address(&Address::ZERO)),
            Some(MockReply::Fail(e)) => Err(e),
            Some(MockReply::Malformed) => Ok(vec![0xff; 3]),
            Some(MockReply::Hang) => std::future::pending().await,
            None => Err(TransportError::Connection(format!(
                "connection refused: {}",
                provider.url
            ))),
        }
    }
}
