//! Minimal ABI codec for `resolver(bytes32)` and `addr(bytes32)`

use crate::error::{TransportError, TransportResult};
use ens_core::{keccak256, Address, Node};

/// Selector of `resolver(bytes32)`
pub const RESOLVER_SELECTOR: [u8; 4] = [0x01, 0x78, 0xb8, 0xbf];
/// Selector of `addr(bytes32)`
pub const ADDR_SELECTOR: [u8; 4] = [0x3b, 0x3b, 0x57, 0xde];

/// ABI word size
pub const WORD: usize = 32;

/// First four bytes of the keccak hash of a function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Calldata for a single-`bytes32` function: selector ++ node
pub fn encode_node_call(selector: [u8; 4], node: &Node) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&selector);
    data.extend_from_slice(node.as_bytes());
    data
}

/// Decode an `address` return value from the first ABI word
///
/// The 12 padding bytes must be zero.
pub fn decode_address(data: &[u8]) -> TransportResult<Address> {
    if data.len() < WORD {
        return Err(TransportError::Malformed(format!(
            "expected at least {} bytes of return data, got {}",
            WORD,
            data.len()
        )));
    }

    let (padding, tail) = data[..WORD].split_at(12);
    if padding.iter().any(|b| *b != 0) {
        return Err(TransportError::Malformed(format!(
            "address word has non-zero padding: 0x{}",
            hex::encode(&data[..WORD])
        )));
    }

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(tail);
    Ok(Address::from_bytes(bytes))
}

/// Encode an address as a return word (used by test transports)
pub fn encode_address(address: &Address) -> Vec<u8> {
    let mut word = vec![0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}
