//! Namehash derivation
//!
//! `namehash("") = 0x00..00`, `namehash(label.rest) =
//! keccak256(namehash(rest) ++ keccak256(label))`. Labels are consumed from
//! the root (rightmost) to the leaf.

use crate::normalize::NormalizedName;
use crate::types::Node;
use sha3::{Digest, Keccak256};

/// Keccak-256 of arbitrary bytes
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let hash = hasher.finalize();
    let mut result = [0u8; 32];
    result.copy_from_slice(&hash);
    result
}

/// Hash of a single label
pub fn labelhash(label: &str) -> [u8; 32] {
    keccak256(label.as_bytes())
}

/// Derive the registry node for a normalized name
pub fn namehash(name: &NormalizedName) -> Node {
    fold_labels(name.as_str().rsplit('.'))
}

/// Fold labels given root-first into a node; no labels yields the root
fn fold_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Node {
    let mut node = [0u8; 32];
    for label in labels {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(&node);
        buf[32..].copy_from_slice(&labelhash(label));
        node = keccak256(&buf);
    }
    Node::from_bytes(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    fn hash_of(name: &str) -> String {
        namehash(&normalize(name).unwrap()).to_hex()
    }

    #[test]
    fn test_labelhash_eth() {
        assert_eq!(
            hex::encode(labelhash("eth")),
            "4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0"
        );
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            hash_of("eth"),
            "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae"
        );
        assert_eq!(
            hash_of("foo.eth"),
            "0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f"
        );
    }

    #[test]
    fn test_case_folded_names_share_node() {
        assert_eq!(hash_of("Foo.ETH"), hash_of("foo.eth"));
    }

    #[test]
    fn test_root_is_zero() {
        assert_eq!(Node::ROOT.as_bytes(), &[0u8; 32]);
    }

    #[test]
    fn test_empty_name_hashes_to_root() {
        let root = fold_labels(std::iter::empty());
        assert_eq!(root, Node::ROOT);
        assert_eq!(
            root.to_hex(),
            "0x0000000000000000000000000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_fold_is_root_first() {
        assert_eq!(
            fold_labels(["eth", "foo"].into_iter()).to_hex(),
            hash_of("foo.eth")
        );
    }
}
