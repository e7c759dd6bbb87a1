//! Merkle whitelist for gated NFT market purchases
//!
//! This crate commits a set of addresses to a single Keccak-256 root and
//! produces inclusion proofs that an on-chain verifier using the same
//! construction accepts:
//! - Leaf: `keccak256(address)` over the 20 packed address bytes
//! - Node: `keccak256(min(a, b) || max(a, b))`, so proofs carry no directions
//! - Leaves sorted ascending; the last node of an odd layer pairs with itself
//!
//! All operations are pure. Nothing is cached between calls; hold on to a
//! [`MerkleTree`] to answer repeated proof requests for one whitelist.

mod address;
mod codec;
mod error;
mod hasher;
mod proof;
mod tree;

pub use address::{ChecksumPolicy, decode_address, decode_address_bytes, decode_address_with};
pub use codec::{
    ParsedWhitelist, ProofFormat, ProofInput, decode_hash, format_hash, format_proof, parse_proof,
    parse_whitelist,
};
pub use error::{Result, WhitelistError};
pub use hasher::Keccak256Hasher;
pub use proof::{
    KeccakVerifier, ProofVerifier, WhitelistProof, compute_root, is_whitelisted, verify,
};
pub use tree::{MerkleTree, build_tree, get_proof, single_address_root};

pub use alloy_primitives::{Address, B256};

/// Root reported for an empty whitelist ("no whitelist configured")
pub const EMPTY_ROOT: B256 = B256::ZERO;

/// Leaf hash for an address
pub fn leaf(address: &Address) -> B256 {
    Keccak256Hasher::hash_leaf(address)
}
