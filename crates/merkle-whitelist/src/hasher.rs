//! Keccak256 hasher for whitelist trees

use alloy_primitives::{Address, B256};
use tiny_keccak::{Hasher, Keccak};

/// Keccak256 hasher
#[derive(Debug, Clone, Copy, Default)]
pub struct Keccak256Hasher;

impl Keccak256Hasher {
    /// Hash a single value
    pub fn hash(data: &[u8]) -> B256 {
        let mut hasher = Keccak::v256();
        hasher.update(data);
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }

    /// Hash a whitelist address into its leaf.
    ///
    /// Tightly packed: the 20 address bytes alone, no prefix and no padding,
    /// i.e. `keccak256(abi.encodePacked(address))`.
    pub fn hash_leaf(address: &Address) -> B256 {
        Self::hash(address.as_slice())
    }

    /// Hash two nodes into their parent.
    ///
    /// The smaller input always goes first, so the parent does not depend on
    /// which side each child sits. Proofs therefore carry no direction bits.
    pub fn hash_pair(a: &B256, b: &B256) -> B256 {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let mut hasher = Keccak::v256();
        hasher.update(left.as_slice());
        hasher.update(right.as_slice());
        let mut output = [0u8; 32];
        hasher.finalize(&mut output);
        B256::from(output)
    }
}
