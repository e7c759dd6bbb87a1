//! Whitelist proof verification

use crate::hasher::Keccak256Hasher;
use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Inclusion proof for one address, with an explicit membership flag.
///
/// The flag disambiguates the empty proof of a single-member whitelist from
/// the empty proof returned for an address that is not listed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistProof {
    /// The address being proven
    pub address: Address,
    /// Leaf hash of the address
    pub leaf: B256,
    /// Sibling hashes from leaf to root
    pub proof: Vec<B256>,
    /// Whether the address was found in the tree the proof came from
    pub is_member: bool,
}

impl WhitelistProof {
    /// Verify this proof against a root hash.
    ///
    /// The leaf is recomputed from `address`; a record whose stored leaf
    /// belongs to another address never verifies.
    pub fn verify(&self, root: &B256) -> bool {
        let leaf = Keccak256Hasher::hash_leaf(&self.address);
        if !self.is_member || leaf != self.leaf {
            return false;
        }
        verify(&self.proof, root, &leaf)
    }
}

/// Fold a proof into the root it implies for `leaf`
pub fn compute_root(proof: &[B256], leaf: &B256) -> B256 {
    proof
        .iter()
        .fold(*leaf, |acc, sibling| Keccak256Hasher::hash_pair(&acc, sibling))
}

/// Check that `proof` links `leaf` to `root`
pub fn verify(proof: &[B256], root: &B256, leaf: &B256) -> bool {
    compute_root(proof, leaf) == *root
}

/// Check that `address` belongs to the whitelist committed to by `root`
pub fn is_whitelisted(address: &Address, proof: &[B256], root: &B256) -> bool {
    verify(proof, root, &Keccak256Hasher::hash_leaf(address))
}

/// Trait for whitelist proof verification
pub trait ProofVerifier {
    /// Verify `proof` for `leaf` against `root`
    fn verify_proof(&self, proof: &[B256], root: &B256, leaf: &B256) -> bool;
}

/// Off-chain verifier replaying the sorted-pair Keccak256 construction
#[derive(Debug, Clone, Copy, Default)]
pub struct KeccakVerifier;

impl ProofVerifier for KeccakVerifier {
    fn verify_proof(&self, proof: &[B256], root: &B256, leaf: &B256) -> bool {
        verify(proof, root, leaf)
    }
}
