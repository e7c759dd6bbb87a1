//! Whitelist Merkle tree implementation

use crate::{EMPTY_ROOT, hasher::Keccak256Hasher, proof::WhitelistProof};
use alloy_primitives::{Address, B256};

/// Binary Merkle tree over a whitelist.
///
/// `layers[0]` holds the sorted leaves and the last layer holds the root
/// alone. An empty whitelist has no layers and reports [`EMPTY_ROOT`].
///
/// The tree is an immutable value: build it once per address set and query
/// it as many times as needed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<B256>>,
}

impl MerkleTree {
    /// Build a tree from whitelist addresses.
    ///
    /// Input order is irrelevant. Duplicates are kept as separate leaves, so
    /// callers should deduplicate first.
    pub fn build(addresses: &[Address]) -> Self {
        let leaves = addresses.iter().map(Keccak256Hasher::hash_leaf).collect();
        Self::from_leaves(leaves)
    }

    /// Build a tree from already hashed leaves.
    pub fn from_leaves(mut leaves: Vec<B256>) -> Self {
        if leaves.is_empty() {
            tracing::debug!(target: "merkle_whitelist", "Empty whitelist, using zero root");
            return Self::default();
        }

        // Proof indices depend on this order
        leaves.sort_unstable();

        let mut layers = vec![leaves];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = next_layer(current);
            layers.push(next);
        }

        let tree = Self { layers };
        tracing::debug!(
            target: "merkle_whitelist",
            leaves = tree.len(),
            depth = tree.depth(),
            root = %tree.root(),
            "Built whitelist tree"
        );
        tree
    }

    /// Get the root hash
    pub fn root(&self) -> B256 {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(EMPTY_ROOT)
    }

    /// Sorted leaf layer
    pub fn leaves(&self) -> &[B256] {
        self.layers.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// All layers, leaves first and root last
    pub fn layers(&self) -> &[Vec<B256>] {
        &self.layers
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Whether the whitelist is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of hashing levels between a leaf and the root, which is also
    /// the length of every proof.
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// Index of a leaf in the sorted leaf layer.
    ///
    /// With duplicate leaves any matching index may be returned. Each of them
    /// yields a valid proof.
    pub fn position(&self, leaf: &B256) -> Option<usize> {
        self.leaves().binary_search(leaf).ok()
    }

    /// Whether the address is whitelisted
    pub fn contains(&self, address: &Address) -> bool {
        self.position(&Keccak256Hasher::hash_leaf(address)).is_some()
    }

    /// Sibling path from `leaf` up to (but excluding) the root.
    ///
    /// Returns `None` when the leaf is not in the tree. A single-leaf tree
    /// yields `Some` with an empty path.
    pub fn siblings(&self, leaf: &B256) -> Option<Vec<B256>> {
        let mut index = self.position(leaf)?;
        let mut path = Vec::with_capacity(self.depth());

        for layer in &self.layers[..self.depth()] {
            let sibling = if index % 2 == 1 { index - 1 } else { index + 1 };
            // The last node of an odd layer was paired with itself
            path.push(*layer.get(sibling).unwrap_or(&layer[index]));
            index /= 2;
        }

        tracing::trace!(target: "merkle_whitelist", %leaf, len = path.len(), "Derived proof");
        Some(path)
    }

    /// Generate a proof for an address, along with its membership flag
    pub fn proof(&self, address: &Address) -> WhitelistProof {
        let leaf = Keccak256Hasher::hash_leaf(address);
        let (is_member, proof) = match self.siblings(&leaf) {
            Some(path) => (true, path),
            None => (false, Vec::new()),
        };
        WhitelistProof {
            address: *address,
            leaf,
            proof,
            is_member,
        }
    }
}

/// Reduce one layer to the next by hashing adjacent pairs
fn next_layer(layer: &[B256]) -> Vec<B256> {
    layer
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            Keccak256Hasher::hash_pair(left, right)
        })
        .collect()
}

/// Build the whitelist tree for a set of addresses
pub fn build_tree(addresses: &[Address]) -> MerkleTree {
    MerkleTree::build(addresses)
}

/// Derive the proof for `target` against a freshly built tree.
///
/// An empty result means either that `target` is absent, or that it is the
/// only member of a single-address whitelist. Use [`MerkleTree::proof`] when
/// the difference matters.
pub fn get_proof(addresses: &[Address], target: &Address) -> Vec<B256> {
    MerkleTree::build(addresses)
        .siblings(&Keccak256Hasher::hash_leaf(target))
        .unwrap_or_default()
}

/// Root of a whitelist holding a single address, which is that address's leaf
pub fn single_address_root(address: &Address) -> B256 {
    Keccak256Hasher::hash_leaf(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn leaf(byte: u8) -> B256 {
        Keccak256Hasher::hash_leaf(&addr(byte))
    }

    fn sorted_leaves(bytes: &[u8]) -> Vec<B256> {
        let mut leaves: Vec<_> = bytes.iter().map(|b| leaf(*b)).collect();
        leaves.sort();
        leaves
    }

    #[test]
    fn test_empty_tree() {
        let tree = MerkleTree::build(&[]);
        assert_eq!(tree.root(), B256::ZERO);
        assert!(tree.leaves().is_empty());
        assert!(tree.layers().is_empty());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_single_leaf_is_root() {
        let tree = MerkleTree::build(&[addr(1)]);
        assert_eq!(tree.root(), leaf(1));
        assert_eq!(tree.root(), single_address_root(&addr(1)));
        assert_eq!(tree.layers().len(), 1);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.siblings(&leaf(1)), Some(vec![]));
    }

    #[test]
    fn test_leaves_are_sorted() {
        let tree = MerkleTree::build(&[addr(3), addr(1), addr(2)]);
        assert_eq!(tree.leaves(), sorted_leaves(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_odd_layer_pairs_last_node_with_itself() {
        let tree = MerkleTree::build(&[addr(1), addr(2), addr(3)]);
        let l = sorted_leaves(&[1, 2, 3]);

        let left = Keccak256Hasher::hash_pair(&l[0], &l[1]);
        let right = Keccak256Hasher::hash_pair(&l[2], &l[2]);

        assert_eq!(tree.layers()[1], vec![left, right]);
        assert_eq!(tree.root(), Keccak256Hasher::hash_pair(&left, &right));
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_lone_node_proof_uses_itself() {
        let tree = MerkleTree::build(&[addr(1), addr(2), addr(3)]);
        let l = sorted_leaves(&[1, 2, 3]);

        let path = tree.siblings(&l[2]).unwrap();
        assert_eq!(path[0], l[2]);
        assert_eq!(path[1], Keccak256Hasher::hash_pair(&l[0], &l[1]));
    }

    #[test]
    fn test_proof_lengths_match_depth() {
        for n in 1..=9u8 {
            let addresses: Vec<_> = (1..=n).map(addr).collect();
            let tree = MerkleTree::build(&addresses);
            for address in &addresses {
                let proof = tree.proof(address);
                assert!(proof.is_member);
                assert_eq!(proof.proof.len(), tree.depth(), "n = {n}");
            }
        }
    }

    #[test]
    fn test_membership_flag() {
        let single = MerkleTree::build(&[addr(1)]);
        let member = single.proof(&addr(1));
        let outsider = single.proof(&addr(2));

        // Both proofs are empty, only the flag tells them apart
        assert!(member.proof.is_empty() && outsider.proof.is_empty());
        assert!(member.is_member);
        assert!(!outsider.is_member);
        assert!(single.contains(&addr(1)));
        assert!(!single.contains(&addr(2)));
    }

    #[test]
    fn test_get_proof_for_absent_address_is_empty() {
        let addresses = [addr(1), addr(2), addr(3), addr(4)];
        assert!(get_proof(&addresses, &addr(9)).is_empty());
        assert_eq!(get_proof(&addresses, &addr(1)).len(), 2);
    }

    #[test]
    fn test_position_in_sorted_leaves() {
        let tree = MerkleTree::build(&[addr(4), addr(2), addr(9), addr(7), addr(1)]);
        for (index, leaf) in tree.leaves().iter().enumerate() {
            assert_eq!(tree.position(leaf), Some(index));
        }
        assert_eq!(tree.position(&leaf(3)), None);
        assert_eq!(MerkleTree::default().position(&leaf(1)), None);
    }

    #[test]
    fn test_duplicate_leaves_still_prove() {
        let tree = MerkleTree::build(&[addr(1), addr(2), addr(1), addr(3), addr(1)]);
        assert_eq!(tree.len(), 5);

        let index = tree.position(&leaf(1)).unwrap();
        assert_eq!(tree.leaves()[index], leaf(1));

        for byte in [1, 2, 3] {
            let record = tree.proof(&addr(byte));
            assert!(record.is_member);
            assert_eq!(record.proof.len(), tree.depth());
            assert!(record.verify(&tree.root()), "byte = {byte}");
        }
    }

    #[test]
    fn test_from_leaves_matches_build() {
        let addresses = [addr(5), addr(6), addr(7)];
        let leaves = addresses.iter().map(Keccak256Hasher::hash_leaf).collect();
        assert_eq!(MerkleTree::from_leaves(leaves), build_tree(&addresses));
    }
}
