//! Binary Merkle tree over whitelist leaves.
//!
//! Leaves: `keccak256(address_bytes || amount_text)` (see [`crate::leaf`]).
//! Inner nodes: `keccak256(left || right)` in index order.
//! An unpaired last node is carried into the next layer unchanged: it is
//! neither duplicated nor rehashed. Most Merkle constructions pad or
//! self-pair instead; this one is kept so roots match those already
//! published. Carrying lets a subtree root sit at several heights, so a
//! root alone does not pin down the tree shape.

use std::collections::HashMap;

use crate::crypto::hash_pair;
use crate::error::{Error, Result};
use crate::leaf::{canonical_amount, encode_leaf, encode_leaves};
use crate::types::{
    to_hex, Commitment, Hash, Position, Proof, ProofResult, ProofStep, WhitelistEntry,
};

/// A built tree. Pure value derived from the ordered leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// All nodes stored level by level, bottom-up. `layers[0]` = leaves.
    layers: Vec<Vec<Hash>>,
    /// Leaf -> first index in `layers[0]`.
    index: HashMap<Hash, usize>,
}

/// Compute the next layer: pairs hashed, odd tail carried.
fn next_layer(nodes: &[Hash]) -> Vec<Hash> {
    nodes
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => hash_pair(left, right),
            [carried] => *carried,
            _ => unreachable!("chunks(2) yields one or two nodes"),
        })
        .collect()
}

impl MerkleTree {
    /// Build from whitelist rows. Fails on the first malformed row or on an
    /// empty whitelist.
    pub fn from_entries(entries: &[WhitelistEntry]) -> Result<Self> {
        Self::from_leaves(encode_leaves(entries)?)
    }

    /// Build from pre-hashed leaves, in the given order.
    pub fn from_leaves(leaves: Vec<Hash>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(Error::EmptyWhitelist);
        }

        let mut index = HashMap::with_capacity(leaves.len());
        for (i, leaf) in leaves.iter().enumerate() {
            index.entry(*leaf).or_insert(i);
        }

        let mut layers = vec![leaves];
        while let Some(top) = layers.last().filter(|l| l.len() > 1) {
            let next = next_layer(top);
            layers.push(next);
        }

        tracing::debug!(
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            "built merkle tree"
        );
        Ok(Self { layers, index })
    }

    /// The published commitment.
    pub fn root(&self) -> Hash {
        self.layers[self.layers.len() - 1][0]
    }

    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Number of leaves. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers below the root.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Position of the first occurrence of `leaf`.
    pub fn index_of(&self, leaf: &Hash) -> Option<usize> {
        self.index.get(leaf).copied()
    }

    /// Proof for the leaf at `leaf_index`, or `None` if out of range.
    pub fn proof_at(&self, leaf_index: usize) -> Option<Proof> {
        if leaf_index >= self.len() {
            return None;
        }

        let mut steps = Vec::with_capacity(self.depth());
        let mut idx = leaf_index;
        for layer in &self.layers[..self.depth()] {
            let sibling_idx = idx ^ 1;
            // No sibling means the node was carried: nothing to record.
            if let Some(sibling) = layer.get(sibling_idx) {
                let position = if idx % 2 == 0 {
                    Position::Right
                } else {
                    Position::Left
                };
                steps.push(ProofStep {
                    sibling: *sibling,
                    position,
                });
            }
            idx /= 2;
        }

        Some(Proof { leaf_index, steps })
    }

    /// Prove membership of `(address, amount)`.
    pub fn prove(&self, address: &str, amount: &str) -> Result<Proof> {
        let leaf = encode_leaf(address, amount)?;
        self.index_of(&leaf)
            .and_then(|i| self.proof_at(i))
            .ok_or_else(|| Error::NotFound {
                address: address.to_string(),
                amount: amount.to_string(),
            })
    }

    /// Root and hex leaves, ready for a client.
    pub fn commitment(&self) -> Commitment {
        Commitment {
            root: to_hex(&self.root()),
            leaves: self.leaves().iter().map(to_hex).collect(),
        }
    }

    /// Proof for `(address, amount)` ready for a client, with the matched
    /// entry's amount as the claim limit.
    pub fn proof_result(&self, address: &str, amount: &str) -> Result<ProofResult> {
        let proof = self.prove(address, amount)?;
        let limit = canonical_amount(amount)?.to_string();
        Ok(ProofResult::new(&self.root(), &proof, limit))
    }
}

/// Recompute the root from `leaf` and `steps`, hashing in the builder's
/// left/right order, and compare with `root`.
pub fn verify(leaf: &Hash, steps: &[ProofStep], root: &Hash) -> bool {
    let computed = steps.iter().fold(*leaf, |current, step| match step.position {
        Position::Right => hash_pair(&current, &step.sibling),
        Position::Left => hash_pair(&step.sibling, &current),
    });
    computed == *root
}

/// Verifier that ignores positions: always `H(current || sibling)`.
///
/// Only accepts proofs whose path node was the left child at every hashed
/// level, so most valid proofs fail here. Kept for checking against
/// verifiers already deployed with that rule; new consumers use [`verify`].
pub fn verify_positionless(leaf: &Hash, siblings: &[Hash], root: &Hash) -> bool {
    let computed = siblings
        .iter()
        .fold(*leaf, |current, sibling| hash_pair(&current, sibling));
    computed == *root
}
