//! Memo of built trees keyed by the content of the whitelist snapshot.
//!
//! Sits on top of [`MerkleTree`]; the tree itself stays a pure value.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::error::Result;
use crate::leaf::encode_leaves;
use crate::merkle::MerkleTree;
use crate::types::{Hash, WhitelistEntry};

/// Fingerprint of an ordered leaf sequence: H(len_le || leaf_0 || .. || leaf_n).
pub fn snapshot_key(leaves: &[Hash]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update((leaves.len() as u64).to_le_bytes());
    for leaf in leaves {
        hasher.update(leaf);
    }
    hasher.finalize().into()
}

/// Bounded least-recently-used cache of built trees.
#[derive(Debug)]
pub struct TreeCache {
    trees: LruCache<Hash, Arc<MerkleTree>>,
}

impl TreeCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            trees: LruCache::new(capacity),
        }
    }

    /// Tree for this snapshot, built on first request.
    pub fn get_or_build(&mut self, entries: &[WhitelistEntry]) -> Result<Arc<MerkleTree>> {
        let leaves = encode_leaves(entries)?;
        let key = snapshot_key(&leaves);
        if let Some(tree) = self.trees.get(&key) {
            debug!(entries = entries.len(), "tree cache hit");
            return Ok(Arc::clone(tree));
        }

        debug!(entries = entries.len(), "tree cache miss");
        let tree = Arc::new(MerkleTree::from_leaves(leaves)?);
        self.trees.put(key, Arc::clone(&tree));
        Ok(tree)
    }

    pub fn len(&self) -> usize {
        self.trees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
