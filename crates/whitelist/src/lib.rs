//! Merkle commitments over (address, claim amount) whitelists.
//!
//! Build a [`MerkleTree`] from the ordered rows, publish its root, and hand
//! out per-address proofs that [`verify`] checks against that root.

pub mod cache;
pub mod crypto;
pub mod error;
pub mod leaf;
pub mod merkle;
pub mod publish;
pub mod types;

pub use cache::TreeCache;
pub use error::{Error, Result};
pub use leaf::encode_leaf;
pub use merkle::{verify, verify_positionless, MerkleTree};
pub use types::{
    from_hex, to_hex, Commitment, Hash, Position, Proof, ProofResult, ProofStep, WhitelistEntry,
};
