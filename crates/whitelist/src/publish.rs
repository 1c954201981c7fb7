//! Signing of published roots.
//!
//! The signer is a capability handed to [`Publisher`] by whoever constructs
//! it; nothing here reads keys from the environment.

use anyhow::{anyhow, Result};
use ed25519_dalek::SigningKey;
use tracing::info;

use crate::crypto::{sign_struct, verify_struct, verifying_key_from_bytes};
use crate::merkle::MerkleTree;
use crate::types::{to_hex, CommitmentMessage, SignedCommitment};

/// Something that can sign a commitment message.
pub trait CommitmentSigner {
    /// Raw public key identifying the signer.
    fn public_key(&self) -> [u8; 32];

    /// Signature over H(Enc(msg)).
    fn sign(&self, msg: &CommitmentMessage) -> Result<[u8; 64]>;
}

/// Ed25519 signer over a key owned by the caller.
pub struct Ed25519Signer {
    sk: SigningKey,
}

impl Ed25519Signer {
    pub fn new(sk: SigningKey) -> Self {
        Self { sk }
    }
}

impl CommitmentSigner for Ed25519Signer {
    fn public_key(&self) -> [u8; 32] {
        self.sk.verifying_key().to_bytes()
    }

    fn sign(&self, msg: &CommitmentMessage) -> Result<[u8; 64]> {
        sign_struct(&self.sk, msg)
    }
}

/// Produces signed commitments for built trees.
pub struct Publisher<S> {
    signer: S,
}

impl<S: CommitmentSigner> Publisher<S> {
    pub fn new(signer: S) -> Self {
        Self { signer }
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signer.public_key()
    }

    pub fn publish(&self, tree: &MerkleTree) -> Result<SignedCommitment> {
        let msg = CommitmentMessage {
            root: tree.root(),
            leaf_count: tree.len() as u64,
        };
        let signature = self.signer.sign(&msg)?;
        info!(root = %to_hex(&msg.root), leaves = msg.leaf_count, "published commitment");
        Ok(SignedCommitment {
            msg,
            signer: self.signer.public_key(),
            signature,
        })
    }
}

/// Check a signed commitment against the expected publisher key.
pub fn verify_commitment(expected_signer: &[u8; 32], sc: &SignedCommitment) -> Result<()> {
    if &sc.signer != expected_signer {
        return Err(anyhow!("commitment signed by an unexpected key"));
    }
    let pk = verifying_key_from_bytes(&sc.signer)?;
    verify_struct(&pk, &sc.msg, &sc.signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WhitelistEntry;

    fn tree() -> MerkleTree {
        MerkleTree::from_entries(&[
            WhitelistEntry::new("0xaa", "10"),
            WhitelistEntry::new("0xbb", "20"),
        ])
        .unwrap()
    }

    #[test]
    fn published_commitment_verifies() {
        let publisher = Publisher::new(Ed25519Signer::new(SigningKey::from_bytes(&[3u8; 32])));
        let t = tree();
        let sc = publisher.publish(&t).unwrap();
        assert_eq!(sc.msg.root, t.root());
        assert_eq!(sc.msg.leaf_count, 2);
        verify_commitment(&publisher.public_key(), &sc).unwrap();
    }

    #[test]
    fn tampered_root_is_rejected() {
        let publisher = Publisher::new(Ed25519Signer::new(SigningKey::from_bytes(&[3u8; 32])));
        let mut sc = publisher.publish(&tree()).unwrap();
        sc.msg.root[0] ^= 1;
        assert!(verify_commitment(&publisher.public_key(), &sc).is_err());
    }

    #[test]
    fn other_signer_is_rejected() {
        let publisher = Publisher::new(Ed25519Signer::new(SigningKey::from_bytes(&[3u8; 32])));
        let sc = publisher.publish(&tree()).unwrap();
        let other = SigningKey::from_bytes(&[4u8; 32]).verifying_key().to_bytes();
        assert!(verify_commitment(&other, &sc).is_err());
    }
}
