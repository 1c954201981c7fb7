use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

use crate::error::{Error, Result};

/// A 32-byte node: a leaf, an inner node or the root.
pub type Hash = [u8; 32];

const DEFAULT_AMOUNT: &str = "1";

fn default_amount() -> String {
    DEFAULT_AMOUNT.to_string()
}

/// One whitelist row as handed over by the data-access layer.
///
/// Rows are neither sorted nor deduplicated; their order is part of the
/// commitment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhitelistEntry {
    /// Hex account identifier, `0x` prefix optional.
    pub address: String,
    /// Claim limit as a decimal integer string.
    #[serde(default = "default_amount")]
    pub amount: String,
}

impl WhitelistEntry {
    pub fn new(address: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            amount: amount.into(),
        }
    }
}

/// Which side of the path node the sibling sits on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Left,
    Right,
}

/// One level of a membership proof.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofStep {
    pub sibling: Hash,
    pub position: Position,
}

/// Membership proof for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proof {
    /// Index of the proven leaf in layer 0.
    pub leaf_index: usize,
    /// Siblings from the leaf level upwards. Levels where the path node was
    /// carried contribute no step.
    pub steps: Vec<ProofStep>,
}

impl Proof {
    /// Sibling hashes without positions, as consumed by
    /// [`crate::merkle::verify_positionless`].
    pub fn siblings(&self) -> Vec<Hash> {
        self.steps.iter().map(|s| s.sibling).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Published commitment: root plus the ordered leaves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Commitment {
    pub root: String,
    pub leaves: Vec<String>,
}

/// Proof as shipped to a client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofResult {
    pub root: String,
    pub proof: Vec<String>,
    /// Parallel to `proof`.
    pub positions: Vec<Position>,
    /// The matched entry's own amount, in canonical form.
    pub limit: String,
}

impl ProofResult {
    pub fn new(root: &Hash, proof: &Proof, limit: String) -> Self {
        Self {
            root: to_hex(root),
            proof: proof.steps.iter().map(|s| to_hex(&s.sibling)).collect(),
            positions: proof.steps.iter().map(|s| s.position).collect(),
            limit,
        }
    }

    /// Parse the hex fields back into the root and proof steps.
    pub fn decode(&self) -> Result<(Hash, Vec<ProofStep>)> {
        if self.proof.len() != self.positions.len() {
            return Err(Error::MalformedProof {
                proof: self.proof.len(),
                positions: self.positions.len(),
            });
        }
        let root = from_hex(&self.root)?;
        let steps = self
            .proof
            .iter()
            .zip(&self.positions)
            .map(|(h, position)| -> Result<ProofStep> {
                Ok(ProofStep {
                    sibling: from_hex(h)?,
                    position: *position,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok((root, steps))
    }
}

/// Commitment *message* (what is signed by the publisher).
/// This is the canonical structure that is serialized (bincode) and signed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommitmentMessage {
    pub root: Hash,
    pub leaf_count: u64,
}

/// Commitment message + publisher signature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignedCommitment {
    pub msg: CommitmentMessage,
    /// Publisher public key (ed25519) in raw bytes.
    pub signer: [u8; 32],
    /// Signature over H(Enc(msg)).
    #[serde(with = "BigArray")]
    pub signature: [u8; 64],
}

/// Lowercase hex with a `0x` prefix. All hashes leave the crate this way.
pub fn to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Inverse of [`to_hex`]; the prefix is optional.
pub fn from_hex(s: &str) -> Result<Hash> {
    let digits = strip_hex_prefix(s);
    let mut out = [0u8; 32];
    hex::decode_to_slice(digits, &mut out).map_err(|_| Error::InvalidHash(s.to_string()))?;
    Ok(out)
}

pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_prefixed_and_lowercase() {
        let h = [0xABu8; 32];
        let s = to_hex(&h);
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 66);
        assert_eq!(s, s.to_lowercase());
        assert_eq!(from_hex(&s).unwrap(), h);
        assert_eq!(from_hex(&s[2..]).unwrap(), h);
    }

    #[test]
    fn bad_hashes_are_rejected() {
        assert!(from_hex("0x1234").is_err());
        assert!(from_hex(&"zz".repeat(32)).is_err());
    }

    #[test]
    fn missing_amount_defaults_to_one() {
        let e: WhitelistEntry = serde_json::from_str(r#"{"address":"0xaa"}"#).unwrap();
        assert_eq!(e, WhitelistEntry::new("0xaa", "1"));
    }

    #[test]
    fn proof_result_decode_checks_lengths() {
        let r = ProofResult {
            root: to_hex(&[1u8; 32]),
            proof: vec![to_hex(&[2u8; 32])],
            positions: vec![],
            limit: "1".into(),
        };
        assert_eq!(
            r.decode(),
            Err(Error::MalformedProof {
                proof: 1,
                positions: 0
            })
        );
    }
}
