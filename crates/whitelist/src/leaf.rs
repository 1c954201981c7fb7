//! Canonical leaf encoding.
//!
//! `leaf = keccak256(address_bytes || amount_text)`, where `amount_text` is
//! the ASCII decimal form of the amount. An external verifier has to feed
//! exactly these bytes to the hash; a fixed-width binary amount would give a
//! different leaf for the same claim.

use crate::crypto::keccak256;
use crate::error::{Error, Result};
use crate::types::{strip_hex_prefix, Hash, WhitelistEntry};

/// Longest accepted account identifier, in bytes.
pub const MAX_ADDRESS_BYTES: usize = 32;

/// Decode a hex address, `0x` prefix optional.
pub fn decode_address(address: &str) -> Result<Vec<u8>> {
    let invalid = |reason: &'static str| Error::InvalidAddress {
        address: address.to_string(),
        reason,
    };
    let digits = strip_hex_prefix(address);
    if digits.is_empty() {
        return Err(invalid("empty"));
    }
    if digits.len() % 2 != 0 {
        return Err(invalid("odd number of hex digits"));
    }
    let bytes = hex::decode(digits).map_err(|_| invalid("not hexadecimal"))?;
    if bytes.len() > MAX_ADDRESS_BYTES {
        return Err(invalid("longer than 32 bytes"));
    }
    Ok(bytes)
}

/// Canonical decimal text of an amount: digits only, leading zeros dropped.
pub fn canonical_amount(amount: &str) -> Result<&str> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    let trimmed = amount.trim_start_matches('0');
    Ok(if trimmed.is_empty() { "0" } else { trimmed })
}

/// Hash one (address, amount) pair into its leaf.
pub fn encode_leaf(address: &str, amount: &str) -> Result<Hash> {
    let mut buf = decode_address(address)?;
    buf.extend_from_slice(canonical_amount(amount)?.as_bytes());
    Ok(keccak256(&buf))
}

impl WhitelistEntry {
    pub fn leaf(&self) -> Result<Hash> {
        encode_leaf(&self.address, &self.amount)
    }
}

/// Encode a whole batch, in order. The first malformed row rejects the batch.
pub fn encode_leaves(entries: &[WhitelistEntry]) -> Result<Vec<Hash>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, e)| {
            e.leaf().map_err(|source| Error::InvalidEntry {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_is_hash_of_address_bytes_and_amount_text() {
        let expected = keccak256(&[0xaa, b'1', b'0']);
        assert_eq!(encode_leaf("0xaa", "10").unwrap(), expected);
        assert_eq!(encode_leaf("aa", "10").unwrap(), expected);
        assert_eq!(encode_leaf("0xAA", "10").unwrap(), expected);
    }

    #[test]
    fn amount_is_text_not_binary() {
        let binary = keccak256(&[0xaa, 10]);
        assert_ne!(encode_leaf("0xaa", "10").unwrap(), binary);
    }

    #[test]
    fn leading_zeros_are_canonicalized() {
        assert_eq!(canonical_amount("0010").unwrap(), "10");
        assert_eq!(canonical_amount("000").unwrap(), "0");
        assert_eq!(
            encode_leaf("0xaa", "010").unwrap(),
            encode_leaf("0xaa", "10").unwrap()
        );
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["", "0x", "0xzz", "0xabc", "hello"] {
            assert!(
                matches!(decode_address(bad), Err(Error::InvalidAddress { .. })),
                "{bad:?} should be rejected"
            );
        }
        let too_long = format!("0x{}", "11".repeat(33));
        assert!(decode_address(&too_long).is_err());
        let longest = format!("0x{}", "11".repeat(32));
        assert_eq!(decode_address(&longest).unwrap().len(), 32);
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        for bad in ["", "-1", "1.5", " 1", "1e3", "0x10"] {
            assert_eq!(
                canonical_amount(bad),
                Err(Error::InvalidAmount(bad.to_string()))
            );
        }
    }

    #[test]
    fn batch_reports_failing_index() {
        let entries = vec![
            WhitelistEntry::new("0xaa", "1"),
            WhitelistEntry::new("0xnope", "1"),
        ];
        match encode_leaves(&entries) {
            Err(Error::InvalidEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {other:?}"),
        }
    }
}
