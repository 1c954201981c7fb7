use anyhow::{anyhow, Context, Result};
use base64::Engine as _;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyFile {
    /// 32-byte seed (ed25519 signing key)
    pub sk_seed_b64: String,
}

/// Load the publisher key from `path`, or create and persist a new one.
pub fn load_or_create(path: &str) -> Result<SigningKey> {
    if let Ok(data) = fs::read_to_string(path) {
        let kf: KeyFile =
            serde_json::from_str(&data).with_context(|| format!("parsing key file {path}"))?;
        let seed = base64::engine::general_purpose::STANDARD.decode(kf.sk_seed_b64)?;
        let seed32: [u8; 32] = seed
            .try_into()
            .map_err(|_| anyhow!("key seed in {path} must be 32 bytes"))?;
        return Ok(SigningKey::from_bytes(&seed32));
    }

    let sk = SigningKey::generate(&mut OsRng);
    let kf = KeyFile {
        sk_seed_b64: base64::engine::general_purpose::STANDARD.encode(sk.to_bytes()),
    };
    fs::write(path, serde_json::to_string_pretty(&kf)?)
        .with_context(|| format!("writing key file {path}"))?;
    info!("generated new publisher key at {path}");
    Ok(sk)
}

pub fn pubkey_b64(pk: &[u8; 32]) -> String {
    base64::engine::general_purpose::STANDARD.encode(pk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_key_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        let path = path.to_str().unwrap();

        let first = load_or_create(path).unwrap();
        let second = load_or_create(path).unwrap();
        assert_eq!(first.to_bytes(), second.to_bytes());
        let pk = second.verifying_key().to_bytes();
        assert_eq!(pubkey_b64(&first.verifying_key().to_bytes()), pubkey_b64(&pk));
    }

    #[test]
    fn short_seed_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("key.json");
        let kf = KeyFile {
            sk_seed_b64: base64::engine::general_purpose::STANDARD.encode([1u8; 16]),
        };
        fs::write(&path, serde_json::to_string(&kf).unwrap()).unwrap();
        assert!(load_or_create(path.to_str().unwrap()).is_err());
    }
}
