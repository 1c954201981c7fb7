mod config;
mod keys;
mod snapshot;

use crate::config::{Command, Config};
use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use tracing::{info, warn, Level};
use whitelist::publish::{Ed25519Signer, Publisher};
use whitelist::types::SignedCommitment;
use whitelist::{
    encode_leaf, from_hex, verify, verify_positionless, Commitment, MerkleTree, ProofResult,
};

#[derive(Debug, Serialize)]
struct CommitOutput {
    #[serde(flatten)]
    commitment: Commitment,
    #[serde(skip_serializing_if = "Option::is_none")]
    signed: Option<SignedCommitment>,
}

#[derive(Debug, Serialize)]
struct VerifyOutput {
    valid: bool,
    root: String,
}

fn main() -> Result<()> {
    let cfg = Config::parse();
    let level: Level = cfg
        .log_level
        .parse()
        .with_context(|| format!("invalid log level {:?}", cfg.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    println!("{}", run(cfg.cmd)?);
    Ok(())
}

fn run(cmd: Command) -> Result<String> {
    match cmd {
        Command::Commit {
            whitelist,
            key_file,
        } => {
            let rows = snapshot::load(&whitelist)?;
            let tree = MerkleTree::from_entries(&rows)?;
            let commitment = tree.commitment();
            info!(root = %commitment.root, leaves = tree.len(), "commitment built");

            let signed = match key_file {
                Some(path) => {
                    let publisher = Publisher::new(Ed25519Signer::new(keys::load_or_create(&path)?));
                    info!(
                        signer = %keys::pubkey_b64(&publisher.public_key()),
                        "signing commitment"
                    );
                    Some(publisher.publish(&tree)?)
                }
                None => None,
            };
            Ok(serde_json::to_string_pretty(&CommitOutput { commitment, signed })?)
        }

        Command::Prove {
            whitelist,
            address,
            amount,
        } => {
            let rows = snapshot::load(&whitelist)?;
            let tree = MerkleTree::from_entries(&rows)?;
            let result = tree.proof_result(&address, &amount)?;
            info!(%address, steps = result.proof.len(), "proof generated");
            Ok(serde_json::to_string_pretty(&result)?)
        }

        Command::Verify {
            proof_file,
            address,
            amount,
            root,
            positionless,
        } => {
            let data = fs::read_to_string(&proof_file)
                .with_context(|| format!("reading proof {proof_file}"))?;
            let result: ProofResult = serde_json::from_str(&data)?;
            let (mut expected_root, steps) = result.decode()?;
            if let Some(r) = &root {
                expected_root = from_hex(r)?;
            }

            let leaf = encode_leaf(&address, &amount)?;
            let valid = if positionless {
                let siblings: Vec<_> = steps.iter().map(|s| s.sibling).collect();
                verify_positionless(&leaf, &siblings, &expected_root)
            } else {
                verify(&leaf, &steps, &expected_root)
            };
            if !valid {
                warn!(%address, %amount, "proof does not match root");
            }
            Ok(serde_json::to_string_pretty(&VerifyOutput {
                valid,
                root: whitelist::to_hex(&expected_root),
            })?)
        }

        Command::Pubkey { key_file } => {
            let sk = keys::load_or_create(&key_file)?;
            Ok(keys::pubkey_b64(&sk.verifying_key().to_bytes()))
        }
    }
}
