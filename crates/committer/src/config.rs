use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "committer", about = "Merkle commitments and proofs for claim whitelists")]
pub struct Config {
    /// Log level filter (error, warn, info, debug, trace).
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the tree for a whitelist snapshot and print root + leaves.
    Commit {
        /// Whitelist snapshot: JSON array of {"address", "amount"}.
        #[arg(long)]
        whitelist: String,
        /// Also sign the root with this ed25519 key file (generated if missing).
        #[arg(long)]
        key_file: Option<String>,
    },

    /// Print the membership proof for one (address, amount) pair.
    Prove {
        #[arg(long)]
        whitelist: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        amount: String,
    },

    /// Check a proof file (output of `prove`) for an (address, amount) pair.
    Verify {
        /// Proof JSON as printed by `prove`.
        #[arg(long)]
        proof_file: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        amount: String,
        /// Check against this root instead of the one in the proof file.
        #[arg(long)]
        root: Option<String>,
        /// Ignore positions and hash current || sibling at every level.
        #[arg(long, default_value_t = false)]
        positionless: bool,
    },

    /// Print the base64 public key of a key file (generated if missing).
    Pubkey {
        #[arg(long, default_value = "committer_key.json")]
        key_file: String,
    },
}
