/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced while encoding entries, building a tree or proving
/// membership.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The address is not usable as a leaf input.
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: &'static str },

    /// The amount is not a non-negative decimal integer.
    #[error("invalid amount {0:?}: expected decimal digits")]
    InvalidAmount(String),

    /// A row in a batch failed to encode. The whole batch is rejected.
    #[error("whitelist entry #{index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// There is no commitment for an empty whitelist.
    #[error("whitelist is empty, no root can be produced")]
    EmptyWhitelist,

    /// The (address, amount) pair is not a member of the tree.
    #[error("no whitelist entry for address {address} with amount {amount}")]
    NotFound { address: String, amount: String },

    /// A client proof whose sibling and position lists disagree in length.
    #[error("malformed proof: {proof} siblings but {positions} positions")]
    MalformedProof { proof: usize, positions: usize },

    /// A hex-encoded hash could not be parsed.
    #[error("invalid hash {0:?}: expected 32 hex-encoded bytes")]
    InvalidHash(String),
}
