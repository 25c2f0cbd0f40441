//! Error types for protocol operations.
//!
//! Every failure is fail-closed: an operation returning an error never hands
//! back a modified [`ProtocolState`](crate::ProtocolState).

use thiserror::Error;

/// Result type for protocol operations
pub type PreResult<T> = std::result::Result<T, PreError>;

/// Error types for the re-encryption protocol and append log
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreError {
    /// Malformed setup parameters (height or initial root)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recomputed symmetric key does not match the stored commitment
    #[error("Key integrity check failed: recovered key does not match commitment")]
    KeyIntegrity,

    /// Witness index differs from the next free log index
    #[error("Sequence error: expected index {expected}, witness proves {actual}")]
    Sequence { expected: u64, actual: u64 },

    /// Witness does not open the committed root with an empty slot at its index
    #[error("Stale witness: path does not match the committed tree root")]
    StaleWitness,

    /// Recomputed authentication tag differs from the transmitted one
    #[error("Authentication failed: ciphertext tag mismatch")]
    Authentication,

    /// Capability tag differs from the tag fixed at setup
    #[error("Tag mismatch: capability is scoped to a different tag")]
    TagMismatch,

    /// Witness path length does not fit the tree height
    #[error("Malformed witness: expected {expected} path elements, got {actual}")]
    MalformedWitness { expected: usize, actual: usize },

    /// Every leaf slot of the tree is taken
    #[error("Append log full: all {capacity} leaves used")]
    LogFull { capacity: u64 },

    /// Nothing to encrypt
    #[error("Plaintext must contain at least one chunk")]
    EmptyPlaintext,

    /// Ciphertext too short to carry a chunk and a tag
    #[error("Malformed ciphertext: {len} elements, need at least 2")]
    MalformedCiphertext { len: usize },

    /// Delegate recovery requested before any re-key was generated
    #[error("No re-encrypted key present in state")]
    NoDelegation,

    /// Hash computation error
    #[error("Hash error: {0}")]
    HashError(String),

    /// State snapshot could not be decoded
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}
