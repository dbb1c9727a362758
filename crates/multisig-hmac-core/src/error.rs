//! Error types for multisig HMAC operations

use thiserror::Error;

/// Result type alias for multisig HMAC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Structural errors raised by key generation, signing, combining and verification.
///
/// A signature that simply fails to authenticate is not an error: verification
/// reports it as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Key or seed length does not match the algorithm's key length
    #[error("Invalid key: expected {expected} bytes, got {actual}")]
    InvalidKey { expected: usize, actual: usize },

    /// Algorithm name not present in the algorithm table
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Signer index outside the bitfield capacity
    #[error("Invalid signer index: {0}")]
    InvalidIndex(usize),

    /// Signature buffer has the wrong length for the algorithm
    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Not enough keys supplied to cover the signature's bitfield
    #[error("Insufficient keys: bitfield requires {required}, got {supplied}")]
    InsufficientKeys { required: usize, supplied: usize },

    /// Two signatures in one combine call carry the same signer index
    #[error("Duplicate signer index: {0}")]
    DuplicateIndex(usize),

    /// Bitfield or tag that cannot be produced by a valid signer set
    #[error("Invalid bitfield: {0:#034b}")]
    InvalidBitfield(u32),

    /// Threshold must be at least one
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(usize),

    /// Nothing to combine
    #[error("Cannot combine an empty set of signatures")]
    EmptySignatureSet,
}
