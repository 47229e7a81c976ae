//! Custom error types for the bfbin crate.

use thiserror::Error;

/// The primary error type for all decoding operations in this crate.
///
/// Every variant is terminal for the session that produced it: decoding
/// stops, the handler's error callback fires once and all session
/// resources are released.
#[derive(Debug, Error)]
pub enum BfbinError {
    /// An error originating from I/O operations (open failures, device errors).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a Byfl binary-output file (bad or missing magic).
    #[error("Invalid format: {0}")]
    Format(String),

    /// The input ended in the middle of a record.
    #[error("Unexpected end of data: needed {wanted} byte(s) at position {offset}")]
    Truncated { offset: u64, wanted: usize },

    /// The scratch buffer could not be grown to hold a string value.
    #[error("Failed to allocate {bytes} bytes of memory")]
    Allocation { bytes: usize },

    /// The caller's callback set does not match the one this library was built with.
    #[error("Mismatched callback set: expected {expected} callbacks, caller declared {found}")]
    AbiMismatch { expected: usize, found: usize },

    /// The decoder reached a state the grammar does not allow.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A convenience `Result` type alias using the crate's `BfbinError` type.
pub type Result<T> = std::result::Result<T, BfbinError>;
