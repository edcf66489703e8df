//! ABI error types

use guest_primitives::SerializeError;
use thiserror::Error;

/// ABI encoding/decoding error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Selector is not `0x` followed by 8 hex digits
    #[error("invalid selector: {0} (must be exactly 4 bytes: 0x + 8 hex chars)")]
    InvalidSelector(String),

    /// Malformed type string, e.g. `bytes33` or `uint7`
    #[error("invalid type: {0}")]
    InvalidType(String),

    /// Well-formed but unknown base type
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Fixed-size composite with the wrong number of children
    #[error("length mismatch for {abi_type}: expected {expected}, got {got}")]
    LengthMismatch {
        /// Declared type
        abi_type: String,
        /// Declared element count
        expected: usize,
        /// Supplied element count
        got: usize,
    },

    /// Static value wider than its slot
    #[error("value too large for {abi_type}: {len} bytes")]
    ValueTooLarge {
        /// Declared type
        abi_type: String,
        /// Value width in bytes
        len: usize,
    },

    /// Child parameter type does not match the composite's element type
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Value is malformed for its type
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Not enough data to decode
    #[error("insufficient data: need {need} bytes, have {have}")]
    InsufficientBytes {
        /// Bytes required
        need: usize,
        /// Bytes available
        have: usize,
    },

    /// Invalid hex input
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Textual form could not be parsed
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

impl From<hex::FromHexError> for AbiError {
    fn from(err: hex::FromHexError) -> Self {
        AbiError::InvalidHex(err.to_string())
    }
}

/// Result type for ABI operations
pub type Result<T> = std::result::Result<T, AbiError>;
