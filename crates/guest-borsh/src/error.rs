//! Borsh decoding errors

use thiserror::Error;

/// Borsh decoding error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BorshError {
    /// Not enough bytes left for the requested field
    #[error("insufficient bytes for {field} at offset {offset}: need {need}, have {have}")]
    InsufficientBytes {
        /// Field being read
        field: &'static str,
        /// Cursor position
        offset: usize,
        /// Bytes the field needs
        need: usize,
        /// Bytes remaining
        have: usize,
    },

    /// Attempt to move the cursor past the end of the buffer
    #[error("offset {offset} overruns buffer of length {len}")]
    OffsetOutOfRange {
        /// Requested offset
        offset: usize,
        /// Buffer length
        len: usize,
    },

    /// Option discriminant other than 0 or 1
    #[error("invalid option tag: {0}")]
    InvalidTag(u32),

    /// Malformed input (bad hex, invalid UTF-8)
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Result type for Borsh decoding
pub type Result<T> = std::result::Result<T, BorshError>;
