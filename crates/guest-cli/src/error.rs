//! CLI error types

use guest_abi::AbiError;
use guest_borsh::BorshError;
use guest_primitives::{AddressError, BigIntError, BytesError};
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// ABI encoding or decoding failed
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// BigInt parsing or arithmetic failed
    #[error("BigInt error: {0}")]
    BigInt(#[from] BigIntError),

    /// Borsh decoding failed
    #[error("Borsh error: {0}")]
    Borsh(#[from] BorshError),

    /// Invalid address
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),

    /// Invalid byte string
    #[error("Invalid bytes: {0}")]
    Bytes(#[from] BytesError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
