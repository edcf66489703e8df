//! Common error types for primitives

use thiserror::Error;

use crate::address::AddressError;
use crate::bigint::BigIntError;
use crate::bytes::BytesError;
use crate::serialize::SerializeError;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Byte buffer error
    #[error("bytes error: {0}")]
    Bytes(#[from] BytesError),

    /// Address error
    #[error("address error: {0}")]
    Address(#[from] AddressError),

    /// Integer error
    #[error("bigint error: {0}")]
    BigInt(#[from] BigIntError),

    /// Textual serialization error
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}
