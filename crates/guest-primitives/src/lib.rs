//! # guest-primitives
//!
//! Value types shared by the guest codecs.
//!
//! - [`Bytes`]: owned byte buffer with hex, UTF-8 and base58 conversions
//! - [`Address`]: 20-byte EVM or 32-byte SVM account address
//! - [`BigInt`]: arbitrary-precision signed integer stored as little-endian
//!   two's complement
//! - [`serialize`]: the wrapper-tagged textual form used at the host boundary
//!
//! # Example
//!
//! ```rust
//! use guest_primitives::BigInt;
//!
//! let a = BigInt::from_string("1e38").unwrap();
//! let sum = a.plus(&a);
//! assert_eq!(sum.to_string(), "200000000000000000000000000000000000000");
//!
//! let amount = BigInt::from_string_decimal("100.5", 2).unwrap();
//! assert_eq!(amount.to_string_decimal(2), "100.5");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod bigint;
mod bytes;
mod error;
pub mod serialize;

pub use address::{Address, AddressError};
pub use bigint::{median, BigInt, BigIntError};
pub use bytes::{Bytes, BytesError};
pub use error::PrimitiveError;
pub use serialize::{Serializable, SerializeError};

/// Hex string of the EVM zero address
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Hex string of the address EVM protocols use for the chain's native token
pub const EVM_NATIVE_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Result type for primitive operations
pub type Result<T> = std::result::Result<T, PrimitiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_addresses() {
        assert_eq!(Address::ZERO_EVM.to_hex_string(), NULL_ADDRESS);
        assert_eq!(Address::EVM_NATIVE.to_hex_string(), EVM_NATIVE_ADDRESS);
    }

    #[test]
    fn test_primitive_error_from() {
        let err: PrimitiveError = BigIntError::DivisionByZero.into();
        assert!(matches!(err, PrimitiveError::BigInt(BigIntError::DivisionByZero)));
    }
}
