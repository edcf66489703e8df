//! # guest-borsh
//!
//! Cursor decoder for Borsh-laid-out SVM account data.
//!
//! Borsh fields are raw and order-dependent: the caller reads them in the
//! sequence the account layout defines. Two common layouts are provided:
//! - [`SvmMint`]: SPL token mint
//! - [`SvmTokenMetadata`]: Metaplex token metadata
//!
//! # Example
//!
//! ```rust
//! use guest_borsh::BorshDecoder;
//!
//! let mut decoder = BorshDecoder::from_hex("0x0102030405060708").unwrap();
//! assert_eq!(decoder.try_u64().unwrap(), 578437695752307201);
//! assert!(decoder.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decoder;
mod error;
mod metadata;
mod mint;

pub use decoder::{BorshDecoder, PUBKEY_LEN};
pub use error::{BorshError, Result};
pub use metadata::{SvmTokenMetadata, METADATA_PROGRAM_ID};
pub use mint::SvmMint;
