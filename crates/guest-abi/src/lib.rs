//! # guest-abi
//!
//! Solidity ABI encoding and decoding over guest primitives.
//!
//! This crate provides functionality for:
//! - Encoding function calls (selector + head/tail argument area)
//! - Decoding single values from return data
//! - Computing function selectors
//! - The textual `EvmCallParam(..)` / `EvmDecodeParam(..)` forms
//!
//! # Example
//!
//! ```rust
//! use guest_abi::{decode, encode, AbiParam, Token};
//! use guest_primitives::{Address, BigInt};
//!
//! // Encode a transfer call
//! let to = Address::from_hex_string("0x1111111111111111111111111111111111111111").unwrap();
//! let amount = BigInt::from_i32(1000);
//! let data = encode(
//!     "0xa9059cbb",
//!     &[AbiParam::address(&to), AbiParam::uint256(&amount).unwrap()],
//! )
//! .unwrap();
//! assert_eq!(data.len(), 4 + 64);
//!
//! // Decode a balance response
//! let return_data = [0u8; 32];
//! let balance = decode("uint256", &return_data).unwrap();
//! assert_eq!(balance, Token::Uint(BigInt::zero()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod encode;
mod error;
mod serialize;
mod types;

pub use decode::{decode, decode_hex, decode_one, decode_params};
pub use encode::{
    encode, encode_args, encode_function_call, encode_hex, encode_with_signature,
    function_selector, keccak256, parse_selector, SELECTOR_LEN,
};
pub use error::{AbiError, Result};
pub use serialize::DecodeRequest;
pub use types::{AbiParam, ParamType, Token, WORD_SIZE};
