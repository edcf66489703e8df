//! ABI decoding
//!
//! Offsets stored in a head are relative to the start of the sequence that
//! contains them: the whole buffer at the top level, the element area of a
//! dynamic array, or the body of a tuple.

use guest_primitives::{Address, BigInt};
use tracing::trace;

use crate::error::{AbiError, Result};
use crate::types::{ParamType, Token, WORD_SIZE};

/// Decode a single value of type `abi_type` (e.g. `uint256`, `string`,
/// `(uint256,string)`) from return data
pub fn decode(abi_type: &str, data: &[u8]) -> Result<Token> {
    let param_type = ParamType::parse(abi_type)?;
    decode_one(&param_type, data)
}

/// [`decode`] over a hex string (with or without 0x prefix)
pub fn decode_hex(abi_type: &str, data: &str) -> Result<Token> {
    let digits = data
        .strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data);
    let bytes = hex::decode(digits)?;
    decode(abi_type, &bytes)
}

/// Decode a single value of a parsed type
pub fn decode_one(param_type: &ParamType, data: &[u8]) -> Result<Token> {
    let mut tokens = decode_params(std::slice::from_ref(param_type), data)?;
    tokens.pop().ok_or_else(|| AbiError::InvalidValue("no value decoded".to_string()))
}

/// Decode a sequence of values, as returned by a multi-output function
pub fn decode_params(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>> {
    trace!(types = types.len(), len = data.len(), "decoding ABI data");
    Decoder::new(data).decode_sequence(types, 0)
}

/// Read state for one decode call.
///
/// Offsets may point anywhere in the buffer, so several heads can alias the
/// same tail. `budget` is the number of bytes still allowed to be decoded;
/// every value word, length word and payload is charged against it, which
/// caps the output at the size of the input.
struct Decoder<'a> {
    data: &'a [u8],
    budget: usize,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            budget: data.len(),
        }
    }

    /// Decode `types` laid out head-first starting at `base`
    fn decode_sequence(&mut self, types: &[ParamType], base: usize) -> Result<Vec<Token>> {
        let mut offset = 0;
        let mut tokens = Vec::with_capacity(types.len());

        for param_type in types {
            let (token, consumed) = self.decode_token(param_type, base, offset)?;
            tokens.push(token);
            offset += consumed;
        }

        Ok(tokens)
    }

    /// Decode the head entry at `base + offset`. Returns the token and the
    /// number of head bytes consumed.
    fn decode_token(
        &mut self,
        param_type: &ParamType,
        base: usize,
        offset: usize,
    ) -> Result<(Token, usize)> {
        let pos = checked_add(base, offset)?;
        if param_type.is_dynamic() {
            let relative = self.read_usize(pos)?;
            let start = checked_add(base, relative)?;
            let token = self.decode_tail(param_type, start)?;
            Ok((token, WORD_SIZE))
        } else {
            let token = self.decode_static(param_type, pos)?;
            Ok((token, param_type.head_length()))
        }
    }

    /// Decode an inline (static) value at `pos`.
    ///
    /// Padding must be canonical: zero for unsigned values, addresses and
    /// fixed bytes, sign extension for signed values.
    fn decode_static(&mut self, param_type: &ParamType, pos: usize) -> Result<Token> {
        match param_type {
            ParamType::Address => {
                let word = self.value_word(pos)?;
                check_zero_padding(&word[..12], param_type)?;
                let addr = Address::from_slice(&word[12..])
                    .map_err(|e| AbiError::InvalidValue(e.to_string()))?;
                Ok(Token::Address(addr))
            }
            ParamType::Uint(bits) => {
                let word = self.value_word(pos)?;
                check_zero_padding(&word[..WORD_SIZE - bits / 8], param_type)?;
                Ok(Token::Uint(BigInt::from_unsigned_bytes_be(word)))
            }
            ParamType::Int(bits) => {
                let word = self.value_word(pos)?;
                check_sign_extension(word, bits / 8, param_type)?;
                Ok(Token::Int(BigInt::from_signed_bytes_be(word)))
            }
            ParamType::Bool => {
                let word = self.value_word(pos)?;
                check_zero_padding(&word[..WORD_SIZE - 1], param_type)?;
                match word[WORD_SIZE - 1] {
                    0 => Ok(Token::Bool(false)),
                    1 => Ok(Token::Bool(true)),
                    other => Err(AbiError::InvalidValue(format!("bool word ends in {:#04x}", other))),
                }
            }
            ParamType::FixedBytes(size) => {
                let word = self.value_word(pos)?;
                check_zero_padding(&word[*size..], param_type)?;
                Ok(Token::FixedBytes(word[..*size].to_vec()))
            }
            ParamType::FixedArray(inner, size) => {
                let types = vec![(**inner).clone(); *size];
                Ok(Token::FixedArray(self.decode_sequence(&types, pos)?))
            }
            ParamType::Tuple(types) => Ok(Token::Tuple(self.decode_sequence(types, pos)?)),
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => {
                self.decode_tail(param_type, pos)
            }
        }
    }

    /// Decode a dynamic value whose body starts at `start`
    fn decode_tail(&mut self, param_type: &ParamType, start: usize) -> Result<Token> {
        match param_type {
            ParamType::Bytes => Ok(Token::Bytes(self.decode_bytes(start)?)),
            ParamType::String => {
                let bytes = self.decode_bytes(start)?;
                let s = String::from_utf8(bytes)
                    .map_err(|e| AbiError::InvalidValue(format!("invalid UTF-8: {}", e)))?;
                Ok(Token::String(s))
            }
            ParamType::Array(inner) => {
                let len = self.read_usize(start)?;
                self.spend(WORD_SIZE)?;
                let elements_start = checked_add(start, WORD_SIZE)?;
                // Every element needs at least its head; reject lengths the data cannot hold
                let min_size = len
                    .checked_mul(inner.head_length())
                    .ok_or(AbiError::InsufficientBytes {
                        need: usize::MAX,
                        have: self.data.len(),
                    })?;
                check_length(self.data, checked_add(elements_start, min_size)?)?;
                let types = vec![(**inner).clone(); len];
                Ok(Token::Array(self.decode_sequence(&types, elements_start)?))
            }
            ParamType::FixedArray(inner, size) => {
                let types = vec![(**inner).clone(); *size];
                Ok(Token::FixedArray(self.decode_sequence(&types, start)?))
            }
            ParamType::Tuple(types) => Ok(Token::Tuple(self.decode_sequence(types, start)?)),
            _ => self.decode_static(param_type, start),
        }
    }

    /// Decode dynamic bytes: length word followed by the payload
    fn decode_bytes(&mut self, start: usize) -> Result<Vec<u8>> {
        let len = self.read_usize(start)?;
        let payload = checked_add(start, WORD_SIZE)?;
        let end = checked_add(payload, len)?;
        check_length(self.data, end)?;
        self.spend(checked_add(WORD_SIZE, len)?)?;
        Ok(self.data[payload..end].to_vec())
    }

    /// Read a word that becomes part of the output
    fn value_word(&mut self, pos: usize) -> Result<&'a [u8]> {
        let word = read_word(self.data, pos)?;
        self.spend(WORD_SIZE)?;
        Ok(word)
    }

    /// Read a word holding a length or offset
    fn read_usize(&self, pos: usize) -> Result<usize> {
        let word = read_word(self.data, pos)?;
        let value = BigInt::from_unsigned_bytes_be(word);
        let value = value
            .to_u64()
            .ok()
            .and_then(|v| usize::try_from(v).ok())
            .filter(|&v| v <= self.data.len())
            .ok_or(AbiError::InsufficientBytes {
                need: usize::MAX,
                have: self.data.len(),
            })?;
        Ok(value)
    }

    fn spend(&mut self, bytes: usize) -> Result<()> {
        match self.budget.checked_sub(bytes) {
            Some(rest) => {
                self.budget = rest;
                Ok(())
            }
            None => Err(AbiError::InsufficientBytes {
                need: self.data.len() - self.budget + bytes,
                have: self.data.len(),
            }),
        }
    }
}

fn read_word(data: &[u8], pos: usize) -> Result<&[u8]> {
    let end = checked_add(pos, WORD_SIZE)?;
    check_length(data, end)?;
    Ok(&data[pos..end])
}

fn check_zero_padding(padding: &[u8], param_type: &ParamType) -> Result<()> {
    if padding.iter().any(|&b| b != 0) {
        return Err(AbiError::InvalidValue(format!("dirty padding for {}", param_type)));
    }
    Ok(())
}

/// The bytes above a `size`-byte signed value must repeat its sign bit
fn check_sign_extension(word: &[u8], size: usize, param_type: &ParamType) -> Result<()> {
    let pad = WORD_SIZE - size;
    if pad == 0 {
        return Ok(());
    }
    let fill = if word[pad] & 0x80 != 0 { 0xff } else { 0x00 };
    if word[..pad].iter().any(|&b| b != fill) {
        return Err(AbiError::InvalidValue(format!("bad sign extension for {}", param_type)));
    }
    Ok(())
}

fn checked_add(a: usize, b: usize) -> Result<usize> {
    a.checked_add(b).ok_or(AbiError::InsufficientBytes {
        need: usize::MAX,
        have: 0,
    })
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<()> {
    if data.len() < required {
        return Err(AbiError::InsufficientBytes {
            need: required,
            have: data.len(),
        });
    }
    Ok(())
}
