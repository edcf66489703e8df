//! Forward read cursor over Borsh-encoded bytes
//!
//! Fields carry no type tags; the caller reads them in the order the
//! account layout defines. Integers are little-endian.

use guest_primitives::{Address, Bytes};
use tracing::trace;

use crate::error::{BorshError, Result};

/// Size of an SVM public key
pub const PUBKEY_LEN: usize = 32;

/// Sequential decoder over an owned byte buffer.
///
/// Every `try_*` read checks the remaining length first, so a failed read
/// leaves the cursor where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorshDecoder {
    bytes: Vec<u8>,
    offset: usize,
}

impl BorshDecoder {
    /// Decode a hex string (with or without 0x prefix). The digit count must be even.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes =
            Bytes::from_hex_string(hex).map_err(|e| BorshError::InvalidFormat(e.to_string()))?;
        Ok(Self::from_bytes(bytes.into_vec()))
    }

    /// Wrap a byte buffer, cursor at 0
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            offset: 0,
        }
    }

    // ==================== Primitives ====================

    /// One byte; only `1` reads as true
    pub fn try_bool(&mut self) -> Result<bool> {
        Ok(self.take::<1>("bool")?[0] == 1)
    }

    /// Unsigned 8-bit integer
    pub fn try_u8(&mut self) -> Result<u8> {
        Ok(self.take::<1>("u8")?[0])
    }

    /// Little-endian u16
    pub fn try_u16(&mut self) -> Result<u16> {
        self.take("u16").map(u16::from_le_bytes)
    }

    /// Little-endian u32
    pub fn try_u32(&mut self) -> Result<u32> {
        self.take("u32").map(u32::from_le_bytes)
    }

    /// Little-endian u64
    pub fn try_u64(&mut self) -> Result<u64> {
        self.take("u64").map(u64::from_le_bytes)
    }

    /// 32-byte public key
    pub fn try_pubkey(&mut self) -> Result<Address> {
        self.take::<PUBKEY_LEN>("pubkey").map(Address::Svm)
    }

    /// `u32` length followed by UTF-8 bytes.
    ///
    /// Fixed-size account fields pad strings with NUL bytes; trailing NULs
    /// are trimmed.
    pub fn try_string(&mut self) -> Result<String> {
        let start = self.offset;
        let len = self.try_u32()? as usize;
        let raw = match self.take_slice("string", len) {
            Ok(raw) => raw,
            Err(e) => {
                self.offset = start;
                return Err(e);
            }
        };
        match String::from_utf8(raw.to_vec()) {
            Ok(s) => Ok(s.trim_end_matches('\0').to_string()),
            Err(e) => {
                self.offset = start;
                Err(BorshError::InvalidFormat(format!("invalid UTF-8 string: {}", e)))
            }
        }
    }

    // ==================== Options ====================

    /// `u32` discriminant (0 absent, 1 present) followed by the value when present
    pub fn try_option<T, F>(&mut self, read: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let start = self.offset;
        let result = match self.try_u32()? {
            0 => Ok(None),
            1 => read(self).map(Some),
            tag => Err(BorshError::InvalidTag(tag)),
        };
        if result.is_err() {
            self.offset = start;
        }
        result
    }

    /// Optional bool
    pub fn try_option_bool(&mut self) -> Result<Option<bool>> {
        self.try_option(Self::try_bool)
    }

    /// Optional u8
    pub fn try_option_u8(&mut self) -> Result<Option<u8>> {
        self.try_option(Self::try_u8)
    }

    /// Optional u16
    pub fn try_option_u16(&mut self) -> Result<Option<u16>> {
        self.try_option(Self::try_u16)
    }

    /// Optional u32
    pub fn try_option_u32(&mut self) -> Result<Option<u32>> {
        self.try_option(Self::try_u32)
    }

    /// Optional u64
    pub fn try_option_u64(&mut self) -> Result<Option<u64>> {
        self.try_option(Self::try_u64)
    }

    /// Optional public key
    pub fn try_option_pubkey(&mut self) -> Result<Option<Address>> {
        self.try_option(Self::try_pubkey)
    }

    // ==================== Cursor ====================

    /// Current read position
    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Jump to `offset`. Seeking to exactly the end is allowed.
    pub fn set_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.bytes.len() {
            return Err(BorshError::OffsetOutOfRange {
                offset,
                len: self.bytes.len(),
            });
        }
        self.offset = offset;
        Ok(())
    }

    /// True once every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.offset >= self.bytes.len()
    }

    /// Total buffer length
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    fn take<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let slice = self.take_slice(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    fn take_slice(&mut self, field: &'static str, width: usize) -> Result<&[u8]> {
        let have = self.remaining();
        if width > have {
            return Err(BorshError::InsufficientBytes {
                field,
                offset: self.offset,
                need: width,
                have,
            });
        }
        trace!(kind = field, offset = self.offset, width, "borsh read");
        let start = self.offset;
        self.offset += width;
        Ok(&self.bytes[start..self.offset])
    }
}
