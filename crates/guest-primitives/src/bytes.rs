//! Owned, variable-length byte buffer

use std::fmt;
use thiserror::Error;

/// Byte buffer error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BytesError {
    /// Input string is not valid for the requested encoding
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// Buffer content does not fit the requested integer width
    #[error("value does not fit in {width} bytes (buffer has {len})")]
    Overflow {
        /// Target width in bytes
        width: usize,
        /// Buffer length
        len: usize,
    },
}

/// Owned byte buffer.
///
/// All combinators return a fresh buffer; the receiver is never mutated.
#[derive(Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    /// Empty buffer
    pub fn empty() -> Self {
        Bytes(Vec::new())
    }

    /// Copy a slice into a new buffer
    pub fn from_slice(slice: &[u8]) -> Self {
        Bytes(slice.to_vec())
    }

    /// Parse a hex string (with or without 0x prefix).
    ///
    /// The digit count must be even.
    pub fn from_hex_string(s: &str) -> Result<Self, BytesError> {
        let digits = strip_hex_prefix(s);
        if digits.len() % 2 != 0 {
            return Err(BytesError::InvalidFormat(format!(
                "hex string has odd length: {}",
                s
            )));
        }
        hex::decode(digits)
            .map(Bytes)
            .map_err(|e| BytesError::InvalidFormat(format!("{}: {}", e, s)))
    }

    /// UTF-8 bytes of a string
    pub fn from_utf8(s: &str) -> Self {
        Bytes(s.as_bytes().to_vec())
    }

    /// Decode a base58 string (Bitcoin alphabet)
    pub fn from_base58_string(s: &str) -> Result<Self, BytesError> {
        bs58::decode(s)
            .into_vec()
            .map(Bytes)
            .map_err(|e| BytesError::InvalidFormat(format!("{}: {}", e, s)))
    }

    /// Single byte
    pub fn from_u8(value: u8) -> Self {
        Bytes(vec![value])
    }

    /// Single byte, two's complement
    pub fn from_i8(value: i8) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 2 bytes, little-endian
    pub fn from_u16(value: u16) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 2 bytes, little-endian two's complement
    pub fn from_i16(value: i16) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 4 bytes, little-endian
    pub fn from_u32(value: u32) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 4 bytes, little-endian two's complement
    pub fn from_i32(value: i32) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 8 bytes, little-endian
    pub fn from_u64(value: u64) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// 8 bytes, little-endian two's complement
    pub fn from_i64(value: i64) -> Self {
        Bytes(value.to_le_bytes().to_vec())
    }

    /// One byte: 1 for true, 0 for false
    pub fn from_bool(value: bool) -> Self {
        Bytes(vec![value as u8])
    }

    /// Number of bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the buffer holds no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the raw bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Lowercase hex with 0x prefix. An empty buffer renders as `0x`.
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(&self.0))
    }

    /// Interpret the buffer as UTF-8
    pub fn to_utf8_string(&self) -> Result<String, BytesError> {
        String::from_utf8(self.0.clone()).map_err(|e| BytesError::InvalidFormat(e.to_string()))
    }

    /// Base58 (Bitcoin alphabet)
    pub fn to_base58_string(&self) -> String {
        bs58::encode(&self.0).into_string()
    }

    /// Read as a little-endian u32, zero-extending short buffers
    pub fn to_u32(&self) -> Result<u32, BytesError> {
        let raw = self.fixed_le::<4>(false)?;
        Ok(u32::from_le_bytes(raw))
    }

    /// Read as a little-endian i32, sign-extending short buffers
    pub fn to_i32(&self) -> Result<i32, BytesError> {
        let raw = self.fixed_le::<4>(true)?;
        Ok(i32::from_le_bytes(raw))
    }

    /// Read as a little-endian u64, zero-extending short buffers
    pub fn to_u64(&self) -> Result<u64, BytesError> {
        let raw = self.fixed_le::<8>(false)?;
        Ok(u64::from_le_bytes(raw))
    }

    /// Read as a little-endian i64, sign-extending short buffers
    pub fn to_i64(&self) -> Result<i64, BytesError> {
        let raw = self.fixed_le::<8>(true)?;
        Ok(i64::from_le_bytes(raw))
    }

    /// New buffer holding `self` followed by `other`
    pub fn concat(&self, other: &Bytes) -> Bytes {
        let mut out = Vec::with_capacity(self.len() + other.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(&other.0);
        Bytes(out)
    }

    /// New buffer holding `self` followed by the 4 little-endian bytes of `value`
    pub fn concat_i32(&self, value: i32) -> Bytes {
        self.concat(&Bytes::from_i32(value))
    }

    /// New buffer with the byte order reversed
    pub fn reversed(&self) -> Bytes {
        let mut out = self.0.clone();
        out.reverse();
        Bytes(out)
    }

    fn fixed_le<const N: usize>(&self, signed: bool) -> Result<[u8; N], BytesError> {
        let fill = match self.0.last() {
            Some(&last) if signed && last & 0x80 != 0 => 0xff,
            _ => 0x00,
        };
        if self.0.len() > N && self.0[N..].iter().any(|&b| b != fill) {
            return Err(BytesError::Overflow {
                width: N,
                len: self.0.len(),
            });
        }
        if signed && self.0.len() > N && (self.0[N - 1] & 0x80 != 0) != (fill == 0xff) {
            return Err(BytesError::Overflow {
                width: N,
                len: self.0.len(),
            });
        }
        let mut raw = [fill; N];
        let n = self.0.len().min(N);
        raw[..n].copy_from_slice(&self.0[..n]);
        Ok(raw)
    }
}

/// Strip an optional `0x`/`0X` prefix
pub(crate) fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl fmt::Debug for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({})", self.to_hex_string())
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Bytes {
    fn from(bytes: [u8; N]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Bytes {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex_string())
        }
    }

    impl<'de> Deserialize<'de> for Bytes {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Bytes::from_hex_string(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Hex ====================

    #[test]
    fn test_from_hex_with_and_without_prefix() {
        let a = Bytes::from_hex_string("0xabcd").unwrap();
        let b = Bytes::from_hex_string("ABCD").unwrap();
        let c = Bytes::from_hex_string("0Xabcd").unwrap();
        assert_eq!(a.as_bytes(), &[0xab, 0xcd]);
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_from_hex_empty() {
        assert!(Bytes::from_hex_string("0x").unwrap().is_empty());
        assert_eq!(Bytes::empty().to_hex_string(), "0x");
    }

    #[test]
    fn test_from_hex_rejects_odd_length() {
        let err = Bytes::from_hex_string("0xabc").unwrap_err();
        assert!(matches!(err, BytesError::InvalidFormat(_)));
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        assert!(Bytes::from_hex_string("0xzz").is_err());
    }

    #[test]
    fn test_to_hex_lowercase() {
        let bytes = Bytes::from(vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(bytes.to_hex_string(), "0xdeadbeef");
    }

    // ==================== Integers ====================

    #[test]
    fn test_from_i32_little_endian() {
        assert_eq!(Bytes::from_i32(5).to_hex_string(), "0x05000000");
        assert_eq!(Bytes::from_i32(-1).to_hex_string(), "0xffffffff");
    }

    #[test]
    fn test_to_u32_zero_extends() {
        let bytes = Bytes::from(vec![0x01, 0x02]);
        assert_eq!(bytes.to_u32().unwrap(), 0x0201);
    }

    #[test]
    fn test_to_i32_sign_extends() {
        let bytes = Bytes::from(vec![0xfe]);
        assert_eq!(bytes.to_i32().unwrap(), -2);
    }

    #[test]
    fn test_to_u32_overflow() {
        let bytes = Bytes::from(vec![0, 0, 0, 0, 1]);
        assert_eq!(
            bytes.to_u32().unwrap_err(),
            BytesError::Overflow { width: 4, len: 5 }
        );
    }

    #[test]
    fn test_to_u64_accepts_zero_padding() {
        let bytes = Bytes::from(vec![1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(bytes.to_u64().unwrap(), 1);
    }

    #[test]
    fn test_to_i64_roundtrip_negative() {
        assert_eq!(Bytes::from_i64(-123456789).to_i64().unwrap(), -123456789);
    }

    // ==================== Text ====================

    #[test]
    fn test_utf8_roundtrip() {
        let bytes = Bytes::from_utf8("hello");
        assert_eq!(bytes.to_hex_string(), "0x68656c6c6f");
        assert_eq!(bytes.to_utf8_string().unwrap(), "hello");
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = Bytes::from(vec![0xff, 0xfe]);
        assert!(matches!(
            bytes.to_utf8_string(),
            Err(BytesError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_base58() {
        let bytes = Bytes::from_base58_string("11111111111111111111111111111111").unwrap();
        assert_eq!(bytes.len(), 32);
        assert!(bytes.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(bytes.to_base58_string(), "11111111111111111111111111111111");
    }

    #[test]
    fn test_base58_invalid_char() {
        assert!(Bytes::from_base58_string("0OIl").is_err());
    }

    // ==================== Combinators ====================

    #[test]
    fn test_concat_does_not_mutate() {
        let a = Bytes::from(vec![1, 2]);
        let b = Bytes::from(vec![3]);
        let c = a.concat(&b);
        assert_eq!(c.as_bytes(), &[1, 2, 3]);
        assert_eq!(a.as_bytes(), &[1, 2]);
    }

    #[test]
    fn test_concat_i32() {
        let a = Bytes::from(vec![0xaa]);
        assert_eq!(a.concat_i32(1).as_bytes(), &[0xaa, 1, 0, 0, 0]);
    }

    #[test]
    fn test_reversed() {
        let a = Bytes::from(vec![1, 2, 3]);
        assert_eq!(a.reversed().as_bytes(), &[3, 2, 1]);
    }

    #[test]
    fn test_debug_format() {
        let a = Bytes::from(vec![0x0a]);
        assert_eq!(format!("{:?}", a), "Bytes(0x0a)");
    }
}
