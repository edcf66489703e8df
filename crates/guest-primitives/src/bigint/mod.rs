//! Arbitrary-precision signed integer.
//!
//! A [`BigInt`] is a little-endian two's-complement byte sequence of any
//! length. The sign is the high bit of the most significant (last) byte.
//! Values are kept in minimal form: redundant `0x00`/`0xff` sign-extension
//! bytes are dropped on construction, and zero is the single byte `0x00`.
//!
//! Arithmetic goes through unsigned magnitudes plus explicit sign
//! bookkeeping; see `magnitude.rs`. Operators are named methods
//! (`plus`, `minus`, `times`, ...) rather than trait overloads.

mod arith;
mod format;
mod magnitude;
mod parse;

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use thiserror::Error;

use crate::bytes::Bytes;

/// BigInt error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BigIntError {
    /// Input string is not a valid number
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    /// Division or remainder by zero
    #[error("division by zero")]
    DivisionByZero,
    /// Value does not fit the requested type
    #[error("value out of range for {0}")]
    Overflow(&'static str),
    /// Square root of a negative value
    #[error("square root of negative number")]
    NegativeRoot,
    /// Aggregate over an empty input
    #[error("empty input")]
    EmptyInput,
}

/// Arbitrary-precision signed integer (little-endian two's complement)
#[derive(Clone)]
pub struct BigInt {
    bytes: Vec<u8>,
}

impl BigInt {
    /// 0
    pub fn zero() -> Self {
        BigInt { bytes: vec![0] }
    }

    /// 1
    pub fn one() -> Self {
        BigInt { bytes: vec![1] }
    }

    /// Interpret little-endian two's-complement bytes. Empty input is zero.
    pub fn from_signed_bytes(bytes: &[u8]) -> Self {
        Self::from_raw(bytes.to_vec())
    }

    /// Interpret little-endian unsigned bytes
    pub fn from_unsigned_bytes(bytes: &[u8]) -> Self {
        let mut raw = bytes.to_vec();
        raw.push(0);
        Self::from_raw(raw)
    }

    /// Interpret big-endian two's-complement bytes
    pub fn from_signed_bytes_be(bytes: &[u8]) -> Self {
        let mut raw = bytes.to_vec();
        raw.reverse();
        Self::from_raw(raw)
    }

    /// Interpret big-endian unsigned bytes
    pub fn from_unsigned_bytes_be(bytes: &[u8]) -> Self {
        let mut raw = bytes.to_vec();
        raw.reverse();
        raw.push(0);
        Self::from_raw(raw)
    }

    /// Interpret a buffer as little-endian two's complement
    pub fn from_bytes(bytes: &Bytes) -> Self {
        Self::from_signed_bytes(bytes.as_bytes())
    }

    /// From a native i32
    pub fn from_i32(value: i32) -> Self {
        Self::from_raw(value.to_le_bytes().to_vec())
    }

    /// From a native u32
    pub fn from_u32(value: u32) -> Self {
        Self::from_unsigned_bytes(&value.to_le_bytes())
    }

    /// From a native i64
    pub fn from_i64(value: i64) -> Self {
        Self::from_raw(value.to_le_bytes().to_vec())
    }

    /// From a native u64
    pub fn from_u64(value: u64) -> Self {
        Self::from_unsigned_bytes(&value.to_le_bytes())
    }

    /// Minimal little-endian two's-complement bytes
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from(self.bytes.clone())
    }

    /// Minimal big-endian two's-complement bytes
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = self.bytes.clone();
        out.reverse();
        out
    }

    /// Big-endian magnitude without leading zeros; fails on negatives
    pub fn to_unsigned_bytes_be(&self) -> Result<Vec<u8>, BigIntError> {
        if self.is_negative() {
            return Err(BigIntError::Overflow("unsigned"));
        }
        let mut out = magnitude::trim(self.bytes.clone());
        out.reverse();
        Ok(out)
    }

    /// 32-byte big-endian sign-extended word
    pub fn to_be_word(&self) -> Result<[u8; 32], BigIntError> {
        if self.bytes.len() > 32 {
            return Err(BigIntError::Overflow("int256"));
        }
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let mut word = [fill; 32];
        for (i, &b) in self.bytes.iter().enumerate() {
            word[31 - i] = b;
        }
        Ok(word)
    }

    /// Convert to i32
    pub fn to_i32(&self) -> Result<i32, BigIntError> {
        let raw = self.sign_extended::<4>().ok_or(BigIntError::Overflow("i32"))?;
        Ok(i32::from_le_bytes(raw))
    }

    /// Convert to i64
    pub fn to_i64(&self) -> Result<i64, BigIntError> {
        let raw = self.sign_extended::<8>().ok_or(BigIntError::Overflow("i64"))?;
        Ok(i64::from_le_bytes(raw))
    }

    /// Convert to u32
    pub fn to_u32(&self) -> Result<u32, BigIntError> {
        let mag = self.unsigned_magnitude().ok_or(BigIntError::Overflow("u32"))?;
        if mag.len() > 4 {
            return Err(BigIntError::Overflow("u32"));
        }
        let mut raw = [0u8; 4];
        raw[..mag.len()].copy_from_slice(&mag);
        Ok(u32::from_le_bytes(raw))
    }

    /// Convert to u64
    pub fn to_u64(&self) -> Result<u64, BigIntError> {
        let mag = self.unsigned_magnitude().ok_or(BigIntError::Overflow("u64"))?;
        if mag.len() > 8 {
            return Err(BigIntError::Overflow("u64"));
        }
        let mut raw = [0u8; 8];
        raw[..mag.len()].copy_from_slice(&mag);
        Ok(u64::from_le_bytes(raw))
    }

    /// True if the value fits in an i32
    pub fn is_i32(&self) -> bool {
        self.bytes.len() <= 4
    }

    /// True for 0
    pub fn is_zero(&self) -> bool {
        self.bytes == [0]
    }

    /// True when the sign bit is set
    pub fn is_negative(&self) -> bool {
        self.bytes.last().is_some_and(|&b| b & 0x80 != 0)
    }

    /// Three-way comparison: -1, 0 or 1
    pub fn compare(a: &BigInt, b: &BigInt) -> i32 {
        match a.cmp(b) {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    /// `self < other`
    pub fn lt(&self, other: &BigInt) -> bool {
        BigInt::compare(self, other) < 0
    }

    /// `self <= other`
    pub fn le(&self, other: &BigInt) -> bool {
        BigInt::compare(self, other) <= 0
    }

    /// `self > other`
    pub fn gt(&self, other: &BigInt) -> bool {
        BigInt::compare(self, other) > 0
    }

    /// `self >= other`
    pub fn ge(&self, other: &BigInt) -> bool {
        BigInt::compare(self, other) >= 0
    }

    /// `self == other`
    pub fn equals(&self, other: &BigInt) -> bool {
        BigInt::compare(self, other) == 0
    }

    /// `self != other`
    pub fn not_equals(&self, other: &BigInt) -> bool {
        !self.equals(other)
    }

    fn from_raw(raw: Vec<u8>) -> Self {
        BigInt {
            bytes: normalize(raw),
        }
    }

    /// Build from a sign and an unsigned magnitude
    fn from_magnitude(negative: bool, mag: Vec<u8>) -> Self {
        let mut raw = magnitude::trim(mag);
        if raw.is_empty() {
            return Self::zero();
        }
        raw.push(0);
        if negative {
            negate_in_place(&mut raw);
        }
        Self::from_raw(raw)
    }

    /// Absolute value as an unsigned magnitude
    fn magnitude(&self) -> Vec<u8> {
        let mut raw = self.bytes.clone();
        if self.is_negative() {
            negate_in_place(&mut raw);
        }
        magnitude::trim(raw)
    }

    fn unsigned_magnitude(&self) -> Option<Vec<u8>> {
        if self.is_negative() {
            None
        } else {
            Some(magnitude::trim(self.bytes.clone()))
        }
    }

    fn sign_extended<const N: usize>(&self) -> Option<[u8; N]> {
        if self.bytes.len() > N {
            return None;
        }
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let mut raw = [fill; N];
        raw[..self.bytes.len()].copy_from_slice(&self.bytes);
        Some(raw)
    }

    /// Sign-extend to at least `len` bytes
    fn extended(&self, len: usize) -> Vec<u8> {
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let mut raw = self.bytes.clone();
        raw.resize(len.max(raw.len()), fill);
        raw
    }
}

/// Drop redundant sign-extension bytes. Empty input becomes zero.
fn normalize(mut raw: Vec<u8>) -> Vec<u8> {
    while raw.len() > 1 {
        let last = raw[raw.len() - 1];
        let next_high = raw[raw.len() - 2] & 0x80;
        if (last == 0x00 && next_high == 0) || (last == 0xff && next_high != 0) {
            raw.pop();
        } else {
            break;
        }
    }
    if raw.is_empty() {
        raw.push(0);
    }
    raw
}

/// Two's-complement negation: invert every bit and add one
fn negate_in_place(raw: &mut [u8]) {
    let mut carry = true;
    for b in raw.iter_mut() {
        *b = !*b;
        if carry {
            let (sum, overflow) = b.overflowing_add(1);
            *b = sum;
            carry = overflow;
        }
    }
}

/// Median of a non-empty slice. For even counts, the truncated mean of the
/// two middle values.
pub fn median(values: &[BigInt]) -> Result<BigInt, BigIntError> {
    if values.is_empty() {
        return Err(BigIntError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Ok(sorted[mid].clone())
    } else {
        sorted[mid - 1].plus(&sorted[mid]).div(&BigInt::from_i32(2))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a_neg, b_neg) = (self.is_negative(), other.is_negative());
        if a_neg != b_neg {
            return if a_neg { Ordering::Less } else { Ordering::Greater };
        }
        let (a, b) = (&self.bytes, &other.bytes);
        if a.len() != b.len() {
            let longer = a.len().cmp(&b.len());
            return if a_neg { longer.reverse() } else { longer };
        }
        // Same sign and width: unsigned byte order matches numeric order
        for i in (0..a.len()).rev() {
            match a[i].cmp(&b[i]) {
                Ordering::Equal => continue,
                other => return other,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigInt {}

impl Hash for BigInt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i32> for BigInt {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<u32> for BigInt {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for BigInt {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for BigInt {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            BigInt::from_string(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Construction ====================

    #[test]
    fn test_minimal_form() {
        assert_eq!(BigInt::from_i32(0).to_bytes().as_bytes(), &[0]);
        assert_eq!(BigInt::from_i32(1).to_bytes().as_bytes(), &[1]);
        assert_eq!(BigInt::from_i32(-1).to_bytes().as_bytes(), &[0xff]);
        assert_eq!(BigInt::from_i32(128).to_bytes().as_bytes(), &[0x80, 0x00]);
        assert_eq!(BigInt::from_i32(-128).to_bytes().as_bytes(), &[0x80]);
        assert_eq!(BigInt::from_i32(-129).to_bytes().as_bytes(), &[0x7f, 0xff]);
    }

    #[test]
    fn test_from_unsigned_widens() {
        let v = BigInt::from_u32(u32::MAX);
        assert!(!v.is_negative());
        assert_eq!(v.to_bytes().as_bytes(), &[0xff, 0xff, 0xff, 0xff, 0x00]);
        assert_eq!(v.to_u32().unwrap(), u32::MAX);
    }

    #[test]
    fn test_from_signed_bytes_empty_is_zero() {
        assert!(BigInt::from_signed_bytes(&[]).is_zero());
    }

    #[test]
    fn test_from_bytes_be() {
        assert_eq!(BigInt::from_unsigned_bytes_be(&[0x03, 0xe8]).to_i32().unwrap(), 1000);
        assert_eq!(BigInt::from_signed_bytes_be(&[0xff, 0x18]).to_i32().unwrap(), -232);
    }

    // ==================== Conversions ====================

    #[test]
    fn test_to_i32_range() {
        assert_eq!(BigInt::from_i32(i32::MIN).to_i32().unwrap(), i32::MIN);
        assert_eq!(
            BigInt::from_i64(i32::MAX as i64 + 1).to_i32(),
            Err(BigIntError::Overflow("i32"))
        );
    }

    #[test]
    fn test_to_u64_rejects_negative() {
        assert!(BigInt::from_i32(-1).to_u64().is_err());
        assert_eq!(BigInt::from_u64(u64::MAX).to_u64().unwrap(), u64::MAX);
    }

    #[test]
    fn test_to_be_word() {
        let word = BigInt::from_i32(-1).to_be_word().unwrap();
        assert!(word.iter().all(|&b| b == 0xff));
        let word = BigInt::from_i32(1000).to_be_word().unwrap();
        assert_eq!(&word[30..], &[0x03, 0xe8]);
        assert!(word[..30].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_to_unsigned_bytes_be() {
        assert_eq!(BigInt::from_u32(0x80).to_unsigned_bytes_be().unwrap(), vec![0x80]);
        assert!(BigInt::zero().to_unsigned_bytes_be().unwrap().is_empty());
        assert!(BigInt::from_i32(-5).to_unsigned_bytes_be().is_err());
    }

    #[test]
    fn test_is_i32() {
        assert!(BigInt::from_i32(i32::MIN).is_i32());
        assert!(!BigInt::from_u32(u32::MAX).is_i32());
    }

    // ==================== Comparison ====================

    #[test]
    fn test_compare_signs() {
        let neg = BigInt::from_i32(-5);
        let pos = BigInt::from_i32(3);
        assert_eq!(BigInt::compare(&neg, &pos), -1);
        assert_eq!(BigInt::compare(&pos, &neg), 1);
    }

    #[test]
    fn test_compare_negative_widths() {
        let a = BigInt::from_i32(-1000);
        let b = BigInt::from_i32(-1);
        assert!(a.lt(&b));
        assert!(b.gt(&a));
    }

    #[test]
    fn test_compare_ignores_padding() {
        let a = BigInt::from_signed_bytes(&[0x05, 0x00, 0x00, 0x00]);
        let b = BigInt::from_signed_bytes(&[0x05]);
        assert!(a.equals(&b));
        let c = BigInt::from_signed_bytes(&[0xfb, 0xff, 0xff]);
        assert_eq!(c, BigInt::from_i32(-5));
    }

    // ==================== Median ====================

    #[test]
    fn test_median_odd() {
        let values: Vec<BigInt> = [5, 1, 3].iter().map(|&v| BigInt::from_i32(v)).collect();
        assert_eq!(median(&values).unwrap(), BigInt::from_i32(3));
    }

    #[test]
    fn test_median_even() {
        let values: Vec<BigInt> = [4, 1, 3, 10].iter().map(|&v| BigInt::from_i32(v)).collect();
        assert_eq!(median(&values).unwrap(), BigInt::from_i32(3));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), Err(BigIntError::EmptyInput));
    }
}
