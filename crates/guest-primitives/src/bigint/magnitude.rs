//! Unsigned little-endian magnitude arithmetic.
//!
//! Every function takes and returns trimmed magnitudes: no trailing zero
//! bytes, and zero is the empty vector.

use std::cmp::Ordering;

/// Drop high zero bytes
pub(crate) fn trim(mut v: Vec<u8>) -> Vec<u8> {
    while v.last() == Some(&0) {
        v.pop();
    }
    v
}

pub(crate) fn is_zero(a: &[u8]) -> bool {
    a.iter().all(|&b| b == 0)
}

pub(crate) fn cmp(a: &[u8], b: &[u8]) -> Ordering {
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    for i in (0..a.len()).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub(crate) fn add(a: &[u8], b: &[u8]) -> Vec<u8> {
    let len = a.len().max(b.len());
    let mut out = Vec::with_capacity(len + 1);
    let mut carry = 0u16;
    for i in 0..len {
        let sum = *a.get(i).unwrap_or(&0) as u16 + *b.get(i).unwrap_or(&0) as u16 + carry;
        out.push(sum as u8);
        carry = sum >> 8;
    }
    if carry > 0 {
        out.push(carry as u8);
    }
    trim(out)
}

/// `a - b`; callers guarantee `a >= b`
pub(crate) fn sub(a: &[u8], b: &[u8]) -> Vec<u8> {
    debug_assert!(cmp(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0i16;
    for i in 0..a.len() {
        let mut diff = a[i] as i16 - *b.get(i).unwrap_or(&0) as i16 - borrow;
        if diff < 0 {
            diff += 256;
            borrow = 1;
        } else {
            borrow = 0;
        }
        out.push(diff as u8);
    }
    trim(out)
}

/// Schoolbook base-256 multiplication
pub(crate) fn mul(a: &[u8], b: &[u8]) -> Vec<u8> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0u8; a.len() + b.len()];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = 0u32;
        for (j, &y) in b.iter().enumerate() {
            let cur = out[i + j] as u32 + x as u32 * y as u32 + carry;
            out[i + j] = cur as u8;
            carry = cur >> 8;
        }
        let mut k = i + b.len();
        while carry > 0 {
            let cur = out[k] as u32 + carry;
            out[k] = cur as u8;
            carry = cur >> 8;
            k += 1;
        }
    }
    trim(out)
}

/// `a * m + c` for single-byte `m` and `c`
pub(crate) fn mul_small_add(a: &[u8], m: u8, c: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len() + 1);
    let mut carry = c as u32;
    for &x in a {
        let cur = x as u32 * m as u32 + carry;
        out.push(cur as u8);
        carry = cur >> 8;
    }
    if carry > 0 {
        out.push(carry as u8);
    }
    trim(out)
}

/// Divide by a single byte, returning quotient and remainder
pub(crate) fn div_small(a: &[u8], d: u8) -> (Vec<u8>, u8) {
    debug_assert!(d != 0);
    let mut out = vec![0u8; a.len()];
    let mut rem = 0u32;
    for i in (0..a.len()).rev() {
        let cur = (rem << 8) | a[i] as u32;
        out[i] = (cur / d as u32) as u8;
        rem = cur % d as u32;
    }
    (trim(out), rem as u8)
}

/// Schoolbook base-256 long division. `b` must be non-zero.
///
/// Each quotient digit is found by binary search over 0..=255.
pub(crate) fn div_rem(a: &[u8], b: &[u8]) -> (Vec<u8>, Vec<u8>) {
    debug_assert!(!is_zero(b));
    if cmp(a, b) == Ordering::Less {
        return (Vec::new(), a.to_vec());
    }
    let mut quotient = vec![0u8; a.len()];
    let mut rem: Vec<u8> = Vec::new();
    for i in (0..a.len()).rev() {
        // rem = rem * 256 + a[i]
        rem.insert(0, a[i]);
        rem = trim(rem);

        let (mut lo, mut hi) = (0u8, 255u8);
        while lo < hi {
            let mid = ((lo as u16 + hi as u16 + 1) / 2) as u8;
            if cmp(&mul_small_add(b, mid, 0), &rem) != Ordering::Greater {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        if lo > 0 {
            rem = sub(&rem, &mul_small_add(b, lo, 0));
        }
        quotient[i] = lo;
    }
    (trim(quotient), rem)
}

/// `10^exp` by repeated squaring
pub(crate) fn pow10(exp: usize) -> Vec<u8> {
    let mut result = vec![1u8];
    let mut base = vec![10u8];
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = mul(&result, &base);
        }
        e >>= 1;
        if e > 0 {
            base = mul(&base, &base);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_u128(mut v: u128) -> Vec<u8> {
        let mut out = Vec::new();
        while v > 0 {
            out.push(v as u8);
            v >>= 8;
        }
        out
    }

    fn to_u128(v: &[u8]) -> u128 {
        v.iter().rev().fold(0u128, |acc, &b| (acc << 8) | b as u128)
    }

    #[test]
    fn test_add_with_carry() {
        let r = add(&from_u128(0xff), &from_u128(1));
        assert_eq!(to_u128(&r), 0x100);
    }

    #[test]
    fn test_sub_with_borrow() {
        let r = sub(&from_u128(0x100), &from_u128(1));
        assert_eq!(r, vec![0xff]);
    }

    #[test]
    fn test_sub_to_zero() {
        assert!(sub(&from_u128(42), &from_u128(42)).is_empty());
    }

    #[test]
    fn test_mul() {
        let a = 0xdead_beef_u128;
        let b = 0x1234_5678_9abc_u128;
        assert_eq!(to_u128(&mul(&from_u128(a), &from_u128(b))), a * b);
        assert!(mul(&[], &from_u128(5)).is_empty());
    }

    #[test]
    fn test_div_rem() {
        let a = 0x1234_5678_9abc_def0_1122_u128;
        let b = 0x3_4567_u128;
        let (q, r) = div_rem(&from_u128(a), &from_u128(b));
        assert_eq!(to_u128(&q), a / b);
        assert_eq!(to_u128(&r), a % b);
    }

    #[test]
    fn test_div_rem_smaller_dividend() {
        let (q, r) = div_rem(&from_u128(5), &from_u128(7));
        assert!(q.is_empty());
        assert_eq!(to_u128(&r), 5);
    }

    #[test]
    fn test_div_small() {
        let (q, r) = div_small(&from_u128(1234), 10);
        assert_eq!(to_u128(&q), 123);
        assert_eq!(r, 4);
    }

    #[test]
    fn test_pow10() {
        assert_eq!(to_u128(&pow10(0)), 1);
        assert_eq!(to_u128(&pow10(18)), 1_000_000_000_000_000_000);
        assert_eq!(to_u128(&pow10(1)), 10);
        assert_eq!(to_u128(&pow10(38)), 10u128.pow(38));
        assert_eq!(pow10(40), mul(&pow10(20), &pow10(20)));
    }

    #[test]
    fn test_cmp() {
        assert_eq!(cmp(&from_u128(256), &from_u128(255)), Ordering::Greater);
        assert_eq!(cmp(&from_u128(3), &from_u128(3)), Ordering::Equal);
        assert_eq!(cmp(&[], &from_u128(1)), Ordering::Less);
    }
}
