//! Signed arithmetic, shifts and bitwise operations

use std::cmp::Ordering;

use super::{magnitude, BigInt, BigIntError};

impl BigInt {
    /// `self + other`
    pub fn plus(&self, other: &BigInt) -> BigInt {
        let (a_neg, b_neg) = (self.is_negative(), other.is_negative());
        let (a, b) = (self.magnitude(), other.magnitude());
        if a_neg == b_neg {
            return BigInt::from_magnitude(a_neg, magnitude::add(&a, &b));
        }
        match magnitude::cmp(&a, &b) {
            Ordering::Greater => BigInt::from_magnitude(a_neg, magnitude::sub(&a, &b)),
            Ordering::Less => BigInt::from_magnitude(b_neg, magnitude::sub(&b, &a)),
            Ordering::Equal => BigInt::zero(),
        }
    }

    /// `self - other`
    pub fn minus(&self, other: &BigInt) -> BigInt {
        self.plus(&other.neg())
    }

    /// `self * other`
    pub fn times(&self, other: &BigInt) -> BigInt {
        let negative = self.is_negative() != other.is_negative();
        BigInt::from_magnitude(negative, magnitude::mul(&self.magnitude(), &other.magnitude()))
    }

    /// `self / other`, truncated toward zero
    pub fn div(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        if other.is_zero() {
            return Err(BigIntError::DivisionByZero);
        }
        let negative = self.is_negative() != other.is_negative();
        let (quotient, _) = magnitude::div_rem(&self.magnitude(), &other.magnitude());
        Ok(BigInt::from_magnitude(negative, quotient))
    }

    /// `self / other` where the divisor is a native i32
    pub fn div_i32(&self, other: i32) -> Result<BigInt, BigIntError> {
        self.div(&BigInt::from_i32(other))
    }

    /// `self - (self / other) * other`. The result takes the dividend's sign.
    pub fn rem(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        let quotient = self.div(other)?;
        Ok(self.minus(&quotient.times(other)))
    }

    /// `self ^ exp` by repeated squaring
    pub fn pow(&self, exp: u32) -> BigInt {
        let mut result = BigInt::one();
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result.times(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.times(&base);
            }
        }
        result
    }

    /// `-self`
    pub fn neg(&self) -> BigInt {
        BigInt::from_magnitude(!self.is_negative(), self.magnitude())
    }

    /// `|self|`
    pub fn abs(&self) -> BigInt {
        BigInt::from_magnitude(false, self.magnitude())
    }

    /// Floor of the square root, by Newton iteration
    pub fn sqrt(&self) -> Result<BigInt, BigIntError> {
        if self.is_negative() {
            return Err(BigIntError::NegativeRoot);
        }
        if self.is_zero() {
            return Ok(BigInt::zero());
        }
        let x = self.magnitude();
        let two = [2u8];
        let mut y = x.clone();
        let mut z = magnitude::div_rem(&magnitude::add(&x, &[1]), &two).0;
        while magnitude::cmp(&z, &y) == Ordering::Less {
            y = z.clone();
            let (q, _) = magnitude::div_rem(&x, &z);
            z = magnitude::div_rem(&magnitude::add(&q, &z), &two).0;
        }
        Ok(BigInt::from_magnitude(false, y))
    }

    /// `self << bits`
    pub fn left_shift(&self, bits: u32) -> BigInt {
        let byte_shift = (bits / 8) as usize;
        let bit_shift = bits % 8;
        let fill = if self.is_negative() { 0xff } else { 0x00 };

        let mut src = self.bytes.clone();
        src.push(fill);

        let mut out = vec![0u8; byte_shift];
        out.reserve(src.len());
        for i in 0..src.len() {
            let low = if bit_shift > 0 && i > 0 {
                src[i - 1] >> (8 - bit_shift)
            } else {
                0
            };
            out.push((src[i] << bit_shift) | low);
        }
        BigInt::from_raw(out)
    }

    /// `self >> bits`, arithmetic: the sign bit fills from the top
    pub fn right_shift(&self, bits: u32) -> BigInt {
        let byte_shift = (bits / 8) as usize;
        let bit_shift = bits % 8;
        let fill = if self.is_negative() { 0xff } else { 0x00 };

        if byte_shift >= self.bytes.len() {
            return BigInt::from_raw(vec![fill]);
        }
        let src = &self.bytes[byte_shift..];
        let mut out = Vec::with_capacity(src.len());
        for i in 0..src.len() {
            let next = *src.get(i + 1).unwrap_or(&fill);
            let high = if bit_shift > 0 {
                next << (8 - bit_shift)
            } else {
                0
            };
            out.push((src[i] >> bit_shift) | high);
        }
        BigInt::from_raw(out)
    }

    /// Bitwise OR over two's complement
    pub fn bit_or(&self, other: &BigInt) -> BigInt {
        self.bitwise(other, |a, b| a | b)
    }

    /// Bitwise AND over two's complement
    pub fn bit_and(&self, other: &BigInt) -> BigInt {
        self.bitwise(other, |a, b| a & b)
    }

    /// `self * 10^precision`
    pub fn upscale(&self, precision: u8) -> BigInt {
        let factor = magnitude::pow10(precision as usize);
        BigInt::from_magnitude(self.is_negative(), magnitude::mul(&self.magnitude(), &factor))
    }

    /// `self / 10^precision`, truncated toward zero
    pub fn downscale(&self, precision: u8) -> BigInt {
        let factor = magnitude::pow10(precision as usize);
        let (quotient, _) = magnitude::div_rem(&self.magnitude(), &factor);
        BigInt::from_magnitude(self.is_negative(), quotient)
    }

    fn bitwise(&self, other: &BigInt, op: impl Fn(u8, u8) -> u8) -> BigInt {
        let len = self.bytes.len().max(other.bytes.len());
        let (a, b) = (self.extended(len), other.extended(len));
        let out = a.iter().zip(b.iter()).map(|(&x, &y)| op(x, y)).collect();
        BigInt::from_raw(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> BigInt {
        BigInt::from_i64(v)
    }

    // ==================== Addition ====================

    #[test]
    fn test_plus_same_sign() {
        assert_eq!(int(100).plus(&int(28)), int(128));
        assert_eq!(int(-100).plus(&int(-28)), int(-128));
        assert_eq!(int(-128).plus(&int(-1)), int(-129));
    }

    #[test]
    fn test_plus_mixed_sign() {
        assert_eq!(int(5).plus(&int(-8)), int(-3));
        assert_eq!(int(-5).plus(&int(8)), int(3));
        assert!(int(7).plus(&int(-7)).is_zero());
    }

    #[test]
    fn test_minus() {
        assert_eq!(int(3).minus(&int(10)), int(-7));
        assert_eq!(int(i64::MIN).minus(&int(1)).to_string(), "-9223372036854775809");
    }

    // ==================== Multiplication / division ====================

    #[test]
    fn test_times_signs() {
        assert_eq!(int(-6).times(&int(7)), int(-42));
        assert_eq!(int(-6).times(&int(-7)), int(42));
        assert!(int(0).times(&int(-7)).is_zero());
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        assert_eq!(int(7).div(&int(2)).unwrap(), int(3));
        assert_eq!(int(-7).div(&int(2)).unwrap(), int(-3));
        assert_eq!(int(7).div(&int(-2)).unwrap(), int(-3));
        assert_eq!(int(-7).div_i32(-2).unwrap(), int(3));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(int(1).div(&BigInt::zero()), Err(BigIntError::DivisionByZero));
        assert_eq!(int(1).rem(&BigInt::zero()), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn test_rem_follows_dividend_sign() {
        assert_eq!(int(7).rem(&int(3)).unwrap(), int(1));
        assert_eq!(int(-7).rem(&int(3)).unwrap(), int(-1));
        assert_eq!(int(7).rem(&int(-3)).unwrap(), int(1));
    }

    #[test]
    fn test_pow() {
        assert_eq!(int(2).pow(0), int(1));
        assert_eq!(int(2).pow(10), int(1024));
        assert_eq!(int(-3).pow(3), int(-27));
        assert_eq!(
            int(10).pow(30).to_string(),
            "1000000000000000000000000000000"
        );
    }

    // ==================== Negation ====================

    #[test]
    fn test_neg_edge_widths() {
        assert_eq!(int(-128).neg(), int(128));
        assert_eq!(int(128).neg(), int(-128));
        assert_eq!(int(i32::MIN as i64).neg().to_i64().unwrap(), 2147483648);
        assert!(BigInt::zero().neg().is_zero());
    }

    #[test]
    fn test_abs() {
        assert_eq!(int(-42).abs(), int(42));
        assert_eq!(int(42).abs(), int(42));
    }

    // ==================== Shifts ====================

    #[test]
    fn test_right_shift_arithmetic() {
        assert_eq!(BigInt::from_i32(-8).right_shift(1).to_i32().unwrap(), -4);
        assert_eq!(int(-1).right_shift(100), int(-1));
        assert_eq!(int(-9).right_shift(1), int(-5));
        assert_eq!(int(256).right_shift(8), int(1));
        assert!(int(255).right_shift(8).is_zero());
    }

    #[test]
    fn test_left_shift() {
        assert_eq!(BigInt::from_i32(1).left_shift(3).to_i32().unwrap(), 8);
        assert_eq!(int(1).left_shift(64).to_string(), "18446744073709551616");
        assert_eq!(int(-1).left_shift(1), int(-2));
        assert_eq!(int(-3).left_shift(9), int(-1536));
        assert_eq!(int(64).left_shift(1), int(128));
    }

    // ==================== Square root ====================

    #[test]
    fn test_sqrt() {
        assert!(int(0).sqrt().unwrap().is_zero());
        assert_eq!(int(1).sqrt().unwrap(), int(1));
        assert_eq!(int(15).sqrt().unwrap(), int(3));
        assert_eq!(int(16).sqrt().unwrap(), int(4));
        assert_eq!(int(1_000_000_000_000).sqrt().unwrap(), int(1_000_000));
    }

    #[test]
    fn test_sqrt_negative() {
        assert_eq!(int(-4).sqrt(), Err(BigIntError::NegativeRoot));
    }

    // ==================== Bitwise / scaling ====================

    #[test]
    fn test_bitwise() {
        assert_eq!(int(0b1100).bit_or(&int(0b1010)), int(0b1110));
        assert_eq!(int(0b1100).bit_and(&int(0b1010)), int(0b1000));
        assert_eq!(int(-1).bit_and(&int(0x1234)), int(0x1234));
        assert_eq!(int(-256).bit_or(&int(0xff)), int(-1));
    }

    #[test]
    fn test_upscale_downscale() {
        assert_eq!(int(15).upscale(2), int(1500));
        assert_eq!(int(-1599).downscale(2), int(-15));
        assert_eq!(int(7).upscale(18).downscale(18), int(7));
    }
}
