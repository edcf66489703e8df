//! Decimal and hex rendering

use std::fmt;

use super::{magnitude, BigInt};

impl BigInt {
    /// Render with an implicit decimal point `precision` digits from the
    /// right. Trailing fractional zeros are dropped.
    ///
    /// `10050` at precision 2 renders as `"100.5"`.
    pub fn to_string_decimal(&self, precision: u8) -> String {
        let digits = magnitude_to_decimal(&self.magnitude());
        let precision = precision as usize;
        let sign = if self.is_negative() { "-" } else { "" };
        if precision == 0 {
            return format!("{}{}", sign, digits);
        }

        let padded = if digits.len() <= precision {
            format!("{}{}", "0".repeat(precision + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - precision);
        let frac_part = frac_part.trim_end_matches('0');
        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    }

    /// Hex magnitude with a 0x prefix and no leading zeros: `0x3e8`,
    /// `-0x3e8`, `0x0`
    pub fn to_hex(&self) -> String {
        let mut be = self.magnitude();
        be.reverse();
        let encoded = hex::encode(be);
        let trimmed = encoded.trim_start_matches('0');
        let sign = if self.is_negative() { "-" } else { "" };
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("{}0x{}", sign, trimmed)
        }
    }
}

/// Decimal digits of an unsigned magnitude
fn magnitude_to_decimal(mag: &[u8]) -> String {
    if magnitude::is_zero(mag) {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    let mut current = mag.to_vec();
    while !current.is_empty() {
        let (quotient, rem) = magnitude::div_small(&current, 10);
        digits.push(b'0' + rem);
        current = quotient;
    }
    digits.iter().rev().map(|&d| d as char).collect()
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_decimal(0))
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({})", self.to_string_decimal(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(BigInt::from_i32(0).to_string(), "0");
        assert_eq!(BigInt::from_i32(-42).to_string(), "-42");
        assert_eq!(BigInt::from_u64(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_to_string_decimal() {
        let v = BigInt::from_i32(10050);
        assert_eq!(v.to_string_decimal(2), "100.5");
        assert_eq!(v.to_string_decimal(0), "10050");
        assert_eq!(v.to_string_decimal(5), "0.1005");
        assert_eq!(v.to_string_decimal(7), "0.001005");
        assert_eq!(BigInt::from_i32(100).to_string_decimal(2), "1");
        assert_eq!(BigInt::from_i32(-5).to_string_decimal(1), "-0.5");
        assert_eq!(BigInt::zero().to_string_decimal(18), "0");
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(BigInt::from_i32(1000).to_hex(), "0x3e8");
        assert_eq!(BigInt::from_i32(-1000).to_hex(), "-0x3e8");
        assert_eq!(BigInt::zero().to_hex(), "0x0");
        assert_eq!(BigInt::from_i32(255).to_hex(), "0xff");
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", BigInt::from_i32(7)), "BigInt(7)");
    }
}
