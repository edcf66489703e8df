//! String parsing: decimal, scientific notation, hex, and the serialized form

use tracing::trace;

use super::{magnitude, BigInt, BigIntError};

const SERIALIZED_PREFIX: &str = "BigInt";

/// A parsed decimal literal: `digits * 10^exponent`, with a sign
struct DecimalLiteral {
    negative: bool,
    digits: Vec<u8>,
    exponent: i64,
}

impl BigInt {
    /// Largest effective power of ten a decimal literal may carry, after
    /// adding the requested precision. Larger exponents are rejected.
    pub const MAX_DECIMAL_EXPONENT: i64 = 4096;

    /// Parse an integer string.
    ///
    /// Accepts an optional `+`/`-` sign followed by either a `0x`-prefixed
    /// hex magnitude or a decimal number with an optional fractional part and
    /// `e`/`E` exponent. Fractional digits that survive the exponent shift are
    /// truncated toward zero.
    pub fn from_string(s: &str) -> Result<BigInt, BigIntError> {
        Self::from_string_decimal(s, 0)
    }

    /// Parse a decimal string and scale it by `10^precision`.
    ///
    /// `"100.5"` at precision 2 is `10050`. Digits beyond `precision` are
    /// truncated.
    pub fn from_string_decimal(s: &str, precision: u8) -> Result<BigInt, BigIntError> {
        let (negative, body) = split_sign(s);
        if is_hex_prefixed(body) {
            let value = parse_hex_magnitude(&body[2..], s)?;
            return Ok(BigInt::from_magnitude(negative, value).upscale(precision));
        }
        let literal = parse_decimal(negative, body, s)?;
        let exponent = literal.exponent.saturating_add(precision as i64);
        if exponent > Self::MAX_DECIMAL_EXPONENT {
            return Err(BigIntError::InvalidFormat(format!(
                "exponent {} exceeds {}: {}",
                exponent,
                Self::MAX_DECIMAL_EXPONENT,
                s
            )));
        }
        trace!(input = s, exponent, "parsed decimal literal");
        Ok(literal.scaled(exponent))
    }

    /// Parse a hex string, with or without 0x prefix, as a magnitude.
    ///
    /// A leading `-` negates. Odd digit counts are accepted.
    pub fn from_hex_string(s: &str) -> Result<BigInt, BigIntError> {
        let (negative, body) = split_sign(s);
        let digits = if is_hex_prefixed(body) { &body[2..] } else { body };
        let value = parse_hex_magnitude(digits, s)?;
        Ok(BigInt::from_magnitude(negative, value))
    }

    /// Parse the `BigInt(<value>)` serialized form
    pub fn parse_serialized(serialized: &str) -> Result<BigInt, BigIntError> {
        let inner = serialized
            .strip_prefix(SERIALIZED_PREFIX)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| {
                BigIntError::InvalidFormat(format!("not a serialized BigInt: {}", serialized))
            })?;
        BigInt::from_string(inner)
    }

    /// `BigInt(<decimal>)`
    pub fn serialize(&self) -> String {
        format!("{}({})", SERIALIZED_PREFIX, self)
    }
}

impl DecimalLiteral {
    fn scaled(&self, exponent: i64) -> BigInt {
        let mag = if exponent >= 0 {
            magnitude::mul(&self.digits, &magnitude::pow10(exponent as usize))
        } else {
            let shift = exponent.unsigned_abs() as usize;
            if shift > self.digit_count() {
                Vec::new()
            } else {
                magnitude::div_rem(&self.digits, &magnitude::pow10(shift)).0
            }
        };
        BigInt::from_magnitude(self.negative, mag)
    }

    fn digit_count(&self) -> usize {
        // Upper bound: every byte contributes fewer than three decimal digits
        self.digits.len() * 3
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}

fn is_hex_prefixed(s: &str) -> bool {
    s.starts_with("0x") || s.starts_with("0X")
}

fn parse_hex_magnitude(digits: &str, input: &str) -> Result<Vec<u8>, BigIntError> {
    if digits.is_empty() {
        return Err(BigIntError::InvalidFormat(format!("empty hex number: {}", input)));
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let mut be = hex::decode(padded)
        .map_err(|e| BigIntError::InvalidFormat(format!("{}: {}", e, input)))?;
    be.reverse();
    Ok(magnitude::trim(be))
}

fn parse_decimal(negative: bool, body: &str, input: &str) -> Result<DecimalLiteral, BigIntError> {
    let invalid = || BigIntError::InvalidFormat(input.to_string());

    let (mantissa, exp_part) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };
    let exponent = match exp_part {
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            e.parse::<i64>().map_err(|_| invalid())?
        }
        None => 0,
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    let all_digits = int_part
        .bytes()
        .chain(frac_part.bytes())
        .all(|b| b.is_ascii_digit());
    if !all_digits {
        return Err(invalid());
    }

    let mut digits = Vec::new();
    for b in int_part.bytes().chain(frac_part.bytes()) {
        digits = magnitude::mul_small_add(&digits, 10, b - b'0');
    }
    let exponent = exponent
        .checked_sub(frac_part.len() as i64)
        .ok_or_else(invalid)?;

    Ok(DecimalLiteral {
        negative,
        digits,
        exponent,
    })
}

impl std::str::FromStr for BigInt {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Decimal ====================

    #[test]
    fn test_plain_integers() {
        assert_eq!(BigInt::from_string("0").unwrap(), BigInt::zero());
        assert_eq!(BigInt::from_string("123").unwrap(), BigInt::from_i32(123));
        assert_eq!(BigInt::from_string("-123").unwrap(), BigInt::from_i32(-123));
        assert_eq!(BigInt::from_string("+123").unwrap(), BigInt::from_i32(123));
        assert_eq!(BigInt::from_string("000042").unwrap(), BigInt::from_i32(42));
    }

    #[test]
    fn test_fraction_truncates() {
        assert_eq!(BigInt::from_string("12.99").unwrap(), BigInt::from_i32(12));
        assert_eq!(BigInt::from_string("-12.99").unwrap(), BigInt::from_i32(-12));
        assert!(BigInt::from_string(".5").unwrap().is_zero());
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(BigInt::from_string("1e3").unwrap(), BigInt::from_i32(1000));
        assert_eq!(BigInt::from_string("1.5E3").unwrap(), BigInt::from_i32(1500));
        assert_eq!(BigInt::from_string("2.5e+2").unwrap(), BigInt::from_i32(250));
        assert_eq!(BigInt::from_string("12345e-2").unwrap(), BigInt::from_i32(123));
        assert!(BigInt::from_string("1e-100").unwrap().is_zero());
    }

    #[test]
    fn test_from_string_decimal() {
        assert_eq!(
            BigInt::from_string_decimal("100.5", 2).unwrap(),
            BigInt::from_i32(10050)
        );
        assert_eq!(
            BigInt::from_string_decimal("1.239", 2).unwrap(),
            BigInt::from_i32(123)
        );
        assert_eq!(
            BigInt::from_string_decimal("-0.000001", 6).unwrap(),
            BigInt::from_i32(-1)
        );
        assert_eq!(
            BigInt::from_string_decimal("1.5e1", 3).unwrap(),
            BigInt::from_i32(15000)
        );
    }

    #[test]
    fn test_invalid_decimal() {
        for s in ["", "-", "abc", "1.2.3", "1e", "1e+", "12a", "1 000", "."] {
            assert!(
                matches!(BigInt::from_string(s), Err(BigIntError::InvalidFormat(_))),
                "expected failure for {:?}",
                s
            );
        }
    }

    #[test]
    fn test_exponent_limit() {
        let max = BigInt::from_string("1e4096").unwrap();
        assert_eq!(max.to_string().len(), 4097);
        assert!(BigInt::from_string("1e4097").is_err());
        assert!(BigInt::from_string("0.1e4097").is_ok());
        assert!(matches!(
            BigInt::from_string("1e9999999999"),
            Err(BigIntError::InvalidFormat(_))
        ));
        assert!(BigInt::from_string_decimal("1e4000", 200).is_err());
        assert!(BigInt::from_string_decimal("1e3900", 196).is_ok());
        assert!(BigInt::from_string("1e-9999999999").unwrap().is_zero());
    }

    // ==================== Hex ====================

    #[test]
    fn test_hex() {
        assert_eq!(BigInt::from_string("0x3e8").unwrap(), BigInt::from_i32(1000));
        assert_eq!(BigInt::from_string("0X03E8").unwrap(), BigInt::from_i32(1000));
        assert_eq!(BigInt::from_string("-0x3e8").unwrap(), BigInt::from_i32(-1000));
        assert_eq!(BigInt::from_string("0xff").unwrap(), BigInt::from_i32(255));
    }

    #[test]
    fn test_from_hex_string_without_prefix() {
        assert_eq!(BigInt::from_hex_string("ff").unwrap(), BigInt::from_i32(255));
        assert!(BigInt::from_hex_string("0x").is_err());
        assert!(BigInt::from_hex_string("0xzz").is_err());
    }

    // ==================== Serialized form ====================

    #[test]
    fn test_serialize_roundtrip() {
        let v = BigInt::from_i32(-5);
        assert_eq!(v.serialize(), "BigInt(-5)");
        assert_eq!(BigInt::parse_serialized("BigInt(-5)").unwrap(), v);
    }

    #[test]
    fn test_parse_serialized_rejects_other_wrappers() {
        assert!(BigInt::parse_serialized("Array(5)").is_err());
        assert!(BigInt::parse_serialized("BigInt(5").is_err());
    }
}
