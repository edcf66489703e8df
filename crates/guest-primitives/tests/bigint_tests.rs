//! Tests for BigInt arithmetic, parsing and rendering

use guest_primitives::{BigInt, BigIntError};

fn int(v: i64) -> BigInt {
    BigInt::from_i64(v)
}

fn parse(s: &str) -> BigInt {
    BigInt::from_string(s).unwrap()
}

// =============================================================================
// Large-value arithmetic
// =============================================================================

mod large_values {
    use super::*;

    #[test]
    fn scientific_sum() {
        let a = parse("1e38");
        let sum = a.plus(&a);
        assert_eq!(sum.to_string(), "200000000000000000000000000000000000000");
    }

    #[test]
    fn beyond_u128() {
        let max = parse("340282366920938463463374607431768211455");
        let next = max.plus(&BigInt::one());
        assert_eq!(next.to_string(), "340282366920938463463374607431768211456");
        assert_eq!(next.to_hex(), "0x100000000000000000000000000000000");
    }

    #[test]
    fn product_and_quotient() {
        let a = parse("123456789012345678901234567890");
        let b = parse("987654321098765432109876543210");
        let product = a.times(&b);
        assert_eq!(
            product.to_string(),
            "121932631137021795226185032733622923332237463801111263526900"
        );
        assert_eq!(product.div(&b).unwrap(), a);
        assert!(product.rem(&a).unwrap().is_zero());
    }

    #[test]
    fn uint256_max() {
        let max = BigInt::one().left_shift(256).minus(&BigInt::one());
        assert_eq!(
            max.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639935"
        );
        assert_eq!(max.to_unsigned_bytes_be().unwrap(), vec![0xff; 32]);
    }

    #[test]
    fn sqrt_of_large_square() {
        let root = parse("1000000000000000000000");
        assert_eq!(root.times(&root).sqrt().unwrap(), root);
        assert_eq!(root.times(&root).minus(&BigInt::one()).sqrt().unwrap(), root.minus(&BigInt::one()));
    }
}

// =============================================================================
// Token amounts
// =============================================================================

mod decimals {
    use super::*;

    #[test]
    fn parse_and_render_amount() {
        let amount = BigInt::from_string_decimal("100.5", 2).unwrap();
        assert_eq!(amount, int(10050));
        assert_eq!(parse("10050").to_string_decimal(2), "100.5");
    }

    #[test]
    fn eighteen_decimals() {
        let one_eth = BigInt::from_string_decimal("1", 18).unwrap();
        assert_eq!(one_eth.to_string(), "1000000000000000000");
        assert_eq!(one_eth.to_string_decimal(18), "1");

        let dust = BigInt::from_string_decimal("0.000000000000000001", 18).unwrap();
        assert_eq!(dust, BigInt::one());
    }

    #[test]
    fn negative_amount() {
        let v = BigInt::from_string_decimal("-2.75", 6).unwrap();
        assert_eq!(v, int(-2_750_000));
        assert_eq!(v.to_string_decimal(6), "-2.75");
    }

    #[test]
    fn rescale() {
        let usdc = BigInt::from_string_decimal("12.345678", 6).unwrap();
        let as_18 = usdc.upscale(12);
        assert_eq!(as_18.to_string_decimal(18), "12.345678");
        assert_eq!(as_18.downscale(12), usdc);
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[test]
    fn invalid_characters() {
        assert!(matches!(
            BigInt::from_string("12x4"),
            Err(BigIntError::InvalidFormat(_))
        ));
    }

    #[test]
    fn oversized_exponent() {
        assert!(matches!(
            BigInt::from_string("7e123456789"),
            Err(BigIntError::InvalidFormat(_))
        ));
        assert!(BigInt::from_string_decimal("1e4096", 1).is_err());
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(int(5).div(&int(0)), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn conversion_overflow() {
        assert!(parse("1e20").to_u64().is_err());
        assert!(parse("1e20").to_i64().is_err());
        assert_eq!(parse("1e18").to_u64().unwrap(), 1_000_000_000_000_000_000);
    }
}
