//! ABI encoding

use bytes::{BufMut, BytesMut};
use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::error::{AbiError, Result};
use crate::types::{AbiParam, ParamType, WORD_SIZE};

/// Length of a function selector in bytes
pub const SELECTOR_LEN: usize = 4;

/// Keccak-256 hash
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; SELECTOR_LEN] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; SELECTOR_LEN];
    selector.copy_from_slice(&hash[..SELECTOR_LEN]);
    selector
}

/// Parse a selector string: `0x` followed by exactly 8 hex digits
pub fn parse_selector(selector: &str) -> Result<[u8; SELECTOR_LEN]> {
    let invalid = || AbiError::InvalidSelector(selector.to_string());
    let digits = selector.strip_prefix("0x").ok_or_else(invalid)?;
    if digits.len() != SELECTOR_LEN * 2 {
        return Err(invalid());
    }
    let mut out = [0u8; SELECTOR_LEN];
    hex::decode_to_slice(digits, &mut out).map_err(|_| invalid())?;
    Ok(out)
}

/// Encode a call: selector followed by the encoded arguments
pub fn encode(selector: &str, params: &[AbiParam]) -> Result<Vec<u8>> {
    let selector = parse_selector(selector)?;
    encode_function_call(selector, params)
}

/// [`encode`] rendered as a 0x-prefixed hex string
pub fn encode_hex(selector: &str, params: &[AbiParam]) -> Result<String> {
    Ok(format!("0x{}", hex::encode(encode(selector, params)?)))
}

/// Encode a call whose selector is derived from a signature such as
/// `transfer(address,uint256)`
pub fn encode_with_signature(signature: &str, params: &[AbiParam]) -> Result<Vec<u8>> {
    encode_function_call(function_selector(signature), params)
}

/// Encode function call (selector + params)
pub fn encode_function_call(selector: [u8; SELECTOR_LEN], params: &[AbiParam]) -> Result<Vec<u8>> {
    let args = encode_args(params)?;
    let mut out = BytesMut::with_capacity(SELECTOR_LEN + args.len());
    out.put_slice(&selector);
    out.put_slice(&args);
    Ok(out.to_vec())
}

/// Encode parameters without a selector
pub fn encode_args(params: &[AbiParam]) -> Result<Vec<u8>> {
    Ok(encode_params(params)?.to_vec())
}

/// Head/tail encoding of a parameter sequence.
///
/// Offsets are measured from the start of this sequence's head.
fn encode_params(params: &[AbiParam]) -> Result<BytesMut> {
    let mut head_size = 0;
    for param in params {
        head_size += head_length(param)?;
    }

    let mut head = BytesMut::with_capacity(head_size);
    let mut tail = BytesMut::new();

    for param in params {
        if is_dynamic(param)? {
            let offset = head_size + tail.len();
            head.put_slice(&encode_usize(offset));
            tail.put(encode_param(param)?);
        } else {
            head.put(encode_param(param)?);
        }
    }

    debug!(
        params = params.len(),
        head = head.len(),
        tail = tail.len(),
        "encoded ABI parameter sequence"
    );
    head.put(tail);
    Ok(head)
}

/// Whether a parameter goes through the tail
fn is_dynamic(param: &AbiParam) -> Result<bool> {
    match param {
        AbiParam::Scalar { .. } => Ok(param.param_type()?.is_dynamic()),
        AbiParam::Composite { values, .. } => match ParamType::parse(param.abi_type())? {
            ParamType::Array(_) => Ok(true),
            _ => {
                for value in values {
                    if is_dynamic(value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        },
    }
}

/// Get the head length for a parameter
fn head_length(param: &AbiParam) -> Result<usize> {
    if is_dynamic(param)? {
        return Ok(WORD_SIZE);
    }
    match param {
        AbiParam::Scalar { .. } => Ok(WORD_SIZE),
        AbiParam::Composite { values, .. } => {
            let mut len = 0;
            for value in values {
                len += head_length(value)?;
            }
            Ok(len)
        }
    }
}

/// Encode a single parameter. Dynamic parameters produce their tail body.
fn encode_param(param: &AbiParam) -> Result<BytesMut> {
    match param {
        AbiParam::Scalar { abi_type, value } => {
            let value = value.as_bytes();
            match ParamType::parse(abi_type)? {
                ParamType::String | ParamType::Bytes => Ok(encode_bytes(value)),
                ParamType::FixedBytes(size) => {
                    if value.len() > size {
                        return Err(AbiError::ValueTooLarge {
                            abi_type: abi_type.clone(),
                            len: value.len(),
                        });
                    }
                    Ok(pad_right(value))
                }
                t if t.is_composite() => Err(AbiError::TypeMismatch {
                    expected: "elementary type".to_string(),
                    got: abi_type.clone(),
                }),
                _ => {
                    if value.len() > WORD_SIZE {
                        return Err(AbiError::ValueTooLarge {
                            abi_type: abi_type.clone(),
                            len: value.len(),
                        });
                    }
                    Ok(pad_left(value))
                }
            }
        }
        AbiParam::Composite { abi_type, values } => {
            let declared = ParamType::parse(abi_type)?;
            check_children(abi_type, &declared, values)?;
            match declared {
                ParamType::Array(_) => {
                    let mut out = BytesMut::new();
                    out.put_slice(&encode_usize(values.len()));
                    out.put(encode_params(values)?);
                    Ok(out)
                }
                ParamType::FixedArray(..) | ParamType::Tuple(_) => encode_params(values),
                _ => Err(AbiError::TypeMismatch {
                    expected: "tuple or array".to_string(),
                    got: abi_type.clone(),
                }),
            }
        }
    }
}

/// Validate a composite's children against its declared type
fn check_children(abi_type: &str, declared: &ParamType, values: &[AbiParam]) -> Result<()> {
    let element_types: Vec<&ParamType> = match declared {
        ParamType::Array(inner) => vec![inner.as_ref(); values.len()],
        ParamType::FixedArray(inner, size) => {
            if values.len() != *size {
                return Err(AbiError::LengthMismatch {
                    abi_type: abi_type.to_string(),
                    expected: *size,
                    got: values.len(),
                });
            }
            vec![inner.as_ref(); values.len()]
        }
        ParamType::Tuple(members) if members.is_empty() => return Ok(()),
        ParamType::Tuple(members) => {
            if values.len() != members.len() {
                return Err(AbiError::LengthMismatch {
                    abi_type: abi_type.to_string(),
                    expected: members.len(),
                    got: values.len(),
                });
            }
            members.iter().collect()
        }
        _ => return Ok(()),
    };

    for (expected, value) in element_types.into_iter().zip(values) {
        let actual = value.param_type()?;
        if !expected.accepts(&actual) {
            return Err(AbiError::TypeMismatch {
                expected: expected.to_string(),
                got: actual.to_string(),
            });
        }
    }
    Ok(())
}

/// Encode a length or offset as a big-endian word
fn encode_usize(value: usize) -> [u8; WORD_SIZE] {
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

fn pad_left(value: &[u8]) -> BytesMut {
    let mut out = BytesMut::with_capacity(WORD_SIZE);
    out.put_bytes(0, WORD_SIZE - value.len());
    out.put_slice(value);
    out
}

fn pad_right(value: &[u8]) -> BytesMut {
    let padded_len = value.len().div_ceil(WORD_SIZE).max(1) * WORD_SIZE;
    let mut out = BytesMut::with_capacity(padded_len);
    out.put_slice(value);
    out.put_bytes(0, padded_len - value.len());
    out
}

/// Encode dynamic bytes: length word, then data right-padded to a word boundary
fn encode_bytes(data: &[u8]) -> BytesMut {
    let padded_len = data.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut out = BytesMut::with_capacity(WORD_SIZE + padded_len);
    out.put_slice(&encode_usize(data.len()));
    out.put_slice(data);
    out.put_bytes(0, padded_len - data.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use guest_primitives::{Address, BigInt};

    fn word(hex_str: &str) -> Vec<u8> {
        let raw = hex::decode(hex_str).unwrap();
        let mut out = vec![0u8; WORD_SIZE - raw.len()];
        out.extend(raw);
        out
    }

    fn uint(v: u64) -> AbiParam {
        AbiParam::uint256(&BigInt::from_u64(v)).unwrap()
    }

    // ==================== Selector ====================

    #[test]
    fn test_function_selector() {
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(parse_selector("0xa9059cbb").unwrap(), [0xa9, 0x05, 0x9c, 0xbb]);
        for bad in ["0x123456", "0x1234567890", "0xinvalidg", "a9059cbb", ""] {
            assert!(
                matches!(parse_selector(bad), Err(AbiError::InvalidSelector(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_selector_only() {
        assert_eq!(encode("0xa9059cbb", &[]).unwrap(), vec![0xa9, 0x05, 0x9c, 0xbb]);
    }

    // ==================== Static ====================

    #[test]
    fn test_encode_address() {
        let addr = Address::from_hex_string("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d").unwrap();
        let encoded = encode_args(&[AbiParam::address(&addr)]).unwrap();

        assert_eq!(encoded.len(), 32);
        // Address is left-padded to 32 bytes
        assert_eq!(&encoded[12..32], addr.as_bytes());
        assert!(encoded[..12].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_bool() {
        assert_eq!(encode_args(&[AbiParam::bool(true)]).unwrap(), word("01"));
        assert_eq!(encode_args(&[AbiParam::bool(false)]).unwrap(), word("00"));
    }

    #[test]
    fn test_encode_negative_int() {
        let encoded = encode_args(&[AbiParam::int256(&BigInt::from_i32(-1)).unwrap()]).unwrap();
        assert_eq!(encoded, vec![0xff; 32]);
    }

    #[test]
    fn test_encode_bytes4_right_padded() {
        let encoded = encode_args(&[AbiParam::fixed_bytes(&[0xde, 0xad, 0xbe, 0xef]).unwrap()]).unwrap();
        assert_eq!(&encoded[..4], &[0xde, 0xad, 0xbe, 0xef]);
        assert!(encoded[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_value_too_large() {
        let param = AbiParam::scalar("uint256", guest_primitives::Bytes::from(vec![1u8; 33]));
        assert!(matches!(
            encode_args(&[param]),
            Err(AbiError::ValueTooLarge { len: 33, .. })
        ));
        let param = AbiParam::scalar("bytes2", guest_primitives::Bytes::from(vec![1u8; 3]));
        assert!(matches!(encode_args(&[param]), Err(AbiError::ValueTooLarge { .. })));
    }

    #[test]
    fn test_invalid_scalar_type() {
        let param = AbiParam::scalar("bytes33", guest_primitives::Bytes::from(vec![1u8]));
        assert!(matches!(encode_args(&[param]), Err(AbiError::InvalidType(_))));
    }

    // ==================== Dynamic ====================

    #[test]
    fn test_encode_string() {
        let encoded = encode_args(&[AbiParam::string("hello")]).unwrap();
        assert_eq!(encoded.len(), 96);
        assert_eq!(&encoded[..32], &word("20")[..]);
        assert_eq!(&encoded[32..64], &word("05")[..]);
        assert_eq!(&encoded[64..69], b"hello");
        assert!(encoded[69..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_encode_empty_string() {
        let encoded = encode_args(&[AbiParam::string("")]).unwrap();
        assert_eq!(encoded, [word("20"), word("00")].concat());
    }

    #[test]
    fn test_encode_exact_word_bytes() {
        let data = [0x42u8; 32];
        let encoded = encode_args(&[AbiParam::bytes(&data)]).unwrap();
        assert_eq!(encoded.len(), 96);
        assert_eq!(&encoded[64..], &data[..]);
    }

    // ==================== Composites ====================

    #[test]
    fn test_fixed_array_arity() {
        let param = AbiParam::composite("uint256[3]", vec![uint(1), uint(2)]);
        assert_eq!(
            encode_args(&[param]).unwrap_err(),
            AbiError::LengthMismatch {
                abi_type: "uint256[3]".to_string(),
                expected: 3,
                got: 2
            }
        );
    }

    #[test]
    fn test_static_fixed_array_inlined() {
        let param = AbiParam::fixed_array("uint256", vec![uint(1), uint(2)]);
        let encoded = encode_args(&[param, uint(3)]).unwrap();
        assert_eq!(encoded, [word("01"), word("02"), word("03")].concat());
    }

    #[test]
    fn test_dynamic_array() {
        let param = AbiParam::array("uint256", vec![uint(1), uint(2)]);
        let encoded = encode_args(&[param]).unwrap();
        assert_eq!(
            encoded,
            [word("20"), word("02"), word("01"), word("02")].concat()
        );
    }

    #[test]
    fn test_array_element_type_mismatch() {
        let param = AbiParam::array("uint256", vec![uint(1), AbiParam::bool(true)]);
        assert!(matches!(
            encode_args(&[param]),
            Err(AbiError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_tuple_with_dynamic_member() {
        let tuple = AbiParam::tuple(vec![uint(7), AbiParam::string("a")]);
        let encoded = encode_args(&[tuple]).unwrap();
        assert_eq!(
            encoded,
            [
                word("20"), // offset of the tuple
                word("07"),
                word("40"), // offset of the string inside the tuple
                word("01"),
                {
                    let mut w = vec![0u8; 32];
                    w[0] = b'a';
                    w
                },
            ]
            .concat()
        );
    }

    #[test]
    fn test_declared_tuple_member_count() {
        let tuple = AbiParam::composite("(uint256,bool)", vec![uint(1)]);
        assert!(matches!(
            encode_args(&[tuple]),
            Err(AbiError::LengthMismatch { expected: 2, got: 1, .. })
        ));
    }
}
