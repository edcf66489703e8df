//! Textual forms exchanged with the host:
//! `EvmCallParam(type,value,Array(children))` and
//! `EvmDecodeParam(type,value)`.

use guest_primitives::serialize::{join, parse_csv_not_nullable, serialize_array, unwrap_tagged};
use guest_primitives::{Bytes, Serializable};

use crate::decode::decode_hex;
use crate::error::{AbiError, Result};
use crate::types::{AbiParam, ParamType, Token};

const CALL_PARAM_TAG: &str = "EvmCallParam";
const DECODE_PARAM_TAG: &str = "EvmDecodeParam";
const ARRAY_TAG: &str = "Array";

impl Serializable for AbiParam {
    fn serialize(&self) -> String {
        format!(
            "{}({})",
            CALL_PARAM_TAG,
            join([
                self.abi_type().to_string(),
                self.value().serialize(),
                serialize_array(self.values()),
            ])
        )
    }
}

impl AbiParam {
    /// Parse the `EvmCallParam(type,value,Array(...))` form
    pub fn parse_serialized(serialized: &str) -> Result<AbiParam> {
        let fields = parse_csv_not_nullable(unwrap_tagged(serialized, CALL_PARAM_TAG)?)?;
        let [abi_type, value, children]: [String; 3] = fields.try_into().map_err(|f: Vec<String>| {
            AbiError::InvalidValue(format!(
                "{} expects 3 fields, got {}: {}",
                CALL_PARAM_TAG,
                f.len(),
                serialized
            ))
        })?;

        let declared = ParamType::parse(&abi_type)?;
        let value = Bytes::from_hex_string(&value).map_err(|e| AbiError::InvalidHex(e.to_string()))?;
        let children = parse_csv_not_nullable(unwrap_tagged(&children, ARRAY_TAG)?)?
            .iter()
            .map(|child| AbiParam::parse_serialized(child))
            .collect::<Result<Vec<_>>>()?;

        if declared.is_composite() {
            Ok(AbiParam::composite(abi_type, children))
        } else if children.is_empty() {
            Ok(AbiParam::scalar(abi_type, value))
        } else {
            Err(AbiError::TypeMismatch {
                expected: "tuple or array".to_string(),
                got: abi_type,
            })
        }
    }
}

/// A request to decode host return data as a given ABI type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    /// ABI type signature, e.g. `uint256` or `(uint256,string)`
    pub abi_type: String,
    /// Hex-encoded return data
    pub value: String,
}

impl DecodeRequest {
    /// Create a new request
    pub fn new(abi_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            abi_type: abi_type.into(),
            value: value.into(),
        }
    }

    /// Parse the `EvmDecodeParam(type,value)` form
    pub fn parse_serialized(serialized: &str) -> Result<Self> {
        let fields = parse_csv_not_nullable(unwrap_tagged(serialized, DECODE_PARAM_TAG)?)?;
        match <[String; 2]>::try_from(fields) {
            Ok([abi_type, value]) => Ok(Self::new(abi_type, value)),
            Err(f) => Err(AbiError::InvalidValue(format!(
                "{} expects 2 fields, got {}: {}",
                DECODE_PARAM_TAG,
                f.len(),
                serialized
            ))),
        }
    }

    /// Run the decoder
    pub fn decode(&self) -> Result<Token> {
        decode_hex(&self.abi_type, &self.value)
    }
}

impl Serializable for DecodeRequest {
    fn serialize(&self) -> String {
        format!(
            "{}({})",
            DECODE_PARAM_TAG,
            join([self.abi_type.as_str(), self.value.as_str()])
        )
    }
}
