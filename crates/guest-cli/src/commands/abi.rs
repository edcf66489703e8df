//! ABI commands

use clap::Subcommand;
use guest_abi::{decode_hex, encode_hex, function_selector, AbiParam, ParamType, Token};
use guest_primitives::serialize::parse_csv;
use guest_primitives::{Address, BigInt, Bytes, Serializable};
use serde_json::Value;
use tracing::debug;

use crate::{output::Output, CliError};

const SERIALIZED_PREFIX: &str = "EvmCallParam(";

/// ABI subcommands
#[derive(Debug, Subcommand)]
pub enum AbiCommand {
    /// Encode call data
    Encode {
        /// Function selector (0x + 8 hex digits)
        #[arg(long, conflicts_with = "signature", required_unless_present = "signature")]
        selector: Option<String>,
        /// Function signature, e.g. "transfer(address,uint256)"
        #[arg(long)]
        signature: Option<String>,
        /// Parameter as <type>=<value>, or a serialized EvmCallParam(..).
        /// Array and tuple values are parenthesized: "uint8[]=(1,2,3)"
        #[arg(long = "param")]
        params: Vec<String>,
    },
    /// Decode a single value from return data
    Decode {
        /// ABI type, e.g. uint256 or "(uint256,string)"
        #[arg(long = "type")]
        abi_type: String,
        /// Hex-encoded return data
        #[arg(long)]
        data: String,
    },
    /// Compute a function selector
    Selector {
        /// Function signature
        signature: String,
    },
}

impl AbiCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            AbiCommand::Encode {
                selector,
                signature,
                params,
            } => encode(selector, signature, &params, json),
            AbiCommand::Decode { abi_type, data } => decode(&abi_type, &data, json),
            AbiCommand::Selector { signature } => selector(&signature, json),
        }
    }
}

fn encode(
    selector: Option<String>,
    signature: Option<String>,
    raw_params: &[String],
    json: bool,
) -> Result<(), CliError> {
    let selector = match (selector, signature) {
        (Some(selector), _) => selector,
        (None, Some(signature)) => format!("0x{}", hex::encode(function_selector(&signature))),
        (None, None) => {
            return Err(CliError::InvalidInput(
                "either --selector or --signature is required".to_string(),
            ))
        }
    };

    let params = raw_params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(%selector, params = params.len(), "encoding call");

    let data = encode_hex(&selector, &params)?;
    let serialized = params.iter().map(|p| Value::String(p.serialize())).collect();

    Output::new(json)
        .field("selector", &selector)
        .field("data", &data)
        .field_value("params", Value::Array(serialized))
        .message(&data)
        .print();

    Ok(())
}

fn decode(abi_type: &str, data: &str, json: bool) -> Result<(), CliError> {
    let token = decode_hex(abi_type, data)?;
    let value = token.to_string();

    Output::new(json)
        .field("type", abi_type)
        .field("value", &value)
        .message(&value)
        .print();

    Ok(())
}

fn selector(signature: &str, json: bool) -> Result<(), CliError> {
    let selector = format!("0x{}", hex::encode(function_selector(signature)));

    Output::new(json)
        .field("signature", signature)
        .field("selector", &selector)
        .message(&selector)
        .print();

    Ok(())
}

/// Parse one `--param` argument
fn parse_param(raw: &str) -> Result<AbiParam, CliError> {
    if raw.starts_with(SERIALIZED_PREFIX) {
        return Ok(AbiParam::parse_serialized(raw)?);
    }
    let (abi_type, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidInput(format!("expected <type>=<value>: {}", raw)))?;
    let param_type = ParamType::parse(abi_type)?;
    let token = parse_token(&param_type, value)?;
    Ok(token.to_param(&param_type)?)
}

/// Read a textual value as a token of `param_type`
fn parse_token(param_type: &ParamType, raw: &str) -> Result<Token, CliError> {
    let raw = raw.trim();
    let token = match param_type {
        ParamType::Address => Token::Address(Address::from_string(raw)?),
        ParamType::Uint(_) => Token::Uint(BigInt::from_string(raw)?),
        ParamType::Int(_) => Token::Int(BigInt::from_string(raw)?),
        ParamType::Bool => match raw {
            "true" | "1" => Token::Bool(true),
            "false" | "0" => Token::Bool(false),
            other => return Err(CliError::InvalidInput(format!("not a bool: {}", other))),
        },
        ParamType::Bytes => Token::Bytes(Bytes::from_hex_string(raw)?.into_vec()),
        ParamType::FixedBytes(_) => Token::FixedBytes(Bytes::from_hex_string(raw)?.into_vec()),
        ParamType::String => Token::String(raw.to_string()),
        ParamType::Array(inner) => Token::Array(parse_list(inner, raw)?),
        ParamType::FixedArray(inner, _) => Token::FixedArray(parse_list(inner, raw)?),
        ParamType::Tuple(types) => {
            let fields = split_list(raw)?;
            if fields.len() != types.len() {
                return Err(CliError::InvalidInput(format!(
                    "tuple {} expects {} fields, got {}",
                    param_type,
                    types.len(),
                    fields.len()
                )));
            }
            Token::Tuple(
                types
                    .iter()
                    .zip(&fields)
                    .map(|(ty, field)| parse_token(ty, field))
                    .collect::<Result<_, _>>()?,
            )
        }
    };
    Ok(token)
}

fn parse_list(inner: &ParamType, raw: &str) -> Result<Vec<Token>, CliError> {
    split_list(raw)?
        .iter()
        .map(|item| parse_token(inner, item))
        .collect()
}

/// Split `(a,b,c)` into its top-level items; `()` is empty
fn split_list(raw: &str) -> Result<Vec<String>, CliError> {
    if !(raw.starts_with('(') && raw.ends_with(')')) {
        return Err(CliError::InvalidInput(format!(
            "expected a parenthesized list: {}",
            raw
        )));
    }
    let fields = parse_csv(raw).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if fields == [None] {
        return Ok(Vec::new());
    }
    fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            field.ok_or_else(|| CliError::InvalidInput(format!("empty item {} in {}", i, raw)))
        })
        .collect()
}
