//! ABI type definitions

use std::fmt;

use guest_primitives::serialize::parse_csv;
use guest_primitives::{Address, BigInt, Bytes};

use crate::error::{AbiError, Result};

/// Size of one ABI slot in bytes
pub const WORD_SIZE: usize = 32;

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple. An empty tuple `()` stands for a tuple whose members are
    /// supplied by the parameter's children.
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Parse a type string such as `uint256`, `bytes32[]`, `address[3]`
    /// or `(uint256,string)[]`
    pub fn parse(s: &str) -> Result<ParamType> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AbiError::InvalidType(s.to_string()));
        }

        if let Some(body) = s.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| AbiError::InvalidType(s.to_string()))?;
            let inner = ParamType::parse(&body[..open])?;
            let dim = &body[open + 1..];
            if dim.is_empty() {
                return Ok(ParamType::Array(Box::new(inner)));
            }
            let size: usize = dim
                .parse()
                .map_err(|_| AbiError::InvalidType(s.to_string()))?;
            if size == 0 {
                return Err(AbiError::InvalidType(s.to_string()));
            }
            return Ok(ParamType::FixedArray(Box::new(inner), size));
        }

        if s.starts_with('(') && s.ends_with(')') {
            let members = parse_csv(s)?;
            if members.len() == 1 && members[0].is_none() {
                return Ok(ParamType::Tuple(Vec::new()));
            }
            let types = members
                .into_iter()
                .map(|m| {
                    m.ok_or_else(|| AbiError::InvalidType(s.to_string()))
                        .and_then(|m| ParamType::parse(&m))
                })
                .collect::<Result<Vec<_>>>()?;
            return Ok(ParamType::Tuple(types));
        }

        parse_elementary(s)
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(types) => types.iter().any(|t| t.is_dynamic()),
            _ => false,
        }
    }

    /// Bytes this type occupies in the head of its enclosing sequence
    pub fn head_length(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, size) if !inner.is_dynamic() => inner.head_length() * size,
            ParamType::Tuple(types) if !self.is_dynamic() => {
                types.iter().map(ParamType::head_length).sum()
            }
            _ => WORD_SIZE,
        }
    }

    /// True for tuples and arrays
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            ParamType::Array(_) | ParamType::FixedArray(..) | ParamType::Tuple(_)
        )
    }

    /// Whether a value of type `actual` may stand where `self` is declared.
    ///
    /// An empty tuple matches any tuple.
    pub fn accepts(&self, actual: &ParamType) -> bool {
        match (self, actual) {
            (ParamType::Tuple(expected), ParamType::Tuple(_)) if expected.is_empty() => true,
            (ParamType::Tuple(expected), ParamType::Tuple(got)) => {
                expected.len() == got.len()
                    && expected.iter().zip(got).all(|(e, g)| e.accepts(g))
            }
            (ParamType::Array(e), ParamType::Array(g)) => e.accepts(g),
            (ParamType::FixedArray(e, n), ParamType::FixedArray(g, m)) => n == m && e.accepts(g),
            (e, g) => e == g,
        }
    }
}

fn parse_elementary(s: &str) -> Result<ParamType> {
    match s {
        "address" => return Ok(ParamType::Address),
        "bool" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    let invalid = || AbiError::InvalidType(s.to_string());

    // uint<N> / int<N>
    for (prefix, signed) in [("uint", false), ("int", true)] {
        if let Some(rest) = s.strip_prefix(prefix) {
            let bits: usize = if rest.is_empty() {
                256
            } else {
                rest.parse().map_err(|_| invalid())?
            };
            if bits == 0 || bits > 256 || bits % 8 != 0 {
                return Err(invalid());
            }
            return Ok(if signed {
                ParamType::Int(bits)
            } else {
                ParamType::Uint(bits)
            });
        }
    }

    // bytes<N>
    if let Some(rest) = s.strip_prefix("bytes") {
        let size: usize = rest.parse().map_err(|_| invalid())?;
        if size == 0 || size > WORD_SIZE {
            return Err(invalid());
        }
        return Ok(ParamType::FixedBytes(size));
    }

    Err(AbiError::UnsupportedType(s.to_string()))
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::Int(bits) => write!(f, "int{}", bits),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
            ParamType::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            ParamType::Tuple(types) => {
                write!(f, "(")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl std::str::FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self> {
        ParamType::parse(s)
    }
}

/// A parameter to encode.
///
/// Scalars carry a pre-encoded value: big-endian bytes to be left-padded
/// (`address`, `uintN`, `intN`, `bool`), bytes to be right-padded
/// (`bytesN`), or the raw payload of `string`/`bytes`. Composites carry
/// their children in order; tuples may use the `()` placeholder type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiParam {
    /// Elementary value
    Scalar {
        /// ABI type string
        abi_type: String,
        /// Pre-encoded value
        value: Bytes,
    },
    /// Tuple or array
    Composite {
        /// ABI type string
        abi_type: String,
        /// Children, in order
        values: Vec<AbiParam>,
    },
}

impl AbiParam {
    /// Elementary parameter from a pre-encoded value
    pub fn scalar(abi_type: impl Into<String>, value: Bytes) -> Self {
        AbiParam::Scalar {
            abi_type: abi_type.into(),
            value,
        }
    }

    /// Composite parameter from its children
    pub fn composite(abi_type: impl Into<String>, values: Vec<AbiParam>) -> Self {
        AbiParam::Composite {
            abi_type: abi_type.into(),
            values,
        }
    }

    /// `address`
    pub fn address(addr: &Address) -> Self {
        Self::scalar("address", addr.to_bytes())
    }

    /// `uint<bits>`; fails when the value is negative or wider than `bits`
    pub fn uint(bits: usize, value: &BigInt) -> Result<Self> {
        let abi_type = format!("uint{}", bits);
        ParamType::parse(&abi_type)?;
        let be = value
            .to_unsigned_bytes_be()
            .map_err(|_| AbiError::InvalidValue(format!("negative value for {}: {}", abi_type, value)))?;
        if value.ge(&BigInt::one().left_shift(bits as u32)) {
            return Err(AbiError::ValueTooLarge {
                abi_type,
                len: be.len(),
            });
        }
        Ok(Self::scalar(abi_type, Bytes::from(be)))
    }

    /// `uint256`
    pub fn uint256(value: &BigInt) -> Result<Self> {
        Self::uint(256, value)
    }

    /// `int<bits>`; fails when the value is outside the signed range
    pub fn int(bits: usize, value: &BigInt) -> Result<Self> {
        let abi_type = format!("int{}", bits);
        ParamType::parse(&abi_type)?;
        let bound = BigInt::one().left_shift(bits as u32 - 1);
        if value.ge(&bound) || value.lt(&bound.neg()) {
            return Err(AbiError::ValueTooLarge {
                abi_type,
                len: value.to_bytes().len(),
            });
        }
        let word = value.to_be_word().map_err(|e| AbiError::InvalidValue(e.to_string()))?;
        Ok(Self::scalar(abi_type, Bytes::from(word)))
    }

    /// `int256`
    pub fn int256(value: &BigInt) -> Result<Self> {
        Self::int(256, value)
    }

    /// `bool`
    pub fn bool(value: bool) -> Self {
        Self::scalar("bool", Bytes::from_bool(value))
    }

    /// `string`
    pub fn string(s: &str) -> Self {
        Self::scalar("string", Bytes::from_utf8(s))
    }

    /// `bytes`
    pub fn bytes(data: &[u8]) -> Self {
        Self::scalar("bytes", Bytes::from_slice(data))
    }

    /// `bytes<N>` where N is the data length (1-32)
    pub fn fixed_bytes(data: &[u8]) -> Result<Self> {
        if data.is_empty() || data.len() > WORD_SIZE {
            return Err(AbiError::InvalidType(format!("bytes{}", data.len())));
        }
        Ok(Self::scalar(format!("bytes{}", data.len()), Bytes::from_slice(data)))
    }

    /// `<element_type>[]`
    pub fn array(element_type: &str, values: Vec<AbiParam>) -> Self {
        Self::composite(format!("{}[]", element_type), values)
    }

    /// `<element_type>[N]` where N is the number of values
    pub fn fixed_array(element_type: &str, values: Vec<AbiParam>) -> Self {
        Self::composite(format!("{}[{}]", element_type, values.len()), values)
    }

    /// Tuple with the `()` placeholder type
    pub fn tuple(values: Vec<AbiParam>) -> Self {
        Self::composite("()", values)
    }

    /// Declared ABI type string
    pub fn abi_type(&self) -> &str {
        match self {
            AbiParam::Scalar { abi_type, .. } | AbiParam::Composite { abi_type, .. } => abi_type,
        }
    }

    /// Pre-encoded value; empty for composites
    pub fn value(&self) -> Bytes {
        match self {
            AbiParam::Scalar { value, .. } => value.clone(),
            AbiParam::Composite { .. } => Bytes::empty(),
        }
    }

    /// Children; empty for scalars
    pub fn values(&self) -> &[AbiParam] {
        match self {
            AbiParam::Scalar { .. } => &[],
            AbiParam::Composite { values, .. } => values,
        }
    }

    /// Type with `()` placeholders resolved from the children
    pub fn param_type(&self) -> Result<ParamType> {
        let declared = ParamType::parse(self.abi_type())?;
        match (self, &declared) {
            (AbiParam::Scalar { .. }, t) if t.is_composite() => Err(AbiError::TypeMismatch {
                expected: "elementary type".to_string(),
                got: self.abi_type().to_string(),
            }),
            (AbiParam::Scalar { .. }, _) => Ok(declared),
            (AbiParam::Composite { values, .. }, ParamType::Tuple(_)) => Ok(ParamType::Tuple(
                values.iter().map(AbiParam::param_type).collect::<Result<_>>()?,
            )),
            (AbiParam::Composite { values, .. }, ParamType::Array(inner)) => match values.first() {
                Some(first) if inner.accepts(&first.param_type()?) => {
                    Ok(ParamType::Array(Box::new(first.param_type()?)))
                }
                _ => Ok(declared),
            },
            (AbiParam::Composite { values, .. }, ParamType::FixedArray(inner, size)) => {
                match values.first() {
                    Some(first) if inner.accepts(&first.param_type()?) => Ok(ParamType::FixedArray(
                        Box::new(first.param_type()?),
                        *size,
                    )),
                    _ => Ok(declared),
                }
            }
            (AbiParam::Composite { .. }, _) => Err(AbiError::TypeMismatch {
                expected: "tuple or array".to_string(),
                got: self.abi_type().to_string(),
            }),
        }
    }
}

/// Decoded ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes)
    Address(Address),
    /// Unsigned integer (8-256 bits)
    Uint(BigInt),
    /// Signed integer (8-256 bits)
    Int(BigInt),
    /// Boolean
    Bool(bool),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size bytes (1-32)
    FixedBytes(Vec<u8>),
    /// UTF-8 string
    String(String),
    /// Dynamic array
    Array(Vec<Token>),
    /// Fixed-size array
    FixedArray(Vec<Token>),
    /// Tuple (struct)
    Tuple(Vec<Token>),
}

impl Token {
    /// Convert back into an encodable parameter of type `param_type`
    pub fn to_param(&self, param_type: &ParamType) -> Result<AbiParam> {
        let mismatch = || AbiError::TypeMismatch {
            expected: param_type.to_string(),
            got: self.kind().to_string(),
        };
        match (param_type, self) {
            (ParamType::Address, Token::Address(addr)) => Ok(AbiParam::address(addr)),
            (ParamType::Uint(bits), Token::Uint(v)) => AbiParam::uint(*bits, v),
            (ParamType::Int(bits), Token::Int(v)) => AbiParam::int(*bits, v),
            (ParamType::Bool, Token::Bool(b)) => Ok(AbiParam::bool(*b)),
            (ParamType::Bytes, Token::Bytes(data)) => Ok(AbiParam::bytes(data)),
            (ParamType::FixedBytes(size), Token::FixedBytes(data)) if data.len() == *size => {
                AbiParam::fixed_bytes(data)
            }
            (ParamType::String, Token::String(s)) => Ok(AbiParam::string(s)),
            (ParamType::Array(inner), Token::Array(tokens)) => {
                let values = tokens
                    .iter()
                    .map(|t| t.to_param(inner))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AbiParam::array(&inner.to_string(), values))
            }
            (ParamType::FixedArray(inner, size), Token::FixedArray(tokens))
                if tokens.len() == *size =>
            {
                let values = tokens
                    .iter()
                    .map(|t| t.to_param(inner))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AbiParam::composite(param_type.to_string(), values))
            }
            (ParamType::Tuple(types), Token::Tuple(tokens)) if types.len() == tokens.len() => {
                let values = types
                    .iter()
                    .zip(tokens)
                    .map(|(t, token)| token.to_param(t))
                    .collect::<Result<Vec<_>>>()?;
                Ok(AbiParam::composite(param_type.to_string(), values))
            }
            _ => Err(mismatch()),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Token::Address(_) => "address",
            Token::Uint(_) => "uint",
            Token::Int(_) => "int",
            Token::Bool(_) => "bool",
            Token::Bytes(_) => "bytes",
            Token::FixedBytes(_) => "fixed bytes",
            Token::String(_) => "string",
            Token::Array(_) => "array",
            Token::FixedArray(_) => "fixed array",
            Token::Tuple(_) => "tuple",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, open: &str, close: &str, tokens: &[Token]) -> fmt::Result {
            write!(f, "{}", open)?;
            for (i, t) in tokens.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", t)?;
            }
            write!(f, "{}", close)
        }

        match self {
            Token::Address(addr) => write!(f, "{}", addr),
            Token::Uint(v) | Token::Int(v) => write!(f, "{}", v),
            Token::Bool(b) => write!(f, "{}", b),
            Token::Bytes(data) | Token::FixedBytes(data) => write!(f, "0x{}", hex::encode(data)),
            Token::String(s) => write!(f, "{}", s),
            Token::Array(tokens) | Token::FixedArray(tokens) => list(f, "[", "]", tokens),
            Token::Tuple(tokens) => list(f, "(", ")", tokens),
        }
    }
}
