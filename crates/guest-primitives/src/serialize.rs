//! Wrapper-tagged textual serialization used at the guest/host string
//! boundary.
//!
//! Scalars render canonically (hex for buffers, `BigInt(..)` for integers).
//! Composites render as a tag wrapping a comma-joined list, e.g.
//! `Array(a,b,c)`. Since nested composites share the separator,
//! [`parse_csv`] tracks parenthesis depth to find top-level fields.

use thiserror::Error;

use crate::address::Address;
use crate::bigint::BigInt;
use crate::bytes::Bytes;

/// Field separator
pub const SEPARATOR: char = ',';

/// Textual serialization error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SerializeError {
    /// Parentheses do not balance
    #[error("unbalanced parentheses at position {0}")]
    UnbalancedParentheses(usize),
    /// An empty field where a value was required
    #[error("null value found at field {0}")]
    NullValue(usize),
    /// Input does not have the expected wrapper shape
    #[error("invalid serialized value: {0}")]
    InvalidFormat(String),
}

/// Types with a canonical textual form
pub trait Serializable {
    /// Render to the canonical string
    fn serialize(&self) -> String;
}

impl Serializable for Bytes {
    fn serialize(&self) -> String {
        self.to_hex_string()
    }
}

impl Serializable for Address {
    fn serialize(&self) -> String {
        self.to_string()
    }
}

impl Serializable for BigInt {
    fn serialize(&self) -> String {
        BigInt::serialize(self)
    }
}

impl Serializable for String {
    fn serialize(&self) -> String {
        self.clone()
    }
}

impl Serializable for &str {
    fn serialize(&self) -> String {
        (*self).to_string()
    }
}

macro_rules! impl_serializable_display {
    ($($t:ty),*) => {
        $(
            impl Serializable for $t {
                fn serialize(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_serializable_display!(bool, u8, u16, u32, u64, i8, i16, i32, i64);

/// `Array(a,b,c)`
pub fn serialize_array<T: Serializable>(items: &[T]) -> String {
    format!("Array({})", join(items.iter().map(Serializable::serialize)))
}

/// Join fields with the separator
pub fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Strip `Tag(` and `)` from a wrapper-tagged string
pub fn unwrap_tagged<'a>(serialized: &'a str, tag: &str) -> Result<&'a str, SerializeError> {
    serialized
        .strip_prefix(tag)
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| SerializeError::InvalidFormat(format!("expected {}(..): {}", tag, serialized)))
}

/// Split a comma-separated string into top-level fields.
///
/// One layer of outer parentheses is removed when the first `(` closes at
/// the final character. Commas inside nested parentheses stay in their
/// field. Fields are trimmed; an empty field is `None`.
pub fn parse_csv(input: &str) -> Result<Vec<Option<String>>, SerializeError> {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();
    let strip_outer = len > 1 && chars[0] == '(' && chars[len - 1] == ')' && first_paren_wraps(&chars);

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut depth: i32 = 0;
    let top_level = if strip_outer { 1 } else { 0 };

    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => {
                depth += 1;
                if strip_outer && i == 0 {
                    continue;
                }
                current.push(c);
            }
            ')' => {
                depth -= 1;
                if strip_outer && i == len - 1 {
                    continue;
                }
                if depth < 0 {
                    return Err(SerializeError::UnbalancedParentheses(i));
                }
                current.push(c);
            }
            SEPARATOR if depth == top_level => {
                tokens.push(take_token(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    if depth != 0 {
        return Err(SerializeError::UnbalancedParentheses(len));
    }
    if len > 0 {
        tokens.push(take_token(&mut current));
    }
    Ok(tokens)
}

/// [`parse_csv`], failing on any empty field
pub fn parse_csv_not_nullable(input: &str) -> Result<Vec<String>, SerializeError> {
    parse_csv(input)?
        .into_iter()
        .enumerate()
        .map(|(i, token)| token.ok_or(SerializeError::NullValue(i)))
        .collect()
}

fn take_token(current: &mut String) -> Option<String> {
    let token = std::mem::take(current);
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// True when the opening paren at index 0 is closed by the last character
fn first_paren_wraps(chars: &[char]) -> bool {
    let mut balance = 0i32;
    for (k, &c) in chars.iter().enumerate() {
        match c {
            '(' => balance += 1,
            ')' => balance -= 1,
            _ => {}
        }
        if balance == 0 && k < chars.len() - 1 {
            return false;
        }
    }
    balance == 0
}
