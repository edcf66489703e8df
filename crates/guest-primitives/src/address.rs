//! Chain account address: 20-byte EVM or 32-byte SVM

use std::fmt;
use thiserror::Error;

use crate::bytes::{strip_hex_prefix, Bytes};

/// Address parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Input string is neither valid hex nor valid base58
    #[error("invalid address format: {0}")]
    InvalidFormat(String),
    /// Byte length is neither 20 nor 32
    #[error("invalid address length: expected 20 or 32 bytes, got {0}")]
    LengthMismatch(usize),
}

/// Account address.
///
/// Carries no chain id; callers supply chain context.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Address {
    /// 20-byte EVM address
    Evm([u8; 20]),
    /// 32-byte SVM public key
    Svm([u8; 32]),
}

impl Address {
    /// Size of an EVM address in bytes
    pub const EVM_LEN: usize = 20;

    /// Size of an SVM address in bytes
    pub const SVM_LEN: usize = 32;

    /// EVM zero address (0x0000...0000)
    pub const ZERO_EVM: Address = Address::Evm([0u8; 20]);

    /// SVM zero key (the system program id)
    pub const ZERO_SVM: Address = Address::Svm([0u8; 32]);

    /// Native-token sentinel (0xeeee...eeee) used by EVM protocols
    pub const EVM_NATIVE: Address = Address::Evm([0xeeu8; 20]);

    /// EVM zero address
    pub fn zero_evm() -> Self {
        Self::ZERO_EVM
    }

    /// SVM zero key
    pub fn zero_svm() -> Self {
        Self::ZERO_SVM
    }

    /// Build from a 20- or 32-byte slice
    pub fn from_slice(slice: &[u8]) -> Result<Self, AddressError> {
        match slice.len() {
            Self::EVM_LEN => {
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(slice);
                Ok(Address::Evm(bytes))
            }
            Self::SVM_LEN => {
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(slice);
                Ok(Address::Svm(bytes))
            }
            len => Err(AddressError::LengthMismatch(len)),
        }
    }

    /// Build from a byte buffer
    pub fn from_bytes(bytes: &Bytes) -> Result<Self, AddressError> {
        Self::from_slice(bytes.as_bytes())
    }

    /// Parse a hex string (with or without 0x prefix)
    pub fn from_hex_string(s: &str) -> Result<Self, AddressError> {
        let bytes =
            hex::decode(strip_hex_prefix(s)).map_err(|e| AddressError::InvalidFormat(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parse a base58 string
    pub fn from_base58_string(s: &str) -> Result<Self, AddressError> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| AddressError::InvalidFormat(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// Parse either form: hex when 0x-prefixed, base58 otherwise
    pub fn from_string(s: &str) -> Result<Self, AddressError> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex_string(s)
        } else {
            Self::from_base58_string(s)
        }
    }

    /// Get as byte slice
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Address::Evm(bytes) => bytes,
            Address::Svm(bytes) => bytes,
        }
    }

    /// Copy into an owned buffer
    pub fn to_bytes(&self) -> Bytes {
        Bytes::from_slice(self.as_bytes())
    }

    /// Byte length (20 or 32)
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Always false; kept for slice-like ergonomics
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True for a 20-byte address
    pub fn is_evm(&self) -> bool {
        matches!(self, Address::Evm(_))
    }

    /// True for a 32-byte address
    pub fn is_svm(&self) -> bool {
        matches!(self, Address::Svm(_))
    }

    /// Check if every byte is zero
    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|&b| b == 0)
    }

    /// Convert to hex string with 0x prefix
    pub fn to_hex_string(&self) -> String {
        format!("0x{}", hex::encode(self.as_bytes()))
    }

    /// Convert to base58
    pub fn to_base58_string(&self) -> String {
        bs58::encode(self.as_bytes()).into_string()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Evm(_) => write!(f, "Address::Evm({})", self.to_hex_string()),
            Address::Svm(_) => write!(f, "Address::Svm({})", self.to_base58_string()),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Address::Evm(_) => write!(f, "{}", self.to_hex_string()),
            Address::Svm(_) => write!(f, "{}", self.to_base58_string()),
        }
    }
}

impl std::str::FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::from_string(s)
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Address::Evm(bytes)
    }
}

impl From<[u8; 32]> for Address {
    fn from(bytes: [u8; 32]) -> Self {
        Address::Svm(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Address {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            Address::from_string(&s).map_err(de::Error::custom)
        }
    }
}
