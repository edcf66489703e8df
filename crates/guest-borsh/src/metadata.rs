//! Metaplex token-metadata account (the `data` section only)

use guest_primitives::Address;
use tracing::debug;

use crate::decoder::BorshDecoder;
use crate::error::{BorshError, Result};

/// Token metadata program id
pub const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// Name, symbol and URI of a token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SvmTokenMetadata {
    /// Token name
    pub name: String,
    /// Ticker symbol
    pub symbol: String,
    /// Off-chain JSON URI
    pub uri: String,
}

impl SvmTokenMetadata {
    /// Offset of the `data` section: key (1) + update authority (32) + mint (32)
    pub const DATA_OFFSET: usize = 65;

    /// Decode from a hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::decode(BorshDecoder::from_hex(hex)?)
    }

    /// Decode from raw account data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(BorshDecoder::from_bytes(bytes))
    }

    /// Parsed metadata program id
    pub fn program_id() -> Result<Address> {
        Address::from_base58_string(METADATA_PROGRAM_ID)
            .map_err(|e| BorshError::InvalidFormat(e.to_string()))
    }

    fn decode(mut decoder: BorshDecoder) -> Result<Self> {
        decoder.set_offset(Self::DATA_OFFSET)?;
        let name = decoder.try_string()?;
        let symbol = decoder.try_string()?;
        let uri = decoder.try_string()?;
        debug!(%name, %symbol, "decoded token metadata");
        Ok(Self { name, symbol, uri })
    }
}
