//! SPL token-program mint account

use guest_primitives::Address;
use tracing::debug;

use crate::decoder::BorshDecoder;
use crate::error::{BorshError, Result};

/// Decoded mint account.
///
/// Authorities use the token program's fixed-width option: a `u32` tag
/// followed by 32 key bytes that are present (zeroed) even when the tag is 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvmMint {
    /// Key allowed to mint new supply
    pub mint_authority: Option<Address>,
    /// Total supply in base units
    pub supply: u64,
    /// Decimal places of the token
    pub decimals: u8,
    /// Whether the account has been initialized
    pub is_initialized: bool,
    /// Key allowed to freeze token accounts
    pub freeze_authority: Option<Address>,
}

impl SvmMint {
    /// Byte offset of the `decimals` field
    pub const DECIMALS_OFFSET: usize = 44;

    /// Packed account size
    pub const LEN: usize = 82;

    /// Decode from a hex string
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::decode(&mut BorshDecoder::from_hex(hex)?)
    }

    /// Decode from raw account data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut BorshDecoder::from_bytes(bytes))
    }

    /// Read only the decimals, skipping the rest of the layout
    pub fn decimals_from_bytes(bytes: &[u8]) -> Result<u8> {
        let mut decoder = BorshDecoder::from_bytes(bytes);
        decoder.set_offset(Self::DECIMALS_OFFSET)?;
        decoder.try_u8()
    }

    fn decode(decoder: &mut BorshDecoder) -> Result<Self> {
        let mint_authority = read_authority(decoder)?;
        let supply = decoder.try_u64()?;
        let decimals = decoder.try_u8()?;
        let is_initialized = decoder.try_bool()?;
        let freeze_authority = read_authority(decoder)?;

        debug!(supply, decimals, is_initialized, "decoded mint account");

        Ok(Self {
            mint_authority,
            supply,
            decimals,
            is_initialized,
            freeze_authority,
        })
    }
}

fn read_authority(decoder: &mut BorshDecoder) -> Result<Option<Address>> {
    let tag = decoder.try_u32()?;
    let key = decoder.try_pubkey()?;
    match tag {
        0 => Ok(None),
        1 => Ok(Some(key)),
        other => Err(BorshError::InvalidTag(other)),
    }
}
