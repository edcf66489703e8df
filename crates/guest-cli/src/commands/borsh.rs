//! Borsh account commands

use clap::Subcommand;
use guest_borsh::{SvmMint, SvmTokenMetadata};
use guest_primitives::Address;

use crate::{output::Output, CliError};

/// Borsh subcommands
#[derive(Debug, Subcommand)]
pub enum BorshCommand {
    /// Decode an SPL token mint account
    Mint {
        /// Hex-encoded account data
        data: String,
    },
    /// Decode a Metaplex token metadata account
    Metadata {
        /// Hex-encoded account data
        data: String,
    },
}

impl BorshCommand {
    pub fn execute(self, json: bool) -> Result<(), CliError> {
        match self {
            BorshCommand::Mint { data } => mint(&data, json),
            BorshCommand::Metadata { data } => metadata(&data, json),
        }
    }
}

fn mint(data: &str, json: bool) -> Result<(), CliError> {
    let mint = SvmMint::from_hex(data)?;
    let authority = |key: &Option<Address>| match key {
        Some(key) => format!("{}", key),
        None => "none".to_string(),
    };

    Output::new(json)
        .field_value("mint_authority", serde_json::to_value(mint.mint_authority)?)
        .field("supply", &mint.supply.to_string())
        .field_u64("decimals", mint.decimals.into())
        .field_bool("is_initialized", mint.is_initialized)
        .field_value("freeze_authority", serde_json::to_value(mint.freeze_authority)?)
        .message(&format!(
            "Mint authority: {}\nSupply: {}\nDecimals: {}\nInitialized: {}\nFreeze authority: {}",
            authority(&mint.mint_authority),
            mint.supply,
            mint.decimals,
            mint.is_initialized,
            authority(&mint.freeze_authority)
        ))
        .print();

    Ok(())
}

fn metadata(data: &str, json: bool) -> Result<(), CliError> {
    let metadata = SvmTokenMetadata::from_hex(data)?;

    Output::new(json)
        .field("name", &metadata.name)
        .field("symbol", &metadata.symbol)
        .field("uri", &metadata.uri)
        .message(&format!(
            "Name: {}\nSymbol: {}\nURI: {}",
            metadata.name, metadata.symbol, metadata.uri
        ))
        .print();

    Ok(())
}
