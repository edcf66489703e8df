//! Subcommands

pub mod abi;
pub mod bigint;
pub mod borsh;
