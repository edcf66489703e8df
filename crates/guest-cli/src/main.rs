//! # guest-cli
//!
//! Command-line inspector for the guest codecs.
//!
//! ## Usage
//!
//! ```bash
//! # ABI
//! guest abi selector "transfer(address,uint256)"
//! guest abi encode --signature "transfer(address,uint256)" \
//!     --param address=0x1111111111111111111111111111111111111111 --param uint256=1e18
//! guest abi decode --type uint256 --data 0x...
//!
//! # BigInt
//! guest bigint parse 1.5 --precision 6
//! guest bigint format 1500000 --precision 6
//! guest bigint eval 1e38 + 1e38
//!
//! # Borsh
//! guest borsh mint 0x...
//! guest borsh metadata 0x...
//! ```

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Guest codec CLI
#[derive(Parser, Debug)]
#[command(name = "guest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Solidity ABI encoding and decoding
    #[command(subcommand)]
    Abi(commands::abi::AbiCommand),
    /// Arbitrary-precision integer tools
    #[command(subcommand)]
    Bigint(commands::bigint::BigIntCommand),
    /// Borsh account decoding
    #[command(subcommand)]
    Borsh(commands::borsh::BorshCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set default decimal precision
        #[arg(long)]
        set_precision: Option<u8>,
        /// Set log level (off, error, warn, info, debug, trace)
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load();
    init_tracing(&config.log_level);

    let json = cli.json || config.json;
    debug!(command = ?cli.command, json, "running command");

    let result = match cli.command {
        Commands::Abi(cmd) => cmd.execute(json),
        Commands::Bigint(cmd) => cmd.execute(&config, json),
        Commands::Borsh(cmd) => cmd.execute(json),
        Commands::Config {
            show,
            set_precision,
            set_log_level,
        } => handle_config(&mut config, show, set_precision, set_log_level, json),
    };

    if let Err(e) = result {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Install a stderr subscriber; `RUST_LOG` overrides the configured level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_precision: Option<u8>,
    set_log_level: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(precision) = set_precision {
        config.default_precision = precision;
        modified = true;
    }

    if let Some(level) = set_log_level {
        let level = level.to_lowercase();
        if !config::LOG_LEVELS.contains(&level.as_str()) {
            return Err(CliError::InvalidInput(format!(
                "unknown log level {}, expected one of {}",
                level,
                config::LOG_LEVELS.join(", ")
            )));
        }
        config.log_level = level;
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        Output::new(json)
            .field_u64("default_precision", config.default_precision.into())
            .field("log_level", &config.log_level)
            .field_bool("json", config.json)
            .message(&format!(
                "Default precision: {}\nLog level: {}\nJSON output: {}",
                config.default_precision, config.log_level, config.json
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-precision/--set-log-level to modify")
            .print();
    }

    Ok(())
}
