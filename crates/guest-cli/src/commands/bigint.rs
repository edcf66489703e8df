//! BigInt commands

use clap::Subcommand;
use guest_primitives::BigInt;

use crate::{config::Config, output::Output, CliError};

/// BigInt subcommands
#[derive(Debug, Subcommand)]
pub enum BigIntCommand {
    /// Parse a decimal, scientific or hex literal into base units
    Parse {
        /// Value, e.g. 1.5, 2e-3, 0xff
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Decimal places to scale by (default: configured precision)
        #[arg(long)]
        precision: Option<u8>,
    },
    /// Render an integer of base units as a decimal string
    Format {
        /// Integer value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Decimal places (default: configured precision)
        #[arg(long)]
        precision: Option<u8>,
    },
    /// Evaluate `<a> <op> <b>`
    ///
    /// Operators: + - * / % ** << >> & | < <= > >= == != cmp
    Eval {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        a: String,
        /// Operator
        #[arg(allow_hyphen_values = true)]
        op: String,
        /// Right operand
        #[arg(allow_hyphen_values = true)]
        b: String,
    },
}

impl BigIntCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            BigIntCommand::Parse { value, precision } => {
                parse(&value, precision.unwrap_or(config.default_precision), json)
            }
            BigIntCommand::Format { value, precision } => {
                format(&value, precision.unwrap_or(config.default_precision), json)
            }
            BigIntCommand::Eval { a, op, b } => eval(&a, &op, &b, json),
        }
    }
}

fn parse(value: &str, precision: u8, json: bool) -> Result<(), CliError> {
    let parsed = BigInt::from_string_decimal(value, precision)?;
    let decimal = parsed.to_string();

    Output::new(json)
        .field("value", &decimal)
        .field("hex", &parsed.to_hex())
        .field_u64("precision", precision.into())
        .message(&decimal)
        .print();

    Ok(())
}

fn format(value: &str, precision: u8, json: bool) -> Result<(), CliError> {
    let formatted = BigInt::from_string(value)?.to_string_decimal(precision);

    Output::new(json)
        .field("value", &formatted)
        .field_u64("precision", precision.into())
        .message(&formatted)
        .print();

    Ok(())
}

fn eval(a: &str, op: &str, b: &str, json: bool) -> Result<(), CliError> {
    let result = evaluate(&BigInt::from_string(a)?, op, &BigInt::from_string(b)?)?;

    Output::new(json)
        .field("result", &result)
        .message(&result)
        .print();

    Ok(())
}

/// Apply a binary operator; comparisons yield `true`/`false`
fn evaluate(a: &BigInt, op: &str, b: &BigInt) -> Result<String, CliError> {
    let value = match op {
        "+" => a.plus(b),
        "-" => a.minus(b),
        "*" => a.times(b),
        "/" => a.div(b)?,
        "%" => a.rem(b)?,
        "**" => a.pow(b.to_u32()?),
        "<<" => a.left_shift(b.to_u32()?),
        ">>" => a.right_shift(b.to_u32()?),
        "&" => a.bit_and(b),
        "|" => a.bit_or(b),
        "<" => return Ok(a.lt(b).to_string()),
        "<=" => return Ok(a.le(b).to_string()),
        ">" => return Ok(a.gt(b).to_string()),
        ">=" => return Ok(a.ge(b).to_string()),
        "==" => return Ok(a.equals(b).to_string()),
        "!=" => return Ok(a.not_equals(b).to_string()),
        "cmp" => return Ok(BigInt::compare(a, b).to_string()),
        other => return Err(CliError::InvalidInput(format!("unknown operator: {}", other))),
    };
    Ok(value.to_string())
}
