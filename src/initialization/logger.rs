//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use env_logger::fmt::Formatter;
use log::{Level, LevelFilter, Record};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Supports both plain text
/// (with colors and emojis) and JSON formats for structured logging.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Arguments
///
/// * `level` - Minimum log level to display (overrides `RUST_LOG` if set)
/// * `format` - Log format (Plain or Json)
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=domain_health=debug,hickory_resolver=info cargo test
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // hickory logs every malformed or truncated UDP response it retries
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("domain_health", level);

    match format {
        LogFormat::Json => builder.format(write_json_line),
        LogFormat::Plain => builder.format(write_plain_line),
    };

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// One JSON object per line: `{"ts":<unix millis>,"level":..,"target":..,"msg":..}`.
fn write_json_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let msg = serde_json::to_string(&record.args().to_string()).unwrap_or_else(|_| "\"\"".into());
    writeln!(
        buf,
        "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
        chrono::Utc::now().timestamp_millis(),
        record.level(),
        record.target(),
        msg
    )
}

fn write_plain_line(buf: &mut Formatter, record: &Record) -> io::Result<()> {
    let (marker, level) = level_style(record.level());
    writeln!(
        buf,
        "{marker} {} [{level}] {}",
        record.target().cyan(),
        record.args()
    )
}

fn level_style(level: Level) -> (&'static str, ColoredString) {
    let name = level.to_string();
    match level {
        Level::Error => ("❌", name.red()),
        Level::Warn => ("⚠️", name.yellow()),
        Level::Info => ("✔️", name.green()),
        Level::Debug => ("🔍", name.blue()),
        Level::Trace => ("🔬", name.purple()),
    }
}
