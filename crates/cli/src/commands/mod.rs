//! Command implementations.
//!
//! Each command calls the API client and writes its result to stdout as
//! pretty JSON.

use std::io::Write;

use serde::Serialize;
use storedash_admin::ApiError;
use storedash_admin::config::ConfigError;
use thiserror::Error;

pub mod catalog;
pub mod insights;
pub mod notifications;
pub mod orders;
pub mod session;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The result could not be encoded.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Write `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
