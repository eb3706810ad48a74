//! Error types for hue-cli.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use clap::error::ErrorKind;
use hue_core::error::CoreError;
use thiserror::Error;

pub use hue_core::error::{BridgeError, ConfigError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Get the exit code for this error. Every failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        exit_codes::FAILURE
    }

    /// A required flag was not given.
    pub fn missing_flag(usage: &str) -> Self {
        CliError::InvalidArgument(format!("{} is required", usage))
    }
}

/// Exit code for a command line clap rejected. Help and version output count
/// as success; every usage error is a failure like any other.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exit_codes::SUCCESS,
        _ => exit_codes::FAILURE,
    }
}

impl From<BridgeError> for CliError {
    fn from(e: BridgeError) -> Self {
        CliError::Core(CoreError::Bridge(e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
