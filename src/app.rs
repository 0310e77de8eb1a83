//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use prisma_edl::config::{ConfigError, LogLevel};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - missing key, unreadable config file, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, API error, write failure, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingApiKey { .. } | ConfigError::EmptyApiKey { .. } => {
            eprintln!("\nThe key is shown in the Prisma Access app under 'Service Setup'.");
        }
        ConfigError::KeyFileRead { .. } => {
            eprintln!("\nThe key file must contain only the API key.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// `RUST_LOG` overrides the level chosen on the command line.
pub fn setup_tracing(level: LogLevel) {
    let level = Level::from(level);

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
