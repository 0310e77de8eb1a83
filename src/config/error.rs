//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// No API key from any source.
    #[error("API key not passed as argument or key file. {hint}")]
    MissingApiKey {
        /// Hint for how to provide the key
        hint: &'static str,
    },

    /// Failed to read the API key file.
    #[error("Failed to read key file '{}': {source}", path.display())]
    KeyFileRead {
        /// Path to the key file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The key source exists but holds only whitespace.
    #[error("API key from {origin} is empty")]
    EmptyApiKey {
        /// Where the key came from
        origin: String,
    },

    /// Invalid endpoint URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// A config file value outside the accepted set.
    #[error("Invalid value '{value}' for {field}: expected one of {expected}")]
    InvalidValue {
        /// Name of the field
        field: &'static str,
        /// The value provided
        value: String,
        /// Accepted values, comma separated
        expected: String,
    },
}

/// Well-known field names for `InvalidValue` errors.
pub mod field {
    /// The service type filter.
    pub const SERVICE_TYPE: &str = "query.service_type";
    /// The address type filter.
    pub const ADDRESS_TYPE: &str = "query.address_type";
    /// The location filter.
    pub const LOCATION: &str = "query.location";
}

impl ConfigError {
    /// Creates a `MissingApiKey` error.
    #[must_use]
    pub const fn missing_key(hint: &'static str) -> Self {
        Self::MissingApiKey { hint }
    }
}
