//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API access section
    #[serde(default)]
    pub api: ApiSection,

    /// Query filter section
    #[serde(default)]
    pub query: QuerySection,

    /// Output file section
    #[serde(default)]
    pub output: OutputSection,
}

/// API access section.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API key
    pub key: Option<String>,

    /// Path to a file holding the API key
    pub key_file: Option<String>,

    /// Use the prod6 endpoint
    #[serde(default)]
    pub endpoint2: bool,

    /// Custom endpoint URL; wins over `endpoint2`
    pub endpoint: Option<String>,
}

// Keep the key out of logs and panics.
impl std::fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSection")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("key_file", &self.key_file)
            .field("endpoint2", &self.endpoint2)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Query filter section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySection {
    /// Service type filter
    pub service_type: Option<String>,

    /// Address type filter
    pub address_type: Option<String>,

    /// Location filter
    pub location: Option<String>,
}

/// Output file section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Omit address details in the output file
    #[serde(default)]
    pub no_comments: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}
