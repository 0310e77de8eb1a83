//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use url::Url;

use crate::api::{ApiKey, Endpoint};
use crate::edl::RequestParameters;

use super::cli::{AddressType, Cli, Location, ServiceType, wire_name};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

#[cfg(test)]
#[path = "validated_tests.rs"]
mod tests;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Output EDL file, also read back as the previous state
    pub output: PathBuf,

    /// Query sent to the API
    pub request: RequestParameters,

    /// Tenant API key
    pub key: ApiKey,

    /// API endpoint
    pub endpoint: Endpoint,

    /// Drop comment lines from the output
    pub suppress_comments: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ output: {}, request: {}, endpoint: {}, key: {}, no_comments: {} }}",
            self.output.display(),
            self.request,
            self.endpoint,
            self.key,
            self.suppress_comments,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is available, or its file cannot be read, or it is blank
    /// - A TOML query value is not one of the accepted values
    /// - The custom endpoint URL is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let request = Self::resolve_request(cli, toml)?;
        let key = Self::resolve_key(cli, toml)?;
        let endpoint = Self::resolve_endpoint(cli, toml)?;

        // Flags only enable, never disable
        let suppress_comments = cli.no_comments || toml.is_some_and(|t| t.output.no_comments);

        Ok(Self {
            output: cli.output.clone(),
            request,
            key,
            endpoint,
            suppress_comments,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_request(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RequestParameters, ConfigError> {
        let query = toml.map(|t| &t.query);

        // Priority: CLI explicit > TOML > default
        let service_type = match cli.service_type {
            Some(v) => v,
            None => parse_choice::<ServiceType>(
                field::SERVICE_TYPE,
                query.and_then(|q| q.service_type.as_deref()),
            )?
            .unwrap_or(defaults::SERVICE_TYPE),
        };

        let address_type = match cli.address_type {
            Some(v) => v,
            None => parse_choice::<AddressType>(
                field::ADDRESS_TYPE,
                query.and_then(|q| q.address_type.as_deref()),
            )?
            .unwrap_or(defaults::ADDRESS_TYPE),
        };

        let location = match cli.location {
            Some(v) => v,
            None => parse_choice::<Location>(
                field::LOCATION,
                query.and_then(|q| q.location.as_deref()),
            )?
            .unwrap_or(defaults::LOCATION),
        };

        Ok(RequestParameters::new(
            wire_name(&service_type),
            wire_name(&address_type),
            wire_name(&location),
        ))
    }

    fn resolve_key(cli: &Cli, toml: Option<&TomlConfig>) -> Result<ApiKey, ConfigError> {
        let api = toml.map(|t| &t.api);

        // Priority: --key > --key-file > api.key > api.key_file
        if let Some(ref key) = cli.key {
            tracing::info!("Key passed as argument");
            return non_empty(key, "--key");
        }

        if let Some(ref path) = cli.key_file {
            return read_key_file(path);
        }

        if let Some(key) = api.and_then(|a| a.key.as_deref()) {
            return non_empty(key, "api.key");
        }

        if let Some(path) = api.and_then(|a| a.key_file.as_deref()) {
            return read_key_file(&expand_tilde(path));
        }

        Err(ConfigError::missing_key(
            "Use --key or --key-file, or set api.key or api.key_file in the config file",
        ))
    }

    fn resolve_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Endpoint, ConfigError> {
        let api = toml.map(|t| &t.api);

        if let Some(url_str) = api.and_then(|a| a.endpoint.as_deref()) {
            let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Endpoint::Custom(url));
        }

        if cli.endpoint2 || api.is_some_and(|a| a.endpoint2) {
            return Ok(Endpoint::Prod6);
        }

        Ok(Endpoint::Prod)
    }
}

// Helper functions

fn parse_choice<T: ValueEnum>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };

    T::from_str(value.trim(), true)
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            expected: T::value_variants()
                .iter()
                .map(wire_name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn non_empty(key: &str, origin: &str) -> Result<ApiKey, ConfigError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(ConfigError::EmptyApiKey {
            origin: origin.to_string(),
        });
    }
    Ok(ApiKey::new(key))
}

fn read_key_file(path: &Path) -> Result<ApiKey, ConfigError> {
    tracing::info!("Attempting to read key from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::KeyFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    non_empty(&content, &path.display().to_string())
}

/// Expands a leading `~/` to the home directory.
fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
