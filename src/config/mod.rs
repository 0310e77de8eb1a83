//! Configuration layer.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the file given with `--config`
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The API key is looked up in order: `--key`, `--key-file`, `api.key`,
//! `api.key_file`. A custom `api.endpoint` wins over `--endpoint2`.
//!
//! # Boolean Flag Semantics
//!
//! Boolean flags (`--no-comments`, `--endpoint2`) use OR semantics:
//! if set `true` in either CLI or TOML, the result is `true`.
//!
//! # CLI-Only Options
//!
//! `--debug-level` is CLI-only because logging is set up before the
//! config file is read. `RUST_LOG` overrides it.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{AddressType, Cli, Location, LogLevel, ServiceType, wire_name};
pub use error::{ConfigError, field};
pub use toml::TomlConfig;
pub use validated::ValidatedConfig;
