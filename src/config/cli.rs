//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::Level;

/// Output Prisma Access endpoints of a tenant in IP list format
///
/// Retrieves the tenant's egress addresses and writes them as an External
/// Dynamic List file, keeping an iteration counter and the last change time
/// across runs.
#[derive(Debug, Parser)]
#[command(name = "prisma-edl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output file name
    pub output: PathBuf,

    /// Service type [default: all]
    #[arg(short = 's', long = "service-type", value_enum)]
    pub service_type: Option<ServiceType>,

    /// Address type [default: all]
    #[arg(short = 'a', long = "address-type", value_enum)]
    pub address_type: Option<AddressType>,

    /// Location [default: all]
    #[arg(short = 'l', long, value_enum)]
    pub location: Option<Location>,

    /// The API key if not reading it from file
    #[arg(short = 'k', long)]
    pub key: Option<String>,

    /// Location of the file with the API key
    #[arg(short = 'c', long = "key-file")]
    pub key_file: Option<PathBuf>,

    /// Omit address details in output file
    #[arg(short = 'n', long = "no-comments")]
    pub no_comments: bool,

    /// Use the alternative endpoint prod6
    #[arg(short = '2', long = "endpoint2")]
    pub endpoint2: bool,

    /// Logging message verbosity
    #[arg(
        short = 'x',
        long = "debug-level",
        value_enum,
        ignore_case = true,
        default_value = "WARNING"
    )]
    pub debug_level: LogLevel,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Service type filter sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceType {
    /// Every service
    #[value(name = "all")]
    All,
    /// Remote networks
    #[value(name = "remote_network")]
    RemoteNetwork,
    /// GlobalProtect gateways
    #[value(name = "gp_gateway")]
    GpGateway,
    /// GlobalProtect portals
    #[value(name = "gp_portal")]
    GpPortal,
    /// Clean pipe
    #[value(name = "clean_pipe")]
    CleanPipe,
    /// Explicit proxy
    #[value(name = "swg_proxy")]
    SwgProxy,
}

/// Address type filter sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressType {
    /// Every address type
    #[value(name = "all")]
    All,
    /// Active addresses
    #[value(name = "active")]
    Active,
    /// Service IPs
    #[value(name = "service_ip")]
    ServiceIp,
    /// Authentication cache service
    #[value(name = "auth_cache_service")]
    AuthCacheService,
    /// Network load balancers
    #[value(name = "network_load_balancer")]
    NetworkLoadBalancer,
}

/// Location filter sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Location {
    /// Every location
    #[value(name = "all")]
    All,
    /// Deployed locations only
    #[value(name = "deployed")]
    Deployed,
}

/// Log verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Everything, including raw responses
    #[value(name = "DEBUG")]
    Debug,
    /// Progress messages
    #[value(name = "INFO")]
    Info,
    /// Warnings and errors
    #[value(name = "WARNING")]
    Warning,
    /// Errors only
    #[value(name = "ERROR")]
    Error,
    /// Errors only (tracing has no separate critical level)
    #[value(name = "CRITICAL")]
    Critical,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warning => Self::WARN,
            LogLevel::Error | LogLevel::Critical => Self::ERROR,
        }
    }
}

/// Returns the wire name of a value enum variant (`gp_gateway`, `deployed`, ...).
#[must_use]
pub fn wire_name<T: ValueEnum>(value: &T) -> String {
    value
        .to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Fallible variant of [`Cli::parse_from_iter`] (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }
}
