//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use super::cli::{AddressType, Location, ServiceType};

/// Default service type filter.
pub const SERVICE_TYPE: ServiceType = ServiceType::All;

/// Default address type filter.
pub const ADDRESS_TYPE: AddressType = AddressType::All;

/// Default location filter.
pub const LOCATION: Location = Location::All;

/// Timeout for the API request in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Timeout for the API request as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
