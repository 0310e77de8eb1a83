//! Address list data model.
//!
//! Everything optional in the upstream payload is decided once, at parse
//! time, and carried as `Option` from here on.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Provenance metadata reported for a single address.
///
/// Each field is `None` when the upstream payload did not carry it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordMetadata {
    /// Service the address belongs to (`gp_gateway`, `remote_network`, ...).
    pub service_type: Option<String>,
    /// Address type (`active`, `service_ip`, ...).
    pub address_type: Option<String>,
    /// Whether the address is allow-listed.
    pub allowlisted: Option<bool>,
    /// Creation time reported by the provider, in seconds since the epoch.
    pub created_at: Option<i64>,
}

/// One address entry of a zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    /// IPv4/IPv6 literal or CIDR. Never empty.
    pub address: String,
    /// `None` for an address seen only in the coarse lists.
    pub metadata: Option<RecordMetadata>,
}

impl AddressRecord {
    /// Creates a record that came from the detailed list.
    #[must_use]
    pub fn annotated(address: impl Into<String>, metadata: RecordMetadata) -> Self {
        Self {
            address: address.into(),
            metadata: Some(metadata),
        }
    }

    /// Creates a metadata-less record.
    #[must_use]
    pub fn bare(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            metadata: None,
        }
    }

    /// Returns `true` if the record carries no metadata.
    #[must_use]
    pub const fn is_bare(&self) -> bool {
        self.metadata.is_none()
    }

    /// Returns the provider creation time, if known.
    #[must_use]
    pub fn created_at(&self) -> Option<i64> {
        self.metadata.as_ref().and_then(|m| m.created_at)
    }
}

/// A named group of addresses (typically a data-center region).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Zone name as reported upstream.
    pub name: String,
    /// Annotated records in API order, followed by the metadata-less extras.
    pub records: Vec<AddressRecord>,
    /// The provider's coarse IPv4 list for this zone.
    pub coarse_v4: BTreeSet<String>,
    /// The provider's coarse IPv6 list for this zone.
    pub coarse_v6: BTreeSet<String>,
}

impl Zone {
    /// Returns the records that carry metadata.
    pub fn annotated(&self) -> impl Iterator<Item = &AddressRecord> {
        self.records.iter().filter(|r| !r.is_bare())
    }

    /// Returns the metadata-less records.
    pub fn bare(&self) -> impl Iterator<Item = &AddressRecord> {
        self.records.iter().filter(|r| r.is_bare())
    }
}

/// Query sent upstream.
///
/// Serializes to the exact JSON body the API expects; the same JSON is
/// echoed into the output file for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestParameters {
    /// Service type filter.
    #[serde(rename = "serviceType")]
    pub service_type: String,
    /// Address type filter.
    #[serde(rename = "addrType")]
    pub address_type: String,
    /// Location filter.
    pub location: String,
}

impl RequestParameters {
    /// Creates request parameters from the three filters.
    #[must_use]
    pub fn new(
        service_type: impl Into<String>,
        address_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            service_type: service_type.into(),
            address_type: address_type.into(),
            location: location.into(),
        }
    }

    /// Returns the request as a compact JSON object.
    #[must_use]
    pub fn to_json(&self) -> String {
        // Serializing three plain strings cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for RequestParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json())
    }
}

/// Everything retrieved in one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Zones in API order.
    pub zones: Vec<Zone>,
    /// When the request was issued.
    pub retrieved_at: DateTime<Utc>,
    /// The query that produced this result.
    pub request: RequestParameters,
}

impl FetchResult {
    /// Returns every address in output order.
    pub fn addresses(&self) -> impl Iterator<Item = &str> {
        self.zones
            .iter()
            .flat_map(|z| z.records.iter())
            .map(|r| r.address.as_str())
    }

    /// Returns every address as a set.
    #[must_use]
    pub fn address_set(&self) -> BTreeSet<String> {
        self.addresses().map(str::to_owned).collect()
    }

    /// Returns the latest provider creation time across all records.
    #[must_use]
    pub fn latest_created_at(&self) -> Option<i64> {
        self.zones
            .iter()
            .flat_map(|z| z.records.iter())
            .filter_map(AddressRecord::created_at)
            .max()
    }

    /// Returns `true` if no zone produced any address.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.iter().all(|z| z.records.is_empty())
    }
}
