//! Shared builders for EDL pipeline tests.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use super::{AddressRecord, FetchResult, RecordMetadata, RequestParameters, Zone};
use crate::state::PersistedState;

/// Retrieval time used across tests: 2024-03-09 16:00:00 UTC.
pub const RETRIEVED_SECS: i64 = 1_710_000_000;

pub fn retrieved_at() -> DateTime<Utc> {
    DateTime::from_timestamp(RETRIEVED_SECS, 0).unwrap()
}

/// Annotated record with only a creation time.
pub fn created(address: &str, created_at: i64) -> AddressRecord {
    AddressRecord::annotated(
        address,
        RecordMetadata {
            created_at: Some(created_at),
            ..RecordMetadata::default()
        },
    )
}

/// Annotated record with every field unknown.
pub fn unannotated(address: &str) -> AddressRecord {
    AddressRecord::annotated(address, RecordMetadata::default())
}

/// Annotated record with every field set.
pub fn full(address: &str) -> AddressRecord {
    AddressRecord::annotated(
        address,
        RecordMetadata {
            service_type: Some("gp_gateway".to_string()),
            address_type: Some("active".to_string()),
            allowlisted: Some(true),
            created_at: Some(1_700_000_000),
        },
    )
}

pub fn zone(name: &str, records: Vec<AddressRecord>) -> Zone {
    let coarse_v4 = records
        .iter()
        .filter(|r| !r.address.contains(':'))
        .map(|r| r.address.clone())
        .collect();
    let coarse_v6 = records
        .iter()
        .filter(|r| r.address.contains(':'))
        .map(|r| r.address.clone())
        .collect();

    Zone {
        name: name.to_string(),
        records,
        coarse_v4,
        coarse_v6,
    }
}

pub fn fetch(zones: Vec<Zone>) -> FetchResult {
    FetchResult {
        zones,
        retrieved_at: retrieved_at(),
        request: RequestParameters::new("all", "all", "all"),
    }
}

pub fn previous(iteration: u64, addresses: &[&str]) -> PersistedState {
    PersistedState {
        iteration,
        last_changed_at: None,
        addresses: addresses.iter().map(|a| (*a).to_string()).collect::<BTreeSet<_>>(),
    }
}
