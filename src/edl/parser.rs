//! Converts the raw API payload into a [`FetchResult`].
//!
//! The payload is walked as untyped JSON so that a single malformed record
//! costs that record only, not the whole run.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::format::COMMENT;
use super::model::{AddressRecord, FetchResult, RecordMetadata, RequestParameters, Zone};

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;

/// Error type for payload parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not JSON at all.
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The JSON does not have the expected shape.
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// What was wrong.
        reason: String,
    },
}

impl ParseError {
    fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Parses a raw response body.
///
/// Addresses are trimmed and deduplicated across the whole fetch; the first
/// occurrence wins. Within a zone the order is: detailed records, coarse
/// IPv4 addresses missing from the detailed list, then the IPv6 list.
///
/// # Errors
///
/// Returns [`ParseError::InvalidJson`] if the body is not JSON, and
/// [`ParseError::MalformedResponse`] if `result` is absent or not an array,
/// or a zone entry has no name.
pub fn parse(
    raw: &[u8],
    request: RequestParameters,
    retrieved_at: DateTime<Utc>,
) -> Result<FetchResult, ParseError> {
    let body: Value = serde_json::from_slice(raw)?;
    let results = body
        .get("result")
        .ok_or_else(|| ParseError::malformed("missing 'result' field"))?
        .as_array()
        .ok_or_else(|| ParseError::malformed("'result' is not an array"))?;

    let mut seen = HashSet::new();
    let zones = results
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_zone(index, entry, &mut seen))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FetchResult {
        zones,
        retrieved_at,
        request,
    })
}

fn parse_zone(index: usize, entry: &Value, seen: &mut HashSet<String>) -> Result<Zone, ParseError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| ParseError::malformed(format!("result[{index}] is not an object")))?;
    let name = obj
        .get("zone")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::malformed(format!("result[{index}] has no zone name")))?
        .to_string();

    let coarse_v4 = string_list(obj, "addresses");
    let coarse_v6 = string_list(obj, "addresses_v6");
    let mut records = Vec::new();

    for detail in array(obj, "address_details") {
        match parse_record(detail) {
            Some(record) if seen.insert(record.address.clone()) => records.push(record),
            Some(record) => {
                tracing::debug!("Duplicate address {} in zone {name}, skipping", record.address);
            }
            None => {
                tracing::warn!("Skipping record without a valid address in zone {name}: {detail}");
            }
        }
    }

    for address in &coarse_v4 {
        if seen.insert(address.clone()) {
            tracing::info!("Found extra address in zone {name} without details: {address}");
            records.push(AddressRecord::bare(address.clone()));
        }
    }

    for address in &coarse_v6 {
        if seen.insert(address.clone()) {
            records.push(AddressRecord::bare(address.clone()));
        }
    }

    Ok(Zone {
        name,
        records,
        coarse_v4: coarse_v4.into_iter().collect(),
        coarse_v6: coarse_v6.into_iter().collect(),
    })
}

fn parse_record(detail: &Value) -> Option<AddressRecord> {
    let obj = detail.as_object()?;
    let address = normalize(obj.get("address")?.as_str()?)?;

    let metadata = RecordMetadata {
        service_type: obj
            .get("serviceType")
            .and_then(Value::as_str)
            .map(str::to_owned),
        address_type: obj
            .get("addressType")
            .and_then(Value::as_str)
            .map(str::to_owned),
        allowlisted: obj.get("allow_listed").and_then(Value::as_bool),
        created_at: obj.get("create_time").and_then(epoch_secs),
    };

    Some(AddressRecord::annotated(address, metadata))
}

/// Accepts integer or fractional epoch seconds; fractions are truncated.
#[allow(clippy::cast_possible_truncation)] // truncation to whole seconds is intended
fn epoch_secs(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

/// Trims an address; `None` if it is blank, would be read back as a
/// comment, or would not fit on one line.
fn normalize(address: &str) -> Option<String> {
    let trimmed = address.trim();
    let valid = !trimmed.is_empty()
        && !trimmed.starts_with(COMMENT)
        && !trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control());
    valid.then(|| trimmed.to_string())
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Collects a list of addresses, keeping first-seen order and dropping
/// blank or invalid entries.
fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    let mut unique = BTreeSet::new();
    array(obj, key)
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|raw| {
            let address = normalize(raw);
            if address.is_none() && !raw.trim().is_empty() {
                tracing::warn!("Skipping invalid address in '{key}': {raw:?}");
            }
            address
        })
        .filter(|a| unique.insert(a.clone()))
        .collect()
}
