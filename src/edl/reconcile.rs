//! Merges the previous run's state with a fresh fetch.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::state::PersistedState;
use crate::time;

use super::model::FetchResult;

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;

/// When the address list was last seen to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastChange {
    /// The change was noticed by this run: somewhere between the previous
    /// iteration and the retrieval time.
    Noticed {
        /// Retrieval time of this run.
        at: DateTime<Utc>,
    },
    /// The list is unchanged; the newest provider creation time is the best
    /// known change time.
    CreationTimestamp {
        /// Newest `create_time` across all records.
        at: DateTime<Utc>,
    },
}

impl LastChange {
    /// Returns the timestamp regardless of how it was derived.
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        match self {
            Self::Noticed { at } | Self::CreationTimestamp { at } => *at,
        }
    }
}

impl fmt::Display for LastChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noticed { at } => write!(
                f,
                "Last change detected was between previous iteration and {}",
                time::format_precise(at)
            ),
            Self::CreationTimestamp { at } => write!(
                f,
                "Last change detected via creation_timestamp at: {}",
                time::format_precise(at)
            ),
        }
    }
}

/// Operator-visible condition raised during reconciliation.
///
/// These never fail the run; the (possibly empty) list is still written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAlert {
    /// The previous list had entries and the new one has none.
    Emptied,
    /// The new list has no entries.
    Empty,
}

impl ListAlert {
    /// Returns `true` for alerts that warrant the highest log severity.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Emptied)
    }
}

impl fmt::Display for ListAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emptied => f.write_str("EDL has emptied"),
            Self::Empty => f.write_str("EDL contains no entries"),
        }
    }
}

/// Everything the renderer needs to produce the output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdlDocument {
    /// Iteration number written to the file.
    pub iteration: u64,
    /// Best known change time.
    pub last_change: LastChange,
    /// The fetch being rendered.
    pub fetch: FetchResult,
}

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// State the next run will read back from the file.
    pub state: PersistedState,
    /// Rendering payload.
    pub document: EdlDocument,
    /// Conditions to report to the operator.
    pub alerts: Vec<ListAlert>,
}

/// Decides the iteration number and change time for a fresh fetch.
///
/// The change time defaults to the retrieval time. Only when the address
/// set is identical to the previous one and at least one record carries a
/// creation time is it replaced by the newest creation time. A changed set
/// always reports the retrieval time, even if the new records carry their
/// own creation times.
#[must_use]
pub fn reconcile(previous: &PersistedState, current: FetchResult) -> Reconciliation {
    let iteration = previous.iteration.saturating_add(1);
    let addresses = current.address_set();

    let last_change = if addresses == previous.addresses {
        current
            .latest_created_at()
            .and_then(time::from_epoch_secs)
            .map_or(
                LastChange::Noticed {
                    at: current.retrieved_at,
                },
                |at| LastChange::CreationTimestamp { at },
            )
    } else {
        LastChange::Noticed {
            at: current.retrieved_at,
        }
    };

    let mut alerts = Vec::new();
    if addresses.is_empty() {
        if !previous.addresses.is_empty() {
            alerts.push(ListAlert::Emptied);
        }
        alerts.push(ListAlert::Empty);
    }

    let state = PersistedState {
        iteration,
        last_changed_at: Some(last_change.to_string()),
        addresses,
    };

    Reconciliation {
        state,
        document: EdlDocument {
            iteration,
            last_change,
            fetch: current,
        },
        alerts,
    }
}
