//! Previous-run state, recovered from the EDL output file itself.
//!
//! The output file is the only durable store: the iteration counter and the
//! previous address set are parsed back out of it at the start of a run.

mod file;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use file::FileStateStore;

use std::collections::BTreeSet;
use std::io;

use thiserror::Error;

use crate::edl::format::{self, Line};

/// State carried from one run to the next through the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    /// Iteration number of the run that wrote the file.
    pub iteration: u64,
    /// Change-summary text of that run, if it could be recovered.
    pub last_changed_at: Option<String>,
    /// Every address in the file, across all zones.
    pub addresses: BTreeSet<String>,
}

impl PersistedState {
    /// The state of a first run: iteration 0, no addresses.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Result of loading the previous output file.
///
/// Explicitly models all valid states to avoid ambiguity:
/// - A file this tool wrote earlier
/// - No file (first run)
/// - A file written by something else
/// - A file that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// Successfully parsed a previous output file.
    Loaded(PersistedState),

    /// No file exists at the output path (first run).
    NotFound,

    /// The file does not start with the marker line.
    /// It will be overwritten by this run.
    Foreign {
        /// First line of the file, for logging.
        first_line: String,
    },

    /// The file exists but could not be read.
    Unreadable {
        /// Reason for the failure (for logging/debugging).
        reason: String,
    },
}

impl LoadResult {
    /// Returns the loaded state, or the zero state for every other variant.
    #[must_use]
    pub fn into_state(self) -> PersistedState {
        match self {
            Self::Loaded(state) => state,
            Self::NotFound | Self::Foreign { .. } | Self::Unreadable { .. } => {
                PersistedState::zero()
            }
        }
    }

    /// Returns `true` if a previous file was successfully parsed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// Parses the text of a previous output file.
///
/// - Line 1 must be the marker, otherwise the file is [`LoadResult::Foreign`].
/// - Line 2, if it is a comment, holds the iteration; anything unparsable
///   counts as iteration 0.
/// - Line 4, if it is a comment, holds the change summary.
/// - Every other non-comment, non-blank line is an address.
#[must_use]
pub fn read_previous(content: &str) -> LoadResult {
    let mut lines = content.lines();

    let first = lines.next().unwrap_or_default();
    if !format::is_marker(first) {
        return LoadResult::Foreign {
            first_line: first.trim().to_string(),
        };
    }

    let mut state = PersistedState::zero();
    for (index, raw) in lines.enumerate() {
        match (index, Line::classify(raw)) {
            (0, Line::Comment(text)) => {
                state.iteration = format::parse_iteration(text).unwrap_or_else(|| {
                    tracing::warn!("Unparsable iteration line '{text}', assuming 0");
                    0
                });
            }
            (2, Line::Comment(text)) => {
                state.last_changed_at = text
                    .strip_prefix(format::COMMENT)
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_owned);
            }
            (_, Line::Address(address)) => {
                state.addresses.insert(address.to_string());
            }
            _ => {}
        }
    }

    LoadResult::Loaded(state)
}

/// Errors that can occur while writing the output file.
///
/// Only covers write-side errors; read-side issues are modeled
/// as [`LoadResult`] variants to allow graceful degradation.
#[derive(Debug, Error)]
pub enum StateError {
    /// Failed to write the output file.
    #[error("Failed to write output file: {0}")]
    Write(#[source] io::Error),

    /// The blocking write task did not complete.
    #[error("Output file write task failed: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// Abstraction over where the EDL file lives.
///
/// Implementations should:
/// - Handle missing files gracefully (return `LoadResult::NotFound`)
/// - Degrade gracefully on read errors (return `LoadResult::Unreadable`)
/// - Replace the file atomically on save
pub trait StateStore: Send + Sync {
    /// Loads and parses the previous output file.
    fn load(&self) -> LoadResult;

    /// Replaces the output file with `contents`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(
        &self,
        contents: String,
    ) -> impl std::future::Future<Output = Result<(), StateError>> + Send;
}
