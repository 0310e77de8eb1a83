//! Line grammar of the EDL output file.
//!
//! The file is UTF-8 text with one entry per line:
//!
//! ```text
//! # prisma-edl                 <- marker, always line 1
//! # Iteration 4                <- comment
//! 1.2.3.4                      <- address
//! ```
//!
//! Comments start with [`COMMENT`]; every other non-blank line is a literal
//! address. The renderer writes this grammar and the previous-state reader
//! parses it back, so it must stay stable across versions.

use std::borrow::Cow;

/// Comment prefix.
pub const COMMENT: &str = "#";

/// Self-identification marker written as the first line of every file.
pub const MARKER: &str = "# prisma-edl";

/// Marker written by earlier releases of the tool; still recognized on read.
pub const LEGACY_MARKER: &str = "# prisma_ip_to_edl.py";

/// Prefix of the iteration line.
pub const ITERATION_PREFIX: &str = "# Iteration ";

/// Value rendered for a metadata field the upstream did not provide.
pub const UNKNOWN: &str = "N/A";

/// Classified line of an EDL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// The self-identification marker.
    Marker,
    /// A comment; holds the full line including the prefix.
    Comment(&'a str),
    /// A literal address, trimmed.
    Address(&'a str),
    /// An empty or whitespace-only line.
    Blank,
}

impl<'a> Line<'a> {
    /// Classifies a single line (without its terminator).
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Blank
        } else if is_marker(trimmed) {
            Self::Marker
        } else if trimmed.starts_with(COMMENT) {
            Self::Comment(trimmed)
        } else {
            Self::Address(trimmed)
        }
    }

    /// Returns `true` for comment lines other than the marker.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }
}

/// Returns `true` if `line` is the current or the legacy marker.
#[must_use]
pub fn is_marker(line: &str) -> bool {
    let line = line.trim();
    line == MARKER || line == LEGACY_MARKER
}

/// Formats the iteration comment.
#[must_use]
pub fn iteration_line(iteration: u64) -> String {
    format!("{ITERATION_PREFIX}{iteration}")
}

/// Parses an iteration comment. Returns `None` for anything malformed.
#[must_use]
pub fn parse_iteration(line: &str) -> Option<u64> {
    line.trim()
        .strip_prefix(ITERATION_PREFIX.trim_end())
        .and_then(|rest| rest.trim().parse().ok())
}

/// Replaces control characters (line breaks included) with spaces so that
/// upstream text cannot start a new line inside a comment.
#[must_use]
pub fn single_line(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}
