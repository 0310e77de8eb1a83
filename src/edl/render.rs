//! Serializes an [`EdlDocument`] into output lines.

use std::fmt::Display;

use crate::time;

use super::format::{self, COMMENT, Line, MARKER, UNKNOWN};
use super::model::{AddressRecord, RecordMetadata, Zone};
use super::reconcile::EdlDocument;

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

/// Width of the `#` run on each side of a zone banner.
const BANNER_RULE: &str = "####################";

/// Rendering switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Drop every comment line except the marker.
    pub suppress_comments: bool,
}

impl RenderOptions {
    /// Options with comment suppression set as given.
    #[must_use]
    pub const fn new(suppress_comments: bool) -> Self {
        Self { suppress_comments }
    }
}

/// Renders the document as an ordered list of lines (without terminators).
///
/// The marker line is always first. Every address of the document appears
/// exactly once as a bare line, in zone order and, within a zone, in record
/// order.
#[must_use]
pub fn render(document: &EdlDocument, options: RenderOptions) -> Vec<String> {
    let lines = full_lines(document);

    if !options.suppress_comments {
        return lines;
    }

    lines
        .into_iter()
        .filter(|line| {
            let keep = !Line::classify(line).is_comment();
            if !keep {
                tracing::trace!("Skipping line due to comment suppression: {line}");
            }
            keep
        })
        .collect()
}

impl EdlDocument {
    /// Renders the document and joins it into file contents, one
    /// newline-terminated line each.
    #[must_use]
    pub fn to_file_contents(&self, options: RenderOptions) -> String {
        render(self, options)
            .into_iter()
            .fold(String::new(), |mut out, line| {
                out.push_str(&line);
                out.push('\n');
                out
            })
    }
}

fn full_lines(document: &EdlDocument) -> Vec<String> {
    let fetch = &document.fetch;
    let mut lines = vec![
        MARKER.to_string(),
        format::iteration_line(document.iteration),
        comment(format!(
            "Retrieved at: {}",
            time::format_precise(&fetch.retrieved_at)
        )),
        comment(&document.last_change),
        comment(&fetch.request),
        COMMENT.to_string(),
    ];

    for zone in &fetch.zones {
        push_zone(&mut lines, zone);
    }

    lines
}

fn push_zone(lines: &mut Vec<String>, zone: &Zone) {
    lines.push(COMMENT.to_string());
    lines.push(format!(
        "{BANNER_RULE} {} {BANNER_RULE}",
        format::single_line(&zone.name)
    ));
    lines.push(COMMENT.to_string());

    for record in zone.annotated() {
        if let Some(meta) = &record.metadata {
            push_metadata(lines, meta);
        }
        lines.push(record.address.clone());
        lines.push(COMMENT.to_string());
    }

    let mut bare = zone.bare().peekable();
    if bare.peek().is_some() {
        lines.push(comment("No info available:"));
        lines.extend(bare.map(|r: &AddressRecord| r.address.clone()));
    }
}

fn push_metadata(lines: &mut Vec<String>, meta: &RecordMetadata) {
    let created = meta.created_at.and_then(time::format_record);

    lines.push(field("type", meta.service_type.as_deref()));
    lines.push(field("active", meta.address_type.as_deref()));
    lines.push(field("allowlisted", meta.allowlisted));
    lines.push(field("creation_timestamp", created.as_deref()));
    lines.push(COMMENT.to_string());
}

fn comment(text: impl Display) -> String {
    format!("{COMMENT} {text}")
}

fn field<T: Display>(name: &str, value: Option<T>) -> String {
    match value {
        Some(value) => format!(
            "{COMMENT}    {name}: {}",
            format::single_line(&value.to_string())
        ),
        None => format!("{COMMENT}    {name}: {UNKNOWN}"),
    }
}
