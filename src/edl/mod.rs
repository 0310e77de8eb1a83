//! EDL pipeline: parse, reconcile, render.
//!
//! Each stage takes the previous stage's output by value or reference and
//! produces a new immutable value; nothing is accumulated in shared buffers.
//!
//! ```text
//! raw payload --parse--> FetchResult --reconcile(previous)--> EdlDocument --render--> lines
//! ```

pub mod format;
mod model;
mod parser;
mod reconcile;
mod render;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use model::{AddressRecord, FetchResult, RecordMetadata, RequestParameters, Zone};
pub use parser::{ParseError, parse};
pub use reconcile::{EdlDocument, LastChange, ListAlert, Reconciliation, reconcile};
pub use render::{RenderOptions, render};
