//! File-based state persistence implementation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{LoadResult, StateError, StateStore, read_previous};

/// The EDL output file, used both as output and as the previous-run state.
///
/// # Atomic Writes
///
/// Uses write-to-temp-then-rename pattern to prevent corruption:
/// 1. Write to `{path}.tmp`
/// 2. Rename `{path}.tmp` to `{path}`
///
/// A firewall polling the file never sees a half-written list.
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Creates a store for the output file at the given path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the output file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Performs the blocking save operation.
    ///
    /// Separated out so it can be wrapped in `spawn_blocking`.
    fn save_blocking(path: &Path, contents: &str) -> Result<(), StateError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StateError::Write)?;
            }
        }

        // Append .tmp instead of replacing extension to avoid conflicts
        // (e.g., edl.txt -> edl.txt.tmp, not edl.tmp)
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, contents).map_err(StateError::Write)?;
        std::fs::rename(&temp_path, path).map_err(StateError::Write)?;

        Ok(())
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> LoadResult {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => read_previous(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => LoadResult::NotFound,
            Err(e) => LoadResult::Unreadable {
                reason: format!("Failed to read file: {e}"),
            },
        }
    }

    async fn save(&self, contents: String) -> Result<(), StateError> {
        let path = self.path.clone();

        // Use spawn_blocking to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &contents))
            .await
            .map_err(StateError::Task)?
    }
}
