//! File-backed sequence counter
//!
//! The counter file holds a single integer as text. There is no locking:
//! the server answers one request at a time, so read-modify-write is safe.

use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// Sequence counter persisted in a plain text file
#[derive(Debug, Clone)]
pub struct SequenceCounter {
    path: PathBuf,
}

impl SequenceCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the current sequence number
    pub async fn current(&self) -> Result<u64> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::file_read(&self.path, &e))?;
        parse_sequence(&content, &self.path)
    }

    /// Persist `answered + 1`, overwriting the file
    ///
    /// Returns the new sequence number.
    pub async fn advance(&self, answered: u64) -> Result<u64> {
        let next = answered
            .checked_add(1)
            .ok_or_else(|| Error::malformed_counter(&self.path))?;
        tokio::fs::write(&self.path, next.to_string())
            .await
            .map_err(|e| Error::file_write(&self.path, &e))?;

        tracing::debug!(sequence = next, "Sequence counter advanced");
        Ok(next)
    }
}

/// Parse counter file contents, tolerating surrounding whitespace
pub fn parse_sequence(content: &str, path: &Path) -> Result<u64> {
    content
        .trim()
        .parse()
        .map_err(|_| Error::malformed_counter(path))
}
