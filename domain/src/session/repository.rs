//! Transcript repository trait

use super::file_name::FileName;
use super::transcript::TranscriptRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a transcript repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode transcript {file_name}: {source}")]
    Encode {
        file_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Repository trait for persisted transcripts
///
/// This is a domain-level abstraction over where transcripts live; the
/// file-per-chat implementation is in the infrastructure layer. Lookups by
/// title are built on top of [`list`](Self::list) by the application layer.
pub trait TranscriptRepository: Send + Sync {
    /// All readable records, ordered by file name descending.
    ///
    /// Entries that cannot be read or decoded are skipped, not reported.
    fn list(&self) -> Result<Vec<TranscriptRecord>, RepositoryError>;

    /// Create or overwrite the record stored under `record.file_name`.
    fn write(&self, record: &TranscriptRecord) -> Result<(), RepositoryError>;

    /// Remove the record stored under `file_name`.
    fn remove(&self, file_name: &FileName) -> Result<(), RepositoryError>;
}
