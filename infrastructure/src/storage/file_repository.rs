//! File-per-chat implementation of [`TranscriptRepository`].
//!
//! Every transcript lives in `<dir>/<file_name>` (no extension) as
//! pretty-printed JSON `{chat_title, file_name, messages}`. The directory
//! is the only index: listing re-reads it on every call.

use raimon_domain::{FileName, RepositoryError, TranscriptRecord, TranscriptRepository};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Transcript repository backed by a local directory.
#[derive(Debug, Clone)]
pub struct FileTranscriptRepository {
    dir: PathBuf,
}

impl FileTranscriptRepository {
    /// Use `dir` as the storage directory, creating it when missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| RepositoryError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, file_name: &FileName) -> PathBuf {
        self.dir.join(file_name.as_str())
    }

    fn read_record(path: &Path, name: &str) -> Option<TranscriptRecord> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!("Skipping unreadable transcript {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_slice::<TranscriptRecord>(&bytes) {
            Ok(mut record) => {
                // The on-disk name wins over whatever the body claims
                record.file_name = FileName::from_stored(name);
                Some(record)
            }
            Err(e) => {
                debug!("Skipping undecodable transcript {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl TranscriptRepository for FileTranscriptRepository {
    fn list(&self) -> Result<Vec<TranscriptRecord>, RepositoryError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| RepositoryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort_unstable_by(|a, b| b.cmp(a));

        let records: Vec<TranscriptRecord> = names
            .iter()
            .filter_map(|name| Self::read_record(&self.dir.join(name), name))
            .collect();

        debug!(
            "Listed {} transcripts in {}",
            records.len(),
            self.dir.display()
        );
        Ok(records)
    }

    fn write(&self, record: &TranscriptRecord) -> Result<(), RepositoryError> {
        let body = serde_json::to_vec_pretty(record).map_err(|source| RepositoryError::Encode {
            file_name: record.file_name.to_string(),
            source,
        })?;
        let path = self.path_for(&record.file_name);
        fs::write(&path, body).map_err(|source| RepositoryError::Io { path, source })?;
        debug!("Wrote transcript {}", record.file_name);
        Ok(())
    }

    fn remove(&self, file_name: &FileName) -> Result<(), RepositoryError> {
        let path = self.path_for(file_name);
        fs::remove_file(&path).map_err(|source| RepositoryError::Io { path, source })?;
        debug!("Removed transcript {}", file_name);
        Ok(())
    }
}
