//! Session Store use case.
//!
//! Enumerates, loads, saves and deletes transcripts through a
//! [`TranscriptRepository`]. Title lookups are linear scans over the listing,
//! so when titles collide the most recent file wins.

use crate::ports::clock::{Clock, SystemClock};
use raimon_domain::{
    FileName, Message, RepositoryError, TranscriptRecord, TranscriptRepository,
    contains_user_message, derive_chat_title,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur in Session Store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Durable list/load/save/delete of transcripts.
#[derive(Clone)]
pub struct SessionStore {
    repository: Arc<dyn TranscriptRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn TranscriptRepository>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a specific clock for file name timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// All persisted transcripts, most recently created first.
    pub fn list_transcripts(&self) -> Result<Vec<TranscriptRecord>, StoreError> {
        let records = self.repository.list()?;
        debug!("Listed {} transcripts", records.len());
        Ok(records)
    }

    /// Titles of all persisted transcripts, in listing order.
    pub fn chat_titles(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .list_transcripts()?
            .into_iter()
            .map(|record| record.chat_title)
            .collect())
    }

    /// First transcript in listing order whose title equals `chat_title`.
    pub fn load_by_title(&self, chat_title: &str) -> Result<Option<TranscriptRecord>, StoreError> {
        Ok(self
            .list_transcripts()?
            .into_iter()
            .find(|record| record.chat_title == chat_title))
    }

    /// Persist `messages`.
    ///
    /// Does nothing and returns `None` unless the transcript has a user
    /// message. Without `file_name` a new one is generated from the clock and
    /// the title; with it, that file is overwritten.
    pub fn save(
        &self,
        file_name: Option<&FileName>,
        messages: &[Message],
    ) -> Result<Option<TranscriptRecord>, StoreError> {
        if !contains_user_message(messages) {
            debug!("Skipping save: transcript has no user message");
            return Ok(None);
        }

        let file_name = match file_name {
            Some(existing) => existing.clone(),
            None => {
                let generated =
                    FileName::generate(&self.clock.now(), &derive_chat_title(messages));
                info!("Assigned file name {}", generated);
                generated
            }
        };

        let record = TranscriptRecord::new(file_name, messages.to_vec());
        self.repository.write(&record)?;
        debug!(
            "Saved transcript {} ({} messages)",
            record.file_name,
            record.messages.len()
        );
        Ok(Some(record))
    }

    /// Remove the transcript titled `chat_title`.
    ///
    /// Never fails: an unknown title, an unreadable directory or a file that
    /// cannot be removed are only logged. Returns the removed file name.
    pub fn delete_by_title(&self, chat_title: &str) -> Option<FileName> {
        let record = match self.load_by_title(chat_title) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!("No transcript titled {:?} to delete", chat_title);
                return None;
            }
            Err(e) => {
                warn!("Could not list transcripts for deletion: {}", e);
                return None;
            }
        };

        match self.repository.remove(&record.file_name) {
            Ok(()) => {
                info!("Deleted transcript {}", record.file_name);
                Some(record.file_name)
            }
            Err(e) => {
                warn!("Could not delete transcript {}: {}", record.file_name, e);
                None
            }
        }
    }
}
