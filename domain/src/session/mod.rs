//! Chat session domain.
//!
//! - [`entities::Session`]: the active, process-local chat session
//! - [`entities::Message`]: a single role-tagged message
//! - [`transcript::TranscriptRecord`]: a transcript as persisted
//! - [`file_name::FileName`]: the stable, once-assigned storage key
//! - [`repository::TranscriptRepository`]: trait for transcript persistence
//! - [`stream::StreamEvent`]: events of a streaming completion

pub mod entities;
pub mod file_name;
pub mod repository;
pub mod stream;
pub mod transcript;
