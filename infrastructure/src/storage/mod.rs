//! Transcript persistence: one JSON file per chat in a single directory.

mod file_repository;

pub use file_repository::FileTranscriptRepository;
