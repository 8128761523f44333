//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown focus: {0}")]
    InvalidFocus(String),

    #[error("File name already assigned as {current}, refusing to change it to {requested}")]
    FileNameAlreadyAssigned { current: String, requested: String },
}

impl DomainError {
    /// Check if this error is a violation of the once-per-session file name rule
    pub fn is_file_name_conflict(&self) -> bool {
        matches!(self, DomainError::FileNameAlreadyAssigned { .. })
    }
}
