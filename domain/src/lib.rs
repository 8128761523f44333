//! Domain layer for raimon
//!
//! This crate contains the core entities, value objects and invariants.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Transcript**: ordered role-tagged messages forming one conversation
//! - **Session**: the active transcript plus selector state, passed
//!   explicitly to every handler
//! - **File name**: `<timestamp>_<slug>`, assigned once on first save

pub mod core;
pub mod session;

// Re-export commonly used types
pub use core::{error::DomainError, focus::Focus, model::Model};
pub use session::{
    entities::{ConversationState, Message, Role, Session},
    file_name::{FileName, slugify},
    repository::{RepositoryError, TranscriptRepository},
    stream::StreamEvent,
    transcript::{TITLE_MAX_CHARS, TranscriptRecord, contains_user_message, derive_chat_title},
};
