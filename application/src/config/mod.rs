//! Application-level configuration.
//!
//! - [`ConversationParams`]: system prompt, default model and temperature

pub mod conversation_params;

pub use conversation_params::{ConversationParams, DEFAULT_SYSTEM_PROMPT};
