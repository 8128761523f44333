//! Application layer for raimon
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConversationParams, DEFAULT_SYSTEM_PROMPT};
pub use ports::{
    clock::{Clock, SystemClock},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{ChatCompletionGateway, CompletionRequest, GatewayError, StreamHandle},
    progress::{NoTurnObserver, TurnObserver},
};
pub use use_cases::conversation::{
    ChatSelection, ConversationController, ConversationError, TurnOutcome,
};
pub use use_cases::session_store::{SessionStore, StoreError};
