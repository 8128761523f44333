//! Infrastructure layer for raimon
//!
//! This crate contains adapters that implement the ports defined
//! in the domain and application layers, including configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileConversationConfig, FileLoggingConfig,
    FileModelsConfig, FileOpenAiConfig, FileReplConfig, FileStorageConfig,
};
pub use logging::JsonlConversationLogger;
pub use openai::{OpenAiError, OpenAiGateway};
pub use storage::FileTranscriptRepository;
