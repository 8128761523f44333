//! Presentation layer for raimon
//!
//! This crate contains CLI definitions, output formatters,
//! the streaming answer printer, and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand};
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{PlainPrinter, StreamPrinter};
