//! Configuration file loading for raimon
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `RAIMON_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./raimon.toml` or `./.raimon.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/raimon/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileConversationConfig, FileLoggingConfig,
    FileModelsConfig, FileOpenAiConfig, FileReplConfig, FileStorageConfig,
};
pub use loader::{ConfigLoader, ConfigSource};
