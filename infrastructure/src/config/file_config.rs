//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application and
//! adapter settings by the binary.

use raimon_application::{ConversationParams, DEFAULT_SYSTEM_PROMPT};
use raimon_domain::{Focus, Model};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("openai.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("models.default cannot be empty")]
    EmptyModelName,

    #[error("openai.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("conversation.focus: {0}")]
    UnknownFocus(String),
}

/// Raw storage configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding one file per chat
    pub dir: Option<String>,
}

impl FileStorageConfig {
    /// The configured directory, or `<data_dir>/raimon/messages`.
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("raimon")
                .join("messages"),
        }
    }
}

/// Raw model configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model selected when a session starts
    pub default: String,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            default: Model::default().to_string(),
        }
    }
}

/// Raw conversation configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConversationConfig {
    /// Override for the persona system message
    pub system_prompt: Option<String>,
    /// Initial focus (key or label)
    pub focus: Option<String>,
}

/// Raw completion API configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Timeout in seconds for one completion request
    pub timeout_seconds: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL conversation log path
    pub conversation_log: Option<String>,
    /// Diagnostic log file (tracing output)
    pub file: Option<String>,
}

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a spinner while waiting for the first fragment
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub storage: FileStorageConfig,
    pub models: FileModelsConfig,
    pub conversation: FileConversationConfig,
    pub openai: FileOpenAiConfig,
    pub logging: FileLoggingConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.openai.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.models.default.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if self.openai.base_url.trim().is_empty() {
            return Err(ConfigValidationError::EmptyBaseUrl);
        }

        if let Some(focus) = &self.conversation.focus {
            focus
                .parse::<Focus>()
                .map_err(|e| ConfigValidationError::UnknownFocus(e.to_string()))?;
        }

        Ok(())
    }

    /// Render as TOML (used by `--print-default-config`)
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Parse the default model string into a Model
    pub fn default_model(&self) -> Model {
        // Unknown names become Custom(...)
        Model::from(self.models.default.as_str())
    }

    /// Initial focus, falling back to the default one
    pub fn initial_focus(&self) -> Focus {
        self.conversation
            .focus
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    /// Conversation parameters for the controller
    pub fn conversation_params(&self) -> ConversationParams {
        ConversationParams::default()
            .with_system_prompt(
                self.conversation
                    .system_prompt
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            )
            .with_default_model(self.default_model())
    }

    /// Conversation log path with `~` expanded
    pub fn conversation_log_path(&self) -> Option<PathBuf> {
        self.logging.conversation_log.as_deref().map(expand_home)
    }

    /// Diagnostic log file path with `~` expanded
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging.file.as_deref().map(expand_home)
    }

    /// REPL history path with `~` expanded, or `<data_dir>/raimon/history.txt`
    pub fn history_path(&self) -> Option<PathBuf> {
        match &self.repl.history_file {
            Some(path) => Some(expand_home(path)),
            None => dirs::data_dir().map(|d| d.join("raimon").join("history.txt")),
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[storage]
dir = "/tmp/raimon-messages"

[models]
default = "gpt-4o"

[conversation]
system_prompt = "Seja breve."
focus = "pense-comigo"

[openai]
base_url = "http://localhost:8080/v1"
api_key_env = "LOCAL_KEY"
timeout_seconds = 30

[logging]
conversation_log = "/tmp/raimon.jsonl"

[repl]
show_progress = false
history_file = "/tmp/raimon-history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.resolve_dir(), PathBuf::from("/tmp/raimon-messages"));
        assert_eq!(config.default_model(), Model::Gpt4o);
        assert_eq!(config.initial_focus(), Focus::PenseComigo);
        assert_eq!(config.openai.base_url, "http://localhost:8080/v1");
        assert_eq!(config.openai.api_key_env, "LOCAL_KEY");
        assert_eq!(config.openai.timeout_seconds, 30);
        assert_eq!(
            config.conversation_log_path(),
            Some(PathBuf::from("/tmp/raimon.jsonl"))
        );
        assert!(!config.repl.show_progress);
        assert_eq!(config.conversation_params().system_prompt, "Seja breve.");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[models]
default = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.default_model(), Model::Gpt4o);
        // Defaults should apply
        assert_eq!(config.openai.api_key_env, "OPENAI_API_KEY");
        assert!(config.repl.show_progress);
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.default_model(), Model::Gpt35Turbo);
        assert_eq!(config.initial_focus(), Focus::DebateLivre);
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(
            config.conversation_params().system_prompt,
            DEFAULT_SYSTEM_PROMPT
        );
        assert!(config.conversation_log_path().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_storage_dir_ends_with_messages() {
        let dir = FileConfig::default().storage.resolve_dir();
        assert!(dir.ends_with("raimon/messages"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[openai]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[models]
default = "  "
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }

    #[test]
    fn test_validate_unknown_focus() {
        let toml_str = r#"
[conversation]
focus = "yoga"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownFocus(_))
        ));
    }

    #[test]
    fn test_default_config_serializes_to_toml() {
        let rendered = FileConfig::default().to_toml().unwrap();
        assert!(rendered.contains("[openai]"));
        assert!(rendered.contains("default = \"gpt-3.5-turbo\""));
    }
}
