//! Settings for the interactive chat loop.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Spinner between sending a prompt and the first answer fragment.
    pub show_progress: bool,
    /// Line-editor history; `None` keeps history in memory only.
    pub history_file: Option<PathBuf>,
}

impl ReplConfig {
    /// `<data_dir>/raimon/history.txt`, when the platform has a data dir.
    pub fn default_history_file() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("raimon").join("history.txt"))
    }
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: Self::default_history_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: ReplConfig = serde_json::from_str(r#"{ "show_progress": false }"#).unwrap();
        assert!(!config.show_progress);
        assert_eq!(config.history_file, ReplConfig::default_history_file());
    }
}
