//! Completion model identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static CHOICES: [Model; 2] = [Model::Gpt35Turbo, Model::Gpt4o];

/// Model used for a chat turn.
///
/// The selector offers [`Model::choices`]; any other name coming from
/// configuration or `--model` is kept verbatim as `Custom`. Serialized as
/// the plain API identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Model {
    #[default]
    Gpt35Turbo,
    Gpt4o,
    Custom(String),
}

impl Model {
    /// Identifier sent as `model` in completion requests.
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Custom(name) => name,
        }
    }

    /// Selector entries, in display order.
    pub fn choices() -> &'static [Model] {
        &CHOICES
    }

    pub fn is_builtin(&self) -> bool {
        !matches!(self, Model::Custom(_))
    }
}

impl From<&str> for Model {
    fn from(name: &str) -> Self {
        let name = name.trim();
        CHOICES
            .iter()
            .find(|choice| choice.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Model::Custom(name.to_string()))
    }
}

impl From<String> for Model {
    fn from(name: String) -> Self {
        Model::from(name.as_str())
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        match model {
            Model::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Model::from(s))
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_names_map_to_builtins() {
        assert_eq!(Model::from(" gpt-4o "), Model::Gpt4o);
        assert_eq!(Model::from("gpt-3.5-turbo"), Model::default());
        assert!(Model::choices().iter().all(Model::is_builtin));
    }

    #[test]
    fn test_unknown_name_is_kept_as_custom() {
        let model: Model = "gpt-4.1-mini".parse().unwrap();
        assert_eq!(model, Model::Custom("gpt-4.1-mini".to_string()));
        assert!(!model.is_builtin());
        assert_eq!(model.to_string(), "gpt-4.1-mini");
    }

    #[test]
    fn test_json_form_is_the_api_identifier() {
        assert_eq!(serde_json::to_string(&Model::Gpt4o).unwrap(), "\"gpt-4o\"");
        let custom: Model = serde_json::from_str("\"o1\"").unwrap();
        assert_eq!(custom, Model::Custom("o1".to_string()));
    }
}
