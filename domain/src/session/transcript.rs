//! Persisted transcript record

use super::entities::Message;
use super::file_name::FileName;
use crate::core::string::first_chars;
use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from the first user message as title
pub const TITLE_MAX_CHARS: usize = 30;

/// Derive the chat title: the first [`TITLE_MAX_CHARS`] characters of the
/// first user message, or an empty string when there is none.
///
/// The same rule applies on every save, so a chat keeps its title.
pub fn derive_chat_title(messages: &[Message]) -> String {
    messages
        .iter()
        .find(|m| m.is_user())
        .map(|m| first_chars(&m.content, TITLE_MAX_CHARS).to_string())
        .unwrap_or_default()
}

/// True when at least one message has the user role.
pub fn contains_user_message(messages: &[Message]) -> bool {
    messages.iter().any(Message::is_user)
}

/// A transcript as written to storage.
///
/// `chat_title` is derived from `messages` and is never set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub chat_title: String,
    pub file_name: FileName,
    pub messages: Vec<Message>,
}

impl TranscriptRecord {
    pub fn new(file_name: FileName, messages: Vec<Message>) -> Self {
        Self {
            chat_title: derive_chat_title(&messages),
            file_name,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_first_user_message() {
        let messages = vec![
            Message::system("persona"),
            Message::user("Oi"),
            Message::assistant("Olá!"),
            Message::user("Tudo bem?"),
        ];
        assert_eq!(derive_chat_title(&messages), "Oi");
    }

    #[test]
    fn test_title_truncated_to_thirty_characters() {
        let long = "Preciso de ajuda com uma conversa difícil no trabalho";
        let messages = vec![Message::system("s"), Message::user(long)];
        let title = derive_chat_title(&messages);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(title, "Preciso de ajuda com uma conve");
    }

    #[test]
    fn test_title_empty_without_user_message() {
        let messages = vec![Message::system("s"), Message::assistant("hello")];
        assert_eq!(derive_chat_title(&messages), "");
        assert!(!contains_user_message(&messages));
    }

    #[test]
    fn test_record_json_layout() {
        let record = TranscriptRecord::new(
            FileName::from_stored("2025-01-01_00-00-00_Oi"),
            vec![Message::user("Oi")],
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["chat_title"], "Oi");
        assert_eq!(value["file_name"], "2025-01-01_00-00-00_Oi");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Oi");
    }
}
