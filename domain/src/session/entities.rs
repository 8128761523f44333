//! Session domain entities

use super::file_name::FileName;
use super::transcript::TranscriptRecord;
use crate::core::error::DomainError;
use crate::core::focus::Focus;
use crate::core::model::Model;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Where the active session is in its turn cycle.
///
/// `Idle → AwaitingModelResponse → Idle`; one turn in flight at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingModelResponse,
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationState::Idle => write!(f, "idle"),
            ConversationState::AwaitingModelResponse => write!(f, "awaiting model response"),
        }
    }
}

/// The active chat session (Entity)
///
/// Process-local state every conversation handler receives explicitly:
/// the transcript, the file name once persisted, the selector values and the
/// per-title delete-menu flags.
#[derive(Debug, Clone)]
pub struct Session {
    messages: Vec<Message>,
    file_name: Option<FileName>,
    model: Model,
    focus: Focus,
    menu_open: HashMap<String, bool>,
    state: ConversationState,
}

impl Session {
    /// Fresh session: a single system message, no file name yet.
    pub fn new(system_prompt: impl Into<String>, model: Model) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            file_name: None,
            model,
            focus: Focus::default(),
            menu_open: HashMap::new(),
            state: ConversationState::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn file_name(&self) -> Option<&FileName> {
        self.file_name.as_ref()
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn set_state(&mut self, state: ConversationState) {
        self.state = state;
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn add_assistant_message(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Record the file name assigned by the first save.
    ///
    /// Re-assigning the same name is accepted; a different one is rejected
    /// because a session keeps its file for its whole life.
    pub fn assign_file_name(&mut self, file_name: FileName) -> Result<(), DomainError> {
        match &self.file_name {
            Some(current) if *current != file_name => Err(DomainError::FileNameAlreadyAssigned {
                current: current.to_string(),
                requested: file_name.to_string(),
            }),
            _ => {
                self.file_name = Some(file_name);
                Ok(())
            }
        }
    }

    /// Replace transcript and file name with a persisted record.
    pub fn load_record(&mut self, record: TranscriptRecord) {
        self.messages = record.messages;
        self.file_name = Some(record.file_name);
        self.state = ConversationState::Idle;
    }

    /// Back to the fresh-session transcript. Selector values and menu flags
    /// are left alone.
    pub fn reset(&mut self, system_prompt: impl Into<String>) {
        self.messages = vec![Message::system(system_prompt)];
        self.file_name = None;
        self.state = ConversationState::Idle;
    }

    // ==================== Delete menu flags ====================

    pub fn is_menu_open(&self, chat_title: &str) -> bool {
        self.menu_open.get(chat_title).copied().unwrap_or(false)
    }

    /// Flip the menu flag for `chat_title` and return the new value.
    pub fn toggle_menu(&mut self, chat_title: &str) -> bool {
        let open = !self.is_menu_open(chat_title);
        self.menu_open.insert(chat_title.to_string(), open);
        open
    }

    pub fn close_menu(&mut self, chat_title: &str) {
        self.menu_open.insert(chat_title.to_string(), false);
    }

    /// Forget the flag entirely (used after the chat is deleted).
    pub fn clear_menu(&mut self, chat_title: &str) {
        self.menu_open.remove(chat_title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::transcript::contains_user_message;
    use chrono::NaiveDate;

    fn sample_file_name(title: &str) -> FileName {
        let at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        FileName::generate(&at, title)
    }

    #[test]
    fn test_new_session_has_single_system_message() {
        let session = Session::new("be kind", Model::default());
        assert_eq!(session.messages(), &[Message::system("be kind")]);
        assert!(session.file_name().is_none());
        assert!(!contains_user_message(session.messages()));
        assert_eq!(session.state(), ConversationState::Idle);
        assert_eq!(session.focus(), Focus::DebateLivre);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_file_name_assigned_once() {
        let mut session = Session::new("sys", Model::default());
        let first = sample_file_name("Oi");
        session.assign_file_name(first.clone()).unwrap();
        session.assign_file_name(first.clone()).unwrap();

        let err = session
            .assign_file_name(sample_file_name("Outro"))
            .unwrap_err();
        assert!(err.is_file_name_conflict());
        assert_eq!(session.file_name(), Some(&first));
    }

    #[test]
    fn test_reset_keeps_selectors_and_drops_file_name() {
        let mut session = Session::new("sys", Model::default());
        session.set_model(Model::Gpt4o);
        session.set_focus(Focus::PenseComigo);
        session.add_user_message("Oi");
        session.assign_file_name(sample_file_name("Oi")).unwrap();

        session.reset("sys");

        assert_eq!(session.messages(), &[Message::system("sys")]);
        assert!(session.file_name().is_none());
        assert_eq!(session.model(), &Model::Gpt4o);
        assert_eq!(session.focus(), Focus::PenseComigo);
    }

    #[test]
    fn test_menu_flags() {
        let mut session = Session::new("sys", Model::default());
        assert!(!session.is_menu_open("Oi"));
        assert!(session.toggle_menu("Oi"));
        assert!(session.is_menu_open("Oi"));
        session.close_menu("Oi");
        assert!(!session.is_menu_open("Oi"));
        assert!(session.toggle_menu("Oi"));
        session.clear_menu("Oi");
        assert!(!session.is_menu_open("Oi"));
    }

    #[test]
    fn test_load_record_replaces_transcript() {
        let mut session = Session::new("sys", Model::default());
        session.add_user_message("draft");

        let record = TranscriptRecord::new(
            sample_file_name("Oi"),
            vec![Message::system("sys"), Message::user("Oi")],
        );
        session.load_record(record.clone());

        assert_eq!(session.messages(), record.messages.as_slice());
        assert_eq!(session.file_name(), Some(&record.file_name));
    }
}
