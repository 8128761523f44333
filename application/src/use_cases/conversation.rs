//! Conversation Controller use case.
//!
//! Orchestrates one turn of dialogue on an explicit [`Session`]:
//!
//! ```text
//! Idle ──prompt accepted──▶ AwaitingModelResponse ──stream done──▶ Idle ──▶ save
//! ```
//!
//! The whole transcript (system message included) is sent as context on
//! every turn. Fragments are relayed to a [`TurnObserver`] as they arrive and
//! the assistant message is appended only once the stream completes, so a
//! failed stream never reaches disk.

use crate::config::ConversationParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{
    ChatCompletionGateway, CompletionRequest, GatewayError,
};
use crate::ports::progress::TurnObserver;
use crate::use_cases::session_store::{SessionStore, StoreError};
use raimon_domain::core::string::preview;
use raimon_domain::{ConversationState, DomainError, FileName, Session, TranscriptRecord};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while handling a conversation event.
#[derive(Error, Debug)]
pub enum ConversationError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("A turn is already in progress")]
    TurnInProgress,
}

/// Result of [`ConversationController::submit_prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Empty prompt; nothing happened.
    Skipped,
    /// The turn completed and the transcript was saved.
    Completed {
        answer: String,
        file_name: Option<FileName>,
    },
}

/// Result of [`ConversationController::select_chat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatSelection {
    /// The empty title: the session was reset to a fresh chat.
    NewChat,
    /// A persisted chat replaced the session transcript.
    Loaded { chat_title: String, file_name: FileName },
    /// No chat has that title; the session is untouched.
    NotFound,
}

/// Use case driving the active chat session.
pub struct ConversationController {
    gateway: Arc<dyn ChatCompletionGateway>,
    store: SessionStore,
    params: ConversationParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl ConversationController {
    pub fn new(
        gateway: Arc<dyn ChatCompletionGateway>,
        store: SessionStore,
        params: ConversationParams,
    ) -> Self {
        Self {
            gateway,
            store,
            params,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// A fresh session: one system message, default model, no file name.
    pub fn new_session(&self) -> Session {
        let session = self.params.new_session();
        self.conversation_logger.log(ConversationEvent::new(
            "session_started",
            json!({ "model": session.model().as_str() }),
        ));
        session
    }

    /// Run one turn: append the prompt, stream the answer, append it, save.
    ///
    /// Blank prompts return [`TurnOutcome::Skipped`]. When the gateway or the
    /// stream fails the user message stays in memory, no assistant message is
    /// added, nothing is saved and the session is back to `Idle`.
    pub async fn submit_prompt(
        &self,
        session: &mut Session,
        prompt: &str,
        observer: &dyn TurnObserver,
    ) -> Result<TurnOutcome, ConversationError> {
        if prompt.trim().is_empty() {
            return Ok(TurnOutcome::Skipped);
        }
        if session.state() != ConversationState::Idle {
            return Err(ConversationError::TurnInProgress);
        }

        info!("User prompt: {}", preview(prompt, 80));
        session.add_user_message(prompt);
        self.conversation_logger.log(ConversationEvent::new(
            "user_message",
            json!({ "model": session.model().as_str(), "content": prompt }),
        ));

        session.set_state(ConversationState::AwaitingModelResponse);
        let request = CompletionRequest::new(session.model().clone(), session.messages().to_vec())
            .with_temperature(self.params.temperature);

        observer.on_stream_start(session.model());
        let streamed = self.stream_answer(request, observer).await;
        observer.on_stream_end();
        session.set_state(ConversationState::Idle);

        let answer = match streamed {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Turn failed: {}", e);
                return Err(e);
            }
        };

        debug!("Assistant answered with {} bytes", answer.len());
        session.add_assistant_message(answer.clone());
        self.conversation_logger.log(ConversationEvent::new(
            "assistant_response",
            json!({ "model": session.model().as_str(), "content": answer }),
        ));

        let saved = self.save_session(session)?;
        Ok(TurnOutcome::Completed {
            answer,
            file_name: saved.map(|record| record.file_name),
        })
    }

    async fn stream_answer(
        &self,
        request: CompletionRequest,
        observer: &dyn TurnObserver,
    ) -> Result<String, ConversationError> {
        let stream = self.gateway.stream_completion(request).await?;
        let answer = stream.relay(|chunk| observer.on_stream_chunk(chunk)).await?;
        Ok(answer)
    }

    /// Persist the session and remember the file name on first save.
    pub fn save_session(
        &self,
        session: &mut Session,
    ) -> Result<Option<TranscriptRecord>, ConversationError> {
        let Some(record) = self.store.save(session.file_name(), session.messages())? else {
            return Ok(None);
        };

        session.assign_file_name(record.file_name.clone())?;
        self.conversation_logger.log(ConversationEvent::new(
            "transcript_saved",
            json!({
                "file_name": record.file_name.as_str(),
                "chat_title": record.chat_title,
                "messages": record.messages.len(),
            }),
        ));
        Ok(Some(record))
    }

    /// Switch the session to another chat.
    ///
    /// Only the exact empty string means "new chat". An unknown title falls
    /// through without touching the session.
    pub fn select_chat(
        &self,
        session: &mut Session,
        chat_title: &str,
    ) -> Result<ChatSelection, ConversationError> {
        if chat_title.is_empty() {
            session.reset(self.params.system_prompt.clone());
            info!("Started a new chat");
            self.conversation_logger.log(ConversationEvent::new(
                "chat_selected",
                json!({ "chat_title": "", "new_chat": true }),
            ));
            return Ok(ChatSelection::NewChat);
        }

        let Some(record) = self.store.load_by_title(chat_title)? else {
            debug!("No chat titled {:?}", chat_title);
            return Ok(ChatSelection::NotFound);
        };

        let selection = ChatSelection::Loaded {
            chat_title: record.chat_title.clone(),
            file_name: record.file_name.clone(),
        };
        info!("Loaded chat {}", record.file_name);
        self.conversation_logger.log(ConversationEvent::new(
            "chat_selected",
            json!({
                "chat_title": record.chat_title,
                "file_name": record.file_name.as_str(),
                "new_chat": false,
            }),
        ));
        session.load_record(record);
        Ok(selection)
    }

    /// Delete the chat titled `chat_title` and clear its menu flag.
    ///
    /// Never fails; returns the removed file name when something was removed.
    /// The active session keeps its transcript and file name, so the next
    /// turn writes that file again.
    pub fn delete_chat(&self, session: &mut Session, chat_title: &str) -> Option<FileName> {
        let removed = self.store.delete_by_title(chat_title);
        session.clear_menu(chat_title);

        if let Some(file_name) = &removed {
            self.conversation_logger.log(ConversationEvent::new(
                "transcript_deleted",
                json!({ "chat_title": chat_title, "file_name": file_name.as_str() }),
            ));
        }
        removed
    }
}
