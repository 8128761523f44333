//! Conversation log port.
//!
//! Records what happened in a chat (prompts, answers, saves, selections,
//! deletions) as machine-readable events. Diagnostic output stays with
//! `tracing`; this port is the transcript-level audit trail.

use serde_json::Value;

/// One entry of the conversation log.
#[derive(Debug, Clone)]
pub struct ConversationEvent {
    /// Event kind, e.g. `"user_message"` or `"transcript_saved"`.
    pub event_type: &'static str,
    /// Event fields; objects are flattened into the written record.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Sink for conversation events.
///
/// Logging is best effort: implementations swallow their own I/O failures
/// so a turn never fails because the log could not be written.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// Discards every event.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
