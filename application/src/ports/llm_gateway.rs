//! Chat-completion gateway port
//!
//! Defines the interface for requesting completions from an LLM provider.

use async_trait::async_trait;
use raimon_domain::{Message, Model, StreamEvent};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Missing API key: set {0}")]
    MissingApiKey(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Everything the provider needs for one completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    /// Full transcript, system message included, in conversation order.
    pub messages: Vec<Message>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: Model, messages: Vec<Message>) -> Self {
        Self {
            model,
            messages,
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Handle for receiving streaming events from a completion.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`. The sequence is finite and can be
/// read once; dropping the handle stops the consumer side.
#[derive(Debug)]
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Build an already-finished stream from a list of events.
    pub fn from_events(events: Vec<StreamEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity covers every event, so try_send cannot fill up
            let _ = tx.try_send(event);
        }
        Self::new(rx)
    }

    /// Drain the stream, handing every fragment to `on_chunk`, and return
    /// the full answer.
    ///
    /// A `Completed` without preceding deltas is relayed as one fragment.
    /// The stream must end with a terminal event: a producer that hangs up
    /// early yields [`GatewayError::StreamError`], never a partial answer.
    pub async fn relay(mut self, mut on_chunk: impl FnMut(&str)) -> Result<String, GatewayError> {
        let mut answer = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    on_chunk(&chunk);
                    answer.push_str(&chunk);
                }
                StreamEvent::Completed(text) => {
                    if answer.is_empty() && !text.is_empty() {
                        on_chunk(&text);
                        answer = text;
                    }
                    return Ok(answer);
                }
                StreamEvent::Error(e) => return Err(GatewayError::StreamError(e)),
            }
        }
        Err(GatewayError::StreamError(
            "stream ended before completion".to_string(),
        ))
    }
}

/// Gateway for chat completions
///
/// This port defines how the application layer talks to the completion API.
/// Implementations (adapters) live in the infrastructure layer and own
/// authentication, rate limiting and the provider's error semantics.
#[async_trait]
pub trait ChatCompletionGateway: Send + Sync {
    /// Start a streamed completion.
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<StreamHandle, GatewayError>;
}
