//! Wire types for the chat-completions endpoint

use raimon_domain::Message;
use serde::{Deserialize, Serialize};

/// Request body for `POST /chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    pub temperature: f32,
    pub stream: bool,
}

/// One `data:` payload of the streamed response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatCompletionChunk {
    pub choices: Vec<ChunkChoice>,
    pub error: Option<ApiErrorBody>,
}

impl ChatCompletionChunk {
    /// Concatenated content of every choice's delta, if any.
    pub fn text(&self) -> Option<String> {
        let text: String = self
            .choices
            .iter()
            .filter_map(|c| c.delta.content.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChunkDelta {
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: String,
}
