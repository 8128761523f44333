//! OpenAI-compatible chat-completion adapter
//!
//! Implements [`ChatCompletionGateway`](raimon_application::ChatCompletionGateway)
//! over `POST {base_url}/chat/completions` with `stream: true`, decoding the
//! server-sent events into [`StreamEvent`](raimon_domain::StreamEvent)s.

pub mod error;
pub mod gateway;
pub mod types;

pub use error::OpenAiError;
pub use gateway::OpenAiGateway;
