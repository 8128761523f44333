//! OpenAI chat-completion gateway

use super::error::OpenAiError;
use super::types::{ChatCompletionChunk, ChatCompletionRequest};
use async_trait::async_trait;
use eventsource_stream::{Event, Eventsource};
use futures::{Stream, StreamExt};
use raimon_application::{ChatCompletionGateway, CompletionRequest, GatewayError, StreamHandle};
use raimon_domain::StreamEvent;
use std::fmt::Display;
use std::pin::pin;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sentinel payload closing an OpenAI event stream
const DONE_MARKER: &str = "[DONE]";

/// Buffered events between the pump task and the consumer
const CHANNEL_CAPACITY: usize = 64;

/// Gateway to an OpenAI-compatible `/chat/completions` endpoint
pub struct OpenAiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl OpenAiGateway {
    /// Create a gateway reading the API key from `api_key_env`.
    ///
    /// A missing key is not an error here; it surfaces as
    /// [`GatewayError::MissingApiKey`] on the first request.
    pub fn new(
        base_url: impl Into<String>,
        api_key_env: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, OpenAiError> {
        let api_key_env = api_key_env.into();
        let api_key = std::env::var(&api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            "OpenAiGateway initialized (key {})",
            if api_key.is_some() { "found" } else { "missing" }
        );

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            api_key_env,
        })
    }

    /// Override the API key (for testing or explicit configuration)
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn send(&self, request: &CompletionRequest) -> Result<reqwest::Response, GatewayError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::MissingApiKey(self.api_key_env.clone()))?;

        let body = ChatCompletionRequest {
            model: request.model.as_str(),
            messages: &request.messages,
            temperature: request.temperature,
            stream: true,
        };

        debug!(
            "POST {} (model {}, {} messages)",
            self.endpoint(),
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(OpenAiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Completion request failed with {}", status);
            return Err(OpenAiError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl ChatCompletionGateway for OpenAiGateway {
    async fn stream_completion(
        &self,
        request: CompletionRequest,
    ) -> Result<StreamHandle, GatewayError> {
        let response = self.send(&request).await?;
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let events = response.bytes_stream().eventsource();
        tokio::spawn(pump_events(events, tx));

        Ok(StreamHandle::new(rx))
    }
}

/// Decode one `data:` payload into its text fragment, if it carries one.
fn parse_chunk(data: &str) -> Result<Option<String>, OpenAiError> {
    let chunk: ChatCompletionChunk =
        serde_json::from_str(data).map_err(|e| OpenAiError::Decode {
            error: e.to_string(),
            raw: data.to_string(),
        })?;

    if let Some(error) = chunk.error {
        return Err(OpenAiError::Api(error.message));
    }

    Ok(chunk.text())
}

/// Forward server-sent events to the channel until the stream ends.
///
/// Emits one `Delta` per text fragment, then exactly one terminal event:
/// `Completed` with the full text on `[DONE]` or end of stream, `Error`
/// on a transport or decode failure. Stops early if the receiver is gone.
async fn pump_events<S, E>(stream: S, tx: mpsc::Sender<StreamEvent>)
where
    S: Stream<Item = Result<Event, E>>,
    E: Display,
{
    let mut stream = pin!(stream);
    let mut full_text = String::new();

    while let Some(item) = stream.next().await {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                warn!("Completion stream failed: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        };

        let data = event.data.trim();
        if data == DONE_MARKER {
            break;
        }
        if data.is_empty() {
            continue;
        }

        match parse_chunk(data) {
            Ok(Some(fragment)) => {
                debug!("Received {} bytes", fragment.len());
                full_text.push_str(&fragment);
                if tx.send(StreamEvent::Delta(fragment)).await.is_err() {
                    debug!("Stream consumer dropped; stopping");
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Completion stream failed: {}", e);
                let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                return;
            }
        }
    }

    let _ = tx.send(StreamEvent::Completed(full_text)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use raimon_domain::{Message, Model};
    use std::convert::Infallible;

    async fn run_pump<T: Into<String>>(chunks: Vec<T>) -> Vec<StreamEvent> {
        let bytes = futures::stream::iter(
            chunks
                .into_iter()
                .map(|chunk| Ok::<String, Infallible>(chunk.into())),
        );
        let (tx, mut rx) = mpsc::channel(CHANNEL_CAPACITY);
        pump_events(bytes.eventsource(), tx).await;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    fn delta(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":\"{}\"}},\"finish_reason\":null}}]}}\n\n",
            content
        )
    }

    #[tokio::test]
    async fn test_pump_emits_deltas_then_completed() {
        let events = run_pump(vec![delta("Ol"), delta("á!"), "data: [DONE]\n\n".to_string()]).await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Ol".to_string()),
                StreamEvent::Delta("á!".to_string()),
                StreamEvent::Completed("Olá!".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_handles_events_split_across_chunks() {
        let events = run_pump(vec![
            "data: {\"choices\":[{\"delta\":{\"con",
            "tent\":\"Oi\"}}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;

        assert_eq!(
            events,
            vec![
                StreamEvent::Delta("Oi".to_string()),
                StreamEvent::Completed("Oi".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_pump_skips_role_only_chunks() {
        let events = run_pump(vec![
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"x\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n",
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert_eq!(events[1], StreamEvent::Completed("x".to_string()));
    }

    #[tokio::test]
    async fn test_pump_completes_when_stream_ends_without_done() {
        let events = run_pump(vec!["data: {\"choices\":[{\"delta\":{\"content\":\"a\"}}]}\n\n"]).await;
        assert_eq!(events.last(), Some(&StreamEvent::Completed("a".to_string())));
    }

    #[tokio::test]
    async fn test_pump_reports_api_error() {
        let events = run_pump(vec![
            "data: {\"choices\":[{\"delta\":{\"content\":\"par\"}}]}\n\n",
            "data: {\"error\":{\"message\":\"overloaded\"}}\n\n",
        ])
        .await;

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[1], StreamEvent::Error(msg) if msg.contains("overloaded")));
    }

    #[tokio::test]
    async fn test_pump_reports_undecodable_chunk() {
        let events = run_pump(vec!["data: not-json\n\n"]).await;
        assert_eq!(events.len(), 1);
        assert!(events[0].is_terminal());
        assert!(matches!(&events[0], StreamEvent::Error(msg) if msg.contains("not-json")));
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let gateway = OpenAiGateway::new(
            "http://127.0.0.1:9/v1",
            "RAIMON_TEST_KEY_THAT_IS_NOT_SET",
            Duration::from_secs(1),
        )
        .unwrap()
        .with_api_key(None);
        assert!(!gateway.has_api_key());

        let request = CompletionRequest::new(Model::default(), vec![Message::user("Oi")]);
        let err = gateway.stream_completion(request).await.unwrap_err();
        assert!(
            matches!(err, GatewayError::MissingApiKey(name) if name == "RAIMON_TEST_KEY_THAT_IS_NOT_SET")
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = OpenAiGateway::new("http://localhost:8080/v1/", "X", Duration::from_secs(1))
            .unwrap()
            .with_api_key(Some("k".to_string()));
        assert_eq!(gateway.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert!(gateway.has_api_key());
    }
}
