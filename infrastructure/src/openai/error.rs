//! Error types for the OpenAI adapter

use raimon_application::GatewayError;
use thiserror::Error;

/// Errors that can occur when talking to the completion API
#[derive(Error, Debug)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode chunk: {error}\nRaw chunk: {raw}")]
    Decode { error: String, raw: String },

    #[error("API error: {0}")]
    Api(String),
}

impl From<OpenAiError> for GatewayError {
    fn from(err: OpenAiError) -> Self {
        match err {
            OpenAiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            OpenAiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            OpenAiError::Status { status: 404, body } => GatewayError::ModelNotAvailable(body),
            e @ (OpenAiError::Decode { .. } | OpenAiError::Api(_)) => {
                GatewayError::StreamError(e.to_string())
            }
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_model_not_available() {
        let err: GatewayError = OpenAiError::Status {
            status: 404,
            body: "model gpt-9 does not exist".to_string(),
        }
        .into();
        assert!(matches!(err, GatewayError::ModelNotAvailable(body) if body.contains("gpt-9")));
    }

    #[test]
    fn test_other_status_maps_to_request_failed() {
        let err: GatewayError = OpenAiError::Status {
            status: 401,
            body: "invalid key".to_string(),
        }
        .into();
        assert!(matches!(err, GatewayError::RequestFailed(msg) if msg.contains("401")));
    }

    #[test]
    fn test_api_error_maps_to_stream_error() {
        let err: GatewayError = OpenAiError::Api("rate limited".to_string()).into();
        assert!(matches!(err, GatewayError::StreamError(msg) if msg.contains("rate limited")));
    }
}
