//! HTTP contract with the decision backend.
//!
//! [`Backend`] is the seam the greeting loader and submission controller talk
//! through; [`HttpBackend`] is the `reqwest` implementation used at runtime.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{
    ChatRequest, ChatResponse, HealthResponse, HelloResponse, CHAT_ENDPOINT, HEALTH_ENDPOINT,
    HELLO_ENDPOINT,
};
use crate::utils::url::construct_api_url;

/// Failure taxonomy for a single backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The body was not valid JSON or lacked the expected field.
    DecodeError(String),
    /// The server answered with a status outside 2xx.
    RequestFailed { status: u16 },
    /// The request never produced a response: connect failure, timeout, or a
    /// body that could not be read.
    TransportError(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::DecodeError(msg) => write!(f, "Malformed response body: {msg}"),
            BackendError::RequestFailed { status } => {
                write!(f, "API request failed with status {status}")
            }
            BackendError::TransportError(msg) => write!(f, "Network error: {msg}"),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::TransportError(err.to_string())
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/hello`, returning the `message` field.
    async fn hello(&self) -> Result<String, BackendError>;

    /// `GET /api/health`, returning the `status` field.
    async fn health(&self) -> Result<String, BackendError>;

    /// `POST /api/chat` with `question` as `user_question`, returning the
    /// `response` field.
    async fn ask(&self, question: &str) -> Result<String, BackendError>;
}

#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, BackendError> {
        let url = construct_api_url(&self.base_url, endpoint);
        debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::RequestFailed {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| BackendError::DecodeError(err.to_string()))
}

#[async_trait]
impl Backend for HttpBackend {
    async fn hello(&self) -> Result<String, BackendError> {
        let payload: HelloResponse = self.get_json(HELLO_ENDPOINT).await?;
        Ok(payload.message)
    }

    async fn health(&self) -> Result<String, BackendError> {
        let payload: HealthResponse = self.get_json(HEALTH_ENDPOINT).await?;
        Ok(payload.status)
    }

    async fn ask(&self, question: &str) -> Result<String, BackendError> {
        let url = construct_api_url(&self.base_url, CHAT_ENDPOINT);
        debug!(%url, question_len = question.len(), "POST");
        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&ChatRequest {
                user_question: question,
            })
            .send()
            .await?;
        let payload: ChatResponse = decode_response(response).await?;
        Ok(payload.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{CannedResponse, TestServer};

    #[tokio::test]
    async fn ask_posts_json_question_and_returns_response_field() {
        let server = TestServer::spawn(vec![CannedResponse::json(200, r#"{"response":"42"}"#)]).await;
        let backend = HttpBackend::new(server.url(), None).unwrap();

        let answer = backend.ask("What is the answer?").await.unwrap();
        assert_eq!(answer, "42");

        let requests = server.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_line, "POST /api/chat HTTP/1.1");
        assert_eq!(
            requests[0].header("content-type").as_deref(),
            Some("application/json")
        );
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body, serde_json::json!({ "user_question": "What is the answer?" }));
    }

    #[tokio::test]
    async fn non_success_status_is_request_failed_without_parsing_body() {
        let server = TestServer::spawn(vec![CannedResponse::json(500, r#"{"response":"ignored"}"#)]).await;
        let backend = HttpBackend::new(server.url(), None).unwrap();

        let err = backend.ask("q").await.unwrap_err();
        assert_eq!(err, BackendError::RequestFailed { status: 500 });
    }

    #[tokio::test]
    async fn invalid_json_is_decode_error() {
        let server = TestServer::spawn(vec![CannedResponse::json(200, "not json")]).await;
        let backend = HttpBackend::new(server.url(), None).unwrap();

        let err = backend.ask("q").await.unwrap_err();
        assert!(matches!(err, BackendError::DecodeError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn missing_field_is_decode_error() {
        let server = TestServer::spawn(vec![CannedResponse::json(200, r#"{"status":"ok"}"#)]).await;
        let backend = HttpBackend::new(server.url(), None).unwrap();

        let err = backend.hello().await.unwrap_err();
        assert!(matches!(err, BackendError::DecodeError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn hello_and_health_read_their_fields() {
        let server = TestServer::spawn(vec![
            CannedResponse::json(200, r#"{"message":"Hello from the backend!"}"#),
            CannedResponse::json(200, r#"{"status":"healthy"}"#),
        ])
        .await;
        let backend = HttpBackend::new(format!("{}/", server.url()), None).unwrap();

        assert_eq!(backend.hello().await.unwrap(), "Hello from the backend!");
        assert_eq!(backend.health().await.unwrap(), "healthy");

        let requests = server.requests().await;
        assert_eq!(requests[0].request_line, "GET /api/hello HTTP/1.1");
        assert_eq!(requests[1].request_line, "GET /api/health HTTP/1.1");
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let url = crate::utils::test_utils::unused_local_url().await;
        let backend = HttpBackend::new(url, Some(Duration::from_secs(2))).unwrap();

        let err = backend.hello().await.unwrap_err();
        assert!(matches!(err, BackendError::TransportError(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let server = TestServer::spawn(vec![
            CannedResponse::json(200, r#"{"response":"late"}"#).delayed(Duration::from_millis(500)),
        ])
        .await;
        let backend = HttpBackend::new(server.url(), Some(Duration::from_millis(50))).unwrap();

        let err = backend.ask("q").await.unwrap_err();
        assert!(matches!(err, BackendError::TransportError(_)), "got {err:?}");
    }
}
