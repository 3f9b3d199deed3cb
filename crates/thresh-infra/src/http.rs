//! HttpGenerationService -- concrete [`GenerationService`] over HTTP/JSON.
//!
//! Talks to the generation service's two endpoints:
//! - `POST {base}/api/generate` with `{ prompt, userId }`
//! - `POST {base}/api/feedback` with `{ messageId, isPositive }`
//!
//! The underlying reqwest client keeps a cookie store, so any session cookie
//! the service sets is sent back on later requests. No timeout is configured;
//! requests rely on the transport defaults and are never retried.

use thresh_core::transport::GenerationService;
use thresh_types::error::TransportError;
use thresh_types::generation::{FeedbackPayload, GenerateRequest, GenerateResponse, GeneratedCode};
use thresh_types::message::MessageId;

/// Length of the random part of a request user id.
const USER_ID_LEN: usize = 9;

/// Generation service client.
#[derive(Debug, Clone)]
pub struct HttpGenerationService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerationService {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Use a preconfigured reqwest client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// A fresh random user id of the form `user-xxxxxxxxx`.
///
/// Generated per request, so requests from one session are not correlated.
pub fn request_user_id() -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("user-{}", &random[..USER_ID_LEN])
}

/// Validate a decoded generation payload.
fn into_generated_code(response: GenerateResponse) -> Result<GeneratedCode, TransportError> {
    match response.code {
        Some(code) if !code.is_empty() => Ok(GeneratedCode::new(code, response.language)),
        _ => Err(TransportError::MalformedResponse(
            "response has no `code` field".to_string(),
        )),
    }
}

impl GenerationService for HttpGenerationService {
    async fn request_generation(&self, prompt: &str) -> Result<GeneratedCode, TransportError> {
        let body = GenerateRequest {
            prompt: prompt.to_string(),
            user_id: request_user_id(),
        };
        let url = self.url("/api/generate");
        tracing::debug!(%url, user_id = %body.user_id, "requesting generation");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::GenerationFailed(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(TransportError::GenerationFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::GenerationFailed(format!("failed to read body: {e}")))?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|e| TransportError::MalformedResponse(format!("failed to parse response: {e}")))?;

        into_generated_code(parsed)
    }

    async fn submit_feedback(&self, message_id: &MessageId, is_positive: bool) -> Result<(), TransportError> {
        let body = FeedbackPayload {
            message_id: message_id.clone(),
            is_positive,
        };
        let url = self.url("/api/feedback");
        tracing::debug!(%url, %message_id, is_positive, "submitting feedback");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::FeedbackFailed(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::FeedbackFailed(format!("HTTP {status}")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::Json;
    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use serde_json::{Value, json};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn generate_route(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/api/generate",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    #[test]
    fn test_request_user_id_shape() {
        let id = request_user_id();
        assert!(id.starts_with("user-"));
        assert_eq!(id.len(), "user-".len() + USER_ID_LEN);
        assert!(id[5..].chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(request_user_id(), request_user_id());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = HttpGenerationService::new("http://localhost:8080/").unwrap();
        assert_eq!(service.base_url(), "http://localhost:8080");
        assert_eq!(service.url("/api/generate"), "http://localhost:8080/api/generate");
    }

    #[tokio::test]
    async fn test_generation_success_sends_prompt_and_user_id() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/api/generate",
            post(move |Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    *recorder.lock().unwrap() = Some(body);
                    Json(json!({ "code": "print(1)", "language": "python" }))
                }
            }),
        );
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();

        let code = service.request_generation("print one").await.unwrap();
        assert_eq!(code, GeneratedCode::new("print(1)", Some("python".into())));

        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["prompt"], "print one");
        assert!(body["userId"].as_str().unwrap().starts_with("user-"));
    }

    #[tokio::test]
    async fn test_generation_missing_language_defaults() {
        let router = generate_route(StatusCode::OK, json!({ "code": "console.log(1)" }));
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let code = service.request_generation("log").await.unwrap();
        assert_eq!(code.language, "javascript");
    }

    #[tokio::test]
    async fn test_generation_server_error() {
        let router = generate_route(StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "boom" }));
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let err = service.request_generation("x").await.unwrap_err();
        assert!(matches!(err, TransportError::GenerationFailed(ref m) if m.contains("500")));
    }

    #[tokio::test]
    async fn test_generation_missing_code_is_malformed() {
        let router = generate_route(StatusCode::OK, json!({ "language": "rust" }));
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let err = service.request_generation("x").await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generation_non_json_is_malformed() {
        let router = Router::new().route("/api/generate", post(|| async { "not json" }));
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let err = service.request_generation("x").await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_generation_unreachable_service() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let service = HttpGenerationService::new(format!("http://{addr}")).unwrap();
        let err = service.request_generation("x").await.unwrap_err();
        assert!(matches!(err, TransportError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_feedback_payload_and_status() {
        let seen: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
        let recorder = seen.clone();
        let router = Router::new().route(
            "/api/feedback",
            post(move |Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    *recorder.lock().unwrap() = Some(body);
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let id = MessageId::new();

        service.submit_feedback(&id, false).await.unwrap();
        let body = seen.lock().unwrap().clone().unwrap();
        assert_eq!(body["messageId"], id.to_string());
        assert_eq!(body["isPositive"], false);
    }

    #[tokio::test]
    async fn test_feedback_failure_status() {
        let router = Router::new().route(
            "/api/feedback",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();
        let err = service.submit_feedback(&MessageId::new(), true).await.unwrap_err();
        assert!(matches!(err, TransportError::FeedbackFailed(_)));
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent_back() {
        let router = Router::new()
            .route(
                "/api/generate",
                post(|| async {
                    (
                        [(header::SET_COOKIE, "session=abc123; Path=/")],
                        Json(json!({ "code": "x" })),
                    )
                }),
            )
            .route(
                "/api/feedback",
                post(|headers: HeaderMap| async move {
                    let has_session = headers
                        .get(header::COOKIE)
                        .and_then(|v| v.to_str().ok())
                        .is_some_and(|v| v.contains("session=abc123"));
                    if has_session {
                        StatusCode::OK.into_response()
                    } else {
                        StatusCode::UNAUTHORIZED.into_response()
                    }
                }),
            );
        let service = HttpGenerationService::new(spawn_server(router).await).unwrap();

        service.request_generation("x").await.unwrap();
        service.submit_feedback(&MessageId::new(), true).await.unwrap();
    }
}
