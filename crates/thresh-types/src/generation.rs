//! Wire types for the code-generation service.
//!
//! - `POST {base}/api/generate` takes [`GenerateRequest`] and answers with
//!   [`GenerateResponse`].
//! - `POST {base}/api/feedback` takes [`FeedbackPayload`]; the response body
//!   is ignored.

use serde::{Deserialize, Serialize};

use crate::message::{DEFAULT_LANGUAGE, MessageId};

/// Body of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    pub user_id: String,
}

/// Body of a successful generation response.
///
/// `code` is optional here so a payload without it can be reported as
/// malformed instead of failing deserialization outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Body of a feedback submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub message_id: MessageId,
    pub is_positive: bool,
}

/// Validated result of a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub content: String,
    pub language: String,
}

impl GeneratedCode {
    /// Build from parts, substituting [`DEFAULT_LANGUAGE`] for a missing or blank tag.
    pub fn new(content: impl Into<String>, language: Option<String>) -> Self {
        let language = language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        Self {
            content: content.into(),
            language,
        }
    }
}
