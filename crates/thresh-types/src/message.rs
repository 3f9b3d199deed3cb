//! Transcript message types for the conversation view.
//!
//! A [`Message`] is one turn in the transcript: the user's prompt, a
//! generated code snippet, or an error notice. Messages live only in process
//! memory for the lifetime of a chat session.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Language tag stored on generated messages when the service omits one.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Unique identifier for a message, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub Uuid);

impl MessageId {
    /// Create a new MessageId using UUID v7 (monotonic within the process).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a MessageId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Origin of a message, which also selects how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Prompt typed by the user.
    User,
    /// Code returned by the generation service.
    System,
    /// Notice that a generation attempt failed.
    Error,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::System => write!(f, "system"),
            MessageKind::Error => write!(f, "error"),
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageKind::User),
            "system" => Ok(MessageKind::System),
            "error" => Ok(MessageKind::Error),
            other => Err(format!("invalid message kind: '{other}'")),
        }
    }
}

/// User verdict on a generated snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    #[default]
    Unset,
    Positive,
    Negative,
}

impl Feedback {
    /// Map the boolean sent to the feedback endpoint onto a verdict.
    pub fn from_positive(is_positive: bool) -> Self {
        if is_positive {
            Feedback::Positive
        } else {
            Feedback::Negative
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Unset => write!(f, "unset"),
            Feedback::Positive => write!(f, "positive"),
            Feedback::Negative => write!(f, "negative"),
        }
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub kind: MessageKind,
    pub content: String,
    /// Language tag of `content` (system messages only).
    pub language: Option<String>,
    #[serde(default)]
    pub feedback: Feedback,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn with_kind(kind: MessageKind, content: String, language: Option<String>) -> Self {
        Self {
            id: MessageId::new(),
            kind,
            content,
            language,
            feedback: Feedback::Unset,
            created_at: Utc::now(),
        }
    }

    /// A prompt submitted by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::User, content.into(), None)
    }

    /// Generated code. A missing language falls back to [`DEFAULT_LANGUAGE`].
    pub fn system(content: impl Into<String>, language: Option<String>) -> Self {
        let language = language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        Self::with_kind(MessageKind::System, content.into(), Some(language))
    }

    /// A failed generation attempt.
    pub fn error(content: impl Into<String>) -> Self {
        Self::with_kind(MessageKind::Error, content.into(), None)
    }

    /// Whether this message carries generated code and accepts feedback.
    pub fn is_generated(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Language tag used for labels, `DEFAULT_LANGUAGE` when absent.
    pub fn language_tag(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Creation time as `HH:MM` in the local timezone, for transcript headers.
    pub fn display_time(&self) -> String {
        self.created_at.with_timezone(&Local).format("%H:%M").to_string()
    }
}
