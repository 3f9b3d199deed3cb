//! Render projection of the transcript.
//!
//! `project` maps each message, in store order, to a [`RenderBlock`] the
//! terminal renderer can draw without consulting the store again.
//! [`ScrollTracker`] remembers how much of the transcript is already on
//! screen so only new messages are drawn when the store grows.

use std::ops::Range;

use thresh_types::language::Language;
use thresh_types::message::{Feedback, Message, MessageId, MessageKind};

/// A drawable unit of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderBlock {
    /// Plain text for user prompts and error notices.
    Text {
        number: usize,
        /// Local `HH:MM` the message was created.
        time: String,
        kind: MessageKind,
        content: String,
    },
    /// Generated code with its controls.
    Code {
        number: usize,
        time: String,
        id: MessageId,
        /// Tag as reported by the service, shown verbatim.
        language_label: String,
        /// Highlighter to use; `None` selects the plain-text fallback.
        highlight: Option<Language>,
        content: String,
        thumbs_up_active: bool,
        thumbs_down_active: bool,
    },
}

impl RenderBlock {
    /// Project a single message. `number` is its 1-based transcript position.
    pub fn from_message(number: usize, message: &Message) -> Self {
        match message.kind {
            MessageKind::System => {
                let label = message.language_tag().to_string();
                RenderBlock::Code {
                    number,
                    time: message.display_time(),
                    id: message.id.clone(),
                    highlight: Language::from_tag(&label),
                    language_label: label,
                    content: message.content.clone(),
                    thumbs_up_active: message.feedback == Feedback::Positive,
                    thumbs_down_active: message.feedback == Feedback::Negative,
                }
            }
            kind => RenderBlock::Text {
                number,
                time: message.display_time(),
                kind,
                content: message.content.clone(),
            },
        }
    }

    pub fn number(&self) -> usize {
        match self {
            RenderBlock::Text { number, .. } | RenderBlock::Code { number, .. } => *number,
        }
    }
}

/// Project a slice of the transcript starting at 1-based number `first`.
pub fn project_from(messages: &[Message], first: usize) -> Vec<RenderBlock> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| RenderBlock::from_message(first + i, m))
        .collect()
}

/// Project the whole transcript.
pub fn project(messages: &[Message]) -> Vec<RenderBlock> {
    project_from(messages, 1)
}

/// Tracks how many messages have been drawn.
#[derive(Debug, Default)]
pub struct ScrollTracker {
    rendered: usize,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of messages not yet drawn, marking them as drawn.
    ///
    /// Empty when the transcript length has not changed.
    pub fn take_unrendered(&mut self, len: usize) -> Range<usize> {
        let start = self.rendered.min(len);
        self.rendered = len;
        start..len
    }

    /// Forget what was drawn so the next call covers the whole transcript.
    pub fn reset(&mut self) {
        self.rendered = 0;
    }
}
