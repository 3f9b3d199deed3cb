//! In-memory transcript.
//!
//! Append-only, in display order. The only in-place mutation is the
//! `feedback` field of a generated message, matched by id.

use thresh_types::error::StoreError;
use thresh_types::message::{Feedback, Message, MessageId, MessageKind};

#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        debug_assert!(self.get(&message.id).is_none(), "duplicate message id");
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| &m.id == id)
    }

    /// Look up by 1-based transcript number.
    pub fn nth(&self, number: usize) -> Option<&Message> {
        number.checked_sub(1).and_then(|i| self.messages.get(i))
    }

    /// 1-based transcript number of a message.
    pub fn number_of(&self, id: &MessageId) -> Option<usize> {
        self.messages.iter().position(|m| &m.id == id).map(|i| i + 1)
    }

    /// The most recent generated snippet.
    pub fn latest_system(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.kind == MessageKind::System)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Overwrite the feedback of a generated message.
    pub fn set_feedback(&mut self, id: &MessageId, feedback: Feedback) -> Result<&Message, StoreError> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or(StoreError::NotFound)?;
        if message.kind != MessageKind::System {
            return Err(StoreError::NotGenerated(id.to_string()));
        }
        message.feedback = feedback;
        Ok(message)
    }
}
