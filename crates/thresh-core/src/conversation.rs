//! Conversation state and the request lifecycle.
//!
//! [`Conversation`] is the single owned state object for a chat session. It
//! is mutated only by the event loop that owns it; network calls run
//! elsewhere and hand their results back through `complete_generation` and
//! `complete_feedback`.
//!
//! The async helpers at the bottom (`generate`, `send_feedback`) wrap a
//! [`GenerationService`] call with logging so callers can spawn them as-is.

use thresh_types::error::{StoreError, TransportError};
use thresh_types::generation::GeneratedCode;
use thresh_types::message::{Feedback, Message, MessageId};

use crate::input::InputController;
use crate::store::MessageStore;
use crate::transport::{ClipboardSink, GenerationService};
use crate::view::{self, RenderBlock, ScrollTracker};

/// Transcript text for any failed generation.
pub const GENERATION_FAILED_TEXT: &str = "Failed to generate response. Please try again.";

/// Notice shown when a feedback submission fails.
pub const FEEDBACK_FAILED_TEXT: &str = "Failed to submit feedback. Please try again.";

/// Notice shown after a successful copy.
pub const COPIED_TEXT: &str = "Code copied to clipboard!";

/// Errors raised before any network call is made.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no generated code in this conversation yet")]
    NothingGenerated,
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient, non-blocking message for the user.
///
/// Notices are shown once and are not part of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// An accepted submission waiting for the generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingGeneration {
    pub prompt: String,
}

/// A validated feedback action waiting for the feedback call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFeedback {
    pub message_id: MessageId,
    pub is_positive: bool,
}

/// Owned state of the conversation view.
#[derive(Debug, Default)]
pub struct Conversation {
    store: MessageStore,
    input: InputController,
    scroll: ScrollTracker,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn is_busy(&self) -> bool {
        self.input.is_busy()
    }

    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.input.update_draft(text);
    }

    /// Submit the current draft.
    ///
    /// On acceptance the user message is appended immediately and the prompt
    /// is returned for the transport. Returns `None` (and changes nothing)
    /// for a blank draft or while a generation is in flight.
    pub fn submit(&mut self) -> Option<PendingGeneration> {
        let prompt = self.input.submit()?;
        self.store.push(Message::user(prompt.clone()));
        tracing::debug!(len = self.store.len(), "prompt accepted");
        Some(PendingGeneration { prompt })
    }

    /// Apply the settled generation call.
    ///
    /// Appends exactly one message: generated code on success, the fixed
    /// failure text otherwise. The in-flight flag is cleared either way.
    pub fn complete_generation(&mut self, result: Result<GeneratedCode, TransportError>) -> &Message {
        self.input.settle();
        let message = match result {
            Ok(code) => Message::system(code.content, Some(code.language)),
            Err(err) => {
                tracing::debug!("generation settled with error: {err}");
                Message::error(GENERATION_FAILED_TEXT)
            }
        };
        self.store.push(message)
    }

    /// Check a feedback action against the transcript before sending it.
    pub fn begin_feedback(
        &self,
        message_id: &MessageId,
        is_positive: bool,
    ) -> Result<PendingFeedback, ConversationError> {
        let message = self.store.get(message_id).ok_or(StoreError::NotFound)?;
        if !message.is_generated() {
            return Err(StoreError::NotGenerated(message_id.to_string()).into());
        }
        Ok(PendingFeedback {
            message_id: message_id.clone(),
            is_positive,
        })
    }

    /// Apply a settled feedback call.
    ///
    /// Success overwrites the message's feedback (last completion wins).
    /// Failure leaves the message untouched and yields a notice.
    pub fn complete_feedback(
        &mut self,
        pending: &PendingFeedback,
        result: Result<(), TransportError>,
    ) -> Result<&Message, Notice> {
        if let Err(err) = result {
            tracing::debug!(message_id = %pending.message_id, "feedback settled with error: {err}");
            return Err(Notice::error(FEEDBACK_FAILED_TEXT));
        }
        self.store
            .set_feedback(&pending.message_id, Feedback::from_positive(pending.is_positive))
            .map_err(|err| Notice::error(err.to_string()))
    }

    /// Resolve a user-facing target: a transcript number, or the latest snippet.
    pub fn resolve_generated(&self, number: Option<usize>) -> Result<&Message, ConversationError> {
        let message = match number {
            Some(n) => self.store.nth(n).ok_or(StoreError::NotFound)?,
            None => self
                .store
                .latest_system()
                .ok_or(ConversationError::NothingGenerated)?,
        };
        if !message.is_generated() {
            return Err(StoreError::NotGenerated(message.id.to_string()).into());
        }
        Ok(message)
    }

    /// Blocks for messages added since the last call.
    pub fn take_new_blocks(&mut self) -> Vec<RenderBlock> {
        let range = self.scroll.take_unrendered(self.store.len());
        let first = range.start + 1;
        view::project_from(&self.store.as_slice()[range], first)
    }

    /// Blocks for the whole transcript; marks everything as drawn.
    pub fn redraw(&mut self) -> Vec<RenderBlock> {
        self.scroll.reset();
        self.take_new_blocks()
    }
}

/// Run one generation call, logging the outcome.
pub async fn generate<S: GenerationService>(
    service: &S,
    pending: &PendingGeneration,
) -> Result<GeneratedCode, TransportError> {
    let result = service.request_generation(&pending.prompt).await;
    match &result {
        Ok(code) => tracing::info!(language = %code.language, bytes = code.content.len(), "generation succeeded"),
        Err(err) => tracing::warn!("Failed to generate response: {err}"),
    }
    result
}

/// Run one feedback call, logging the outcome.
pub async fn send_feedback<S: GenerationService>(
    service: &S,
    pending: &PendingFeedback,
) -> Result<(), TransportError> {
    let result = service
        .submit_feedback(&pending.message_id, pending.is_positive)
        .await;
    match &result {
        Ok(()) => tracing::info!(message_id = %pending.message_id, positive = pending.is_positive, "feedback recorded"),
        Err(err) => tracing::warn!(message_id = %pending.message_id, "Failed to submit feedback: {err}"),
    }
    result
}

/// Copy a snippet to the clipboard.
///
/// Failures are logged only; the returned notice is `None` in that case.
pub fn copy_to_clipboard<C: ClipboardSink + ?Sized>(clipboard: &mut C, content: &str) -> Option<Notice> {
    match clipboard.set_text(content) {
        Ok(()) => Some(Notice::info(COPIED_TEXT)),
        Err(err) => {
            tracing::warn!("Failed to copy code: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use thresh_types::error::ClipboardError;
    use thresh_types::message::{DEFAULT_LANGUAGE, MessageKind};

    /// Scripted service that counts calls.
    struct FakeService {
        generation: Result<GeneratedCode, TransportError>,
        feedback: Result<(), TransportError>,
        generation_calls: AtomicUsize,
        feedback_calls: Mutex<Vec<(MessageId, bool)>>,
    }

    impl FakeService {
        fn ok(code: &str, language: Option<&str>) -> Self {
            Self {
                generation: Ok(GeneratedCode::new(code, language.map(str::to_string))),
                feedback: Ok(()),
                generation_calls: AtomicUsize::new(0),
                feedback_calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                generation: Err(TransportError::GenerationFailed("HTTP 500".into())),
                feedback: Err(TransportError::FeedbackFailed("HTTP 500".into())),
                generation_calls: AtomicUsize::new(0),
                feedback_calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl GenerationService for FakeService {
        async fn request_generation(&self, _prompt: &str) -> Result<GeneratedCode, TransportError> {
            self.generation_calls.fetch_add(1, Ordering::SeqCst);
            self.generation.clone()
        }

        async fn submit_feedback(&self, message_id: &MessageId, is_positive: bool) -> Result<(), TransportError> {
            self.feedback_calls
                .lock()
                .unwrap()
                .push((message_id.clone(), is_positive));
            self.feedback.clone()
        }
    }

    /// Submit the draft and, if accepted, run the call to completion.
    async fn round_trip(conv: &mut Conversation, service: &FakeService, text: &str) {
        conv.update_draft(text);
        if let Some(pending) = conv.submit() {
            let result = generate(service, &pending).await;
            conv.complete_generation(result);
        }
    }

    #[tokio::test]
    async fn test_round_trip_adds_two_messages() {
        let service = FakeService::ok("print(1)", Some("python"));
        let mut conv = Conversation::new();

        for i in 1..=3 {
            round_trip(&mut conv, &service, "print one").await;
            assert_eq!(conv.store().len(), i * 2);
            assert!(!conv.is_busy());
        }
        assert_eq!(service.generation_calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_submit_appends_user_message_before_settling() {
        let mut conv = Conversation::new();
        conv.update_draft("binary search in rust");
        let pending = conv.submit().unwrap();

        assert_eq!(pending.prompt, "binary search in rust");
        assert_eq!(conv.store().len(), 1);
        assert_eq!(conv.store().nth(1).unwrap().kind, MessageKind::User);
        assert_eq!(conv.input().draft(), "");
        assert!(conv.is_busy());
    }

    #[tokio::test]
    async fn test_submit_while_in_flight_is_noop() {
        let service = FakeService::ok("x", None);
        let mut conv = Conversation::new();
        conv.update_draft("first");
        let pending = conv.submit().unwrap();

        conv.update_draft("second");
        assert_eq!(conv.submit(), None);
        assert_eq!(conv.store().len(), 1);

        let result = generate(&service, &pending).await;
        conv.complete_generation(result);
        assert_eq!(service.generation_calls.load(Ordering::SeqCst), 1);
        assert_eq!(conv.store().len(), 2);
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let service = FakeService::ok("x", None);
        let mut conv = Conversation::new();
        round_trip(&mut conv, &service, "   ").await;
        round_trip(&mut conv, &service, "").await;
        assert!(conv.store().is_empty());
        assert_eq!(service.generation_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_success_yields_system_message() {
        let service = FakeService::ok("print(1)", Some("python"));
        let mut conv = Conversation::new();
        round_trip(&mut conv, &service, "print one").await;

        let msg = conv.store().nth(2).unwrap();
        assert_eq!(msg.kind, MessageKind::System);
        assert_eq!(msg.content, "print(1)");
        assert_eq!(msg.language.as_deref(), Some("python"));
    }

    #[tokio::test]
    async fn test_missing_language_yields_default() {
        let service = FakeService::ok("console.log(1)", None);
        let mut conv = Conversation::new();
        round_trip(&mut conv, &service, "log one").await;
        assert_eq!(conv.store().nth(2).unwrap().language.as_deref(), Some(DEFAULT_LANGUAGE));
    }

    #[tokio::test]
    async fn test_failure_yields_one_error_message() {
        let service = FakeService::failing();
        let mut conv = Conversation::new();
        round_trip(&mut conv, &service, "anything").await;

        assert_eq!(conv.store().len(), 2);
        let msg = conv.store().nth(2).unwrap();
        assert_eq!(msg.kind, MessageKind::Error);
        assert_eq!(msg.content, GENERATION_FAILED_TEXT);
        assert_eq!(conv.store().nth(1).unwrap().kind, MessageKind::User);
        assert!(!conv.is_busy());
    }

    #[test]
    fn test_malformed_response_yields_error_message() {
        let mut conv = Conversation::new();
        conv.update_draft("x");
        conv.submit().unwrap();
        let msg = conv.complete_generation(Err(TransportError::MalformedResponse("missing code".into())));
        assert_eq!(msg.kind, MessageKind::Error);
        assert!(!conv.is_busy());
    }

    #[tokio::test]
    async fn test_feedback_success_sets_positive() {
        let service = FakeService::ok("print(1)", Some("python"));
        let mut conv = Conversation::new();
        round_trip(&mut conv, &service, "print one").await;
        let id = conv.store().latest_system().unwrap().id.clone();

        let pending = conv.begin_feedback(&id, true).unwrap();
        let result = send_feedback(&service, &pending).await;
        let msg = conv.complete_feedback(&pending, result).unwrap();
        assert_eq!(msg.feedback, Feedback::Positive);

        let calls = service.feedback_calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(id, true)]);
    }

    #[tokio::test]
    async fn test_feedback_failure_leaves_message_unchanged() {
        let mut conv = Conversation::new();
        conv.update_draft("x");
        conv.submit().unwrap();
        conv.complete_generation(Ok(GeneratedCode::new("x", None)));
        let id = conv.store().latest_system().unwrap().id.clone();

        let service = FakeService::failing();
        let pending = conv.begin_feedback(&id, true).unwrap();
        let result = send_feedback(&service, &pending).await;
        let notice = conv.complete_feedback(&pending, result).unwrap_err();

        assert_eq!(notice, Notice::error(FEEDBACK_FAILED_TEXT));
        assert_eq!(conv.store().get(&id).unwrap().feedback, Feedback::Unset);
    }

    #[test]
    fn test_feedback_last_completion_wins() {
        let mut conv = Conversation::new();
        conv.update_draft("x");
        conv.submit().unwrap();
        conv.complete_generation(Ok(GeneratedCode::new("x", None)));
        let id = conv.store().latest_system().unwrap().id.clone();

        let up = conv.begin_feedback(&id, true).unwrap();
        let down = conv.begin_feedback(&id, false).unwrap();

        // Issued up then down, but down settles first.
        conv.complete_feedback(&down, Ok(())).unwrap();
        conv.complete_feedback(&up, Ok(())).unwrap();
        assert_eq!(conv.store().get(&id).unwrap().feedback, Feedback::Positive);
    }

    #[test]
    fn test_feedback_rejected_for_user_message() {
        let mut conv = Conversation::new();
        conv.update_draft("x");
        conv.submit().unwrap();
        let id = conv.store().nth(1).unwrap().id.clone();
        assert!(matches!(
            conv.begin_feedback(&id, true),
            Err(ConversationError::Store(StoreError::NotGenerated(_)))
        ));
    }

    #[test]
    fn test_resolve_generated() {
        let mut conv = Conversation::new();
        assert_eq!(
            conv.resolve_generated(None).unwrap_err(),
            ConversationError::NothingGenerated
        );

        conv.update_draft("x");
        conv.submit().unwrap();
        conv.complete_generation(Ok(GeneratedCode::new("a", None)));

        assert_eq!(conv.resolve_generated(None).unwrap().content, "a");
        assert_eq!(conv.resolve_generated(Some(2)).unwrap().content, "a");
        assert!(conv.resolve_generated(Some(1)).is_err());
        assert_eq!(
            conv.resolve_generated(Some(9)).unwrap_err(),
            ConversationError::Store(StoreError::NotFound)
        );
    }

    #[test]
    fn test_take_new_blocks_follows_store_growth() {
        let mut conv = Conversation::new();
        assert!(conv.take_new_blocks().is_empty());

        conv.update_draft("x");
        conv.submit().unwrap();
        let blocks = conv.take_new_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number(), 1);
        assert!(conv.take_new_blocks().is_empty());

        conv.complete_generation(Ok(GeneratedCode::new("a", None)));
        let blocks = conv.take_new_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].number(), 2);

        assert_eq!(conv.redraw().len(), 2);
    }

    struct FakeClipboard {
        fail: bool,
        contents: Option<String>,
    }

    impl ClipboardSink for FakeClipboard {
        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::Failed("denied".into()));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_to_clipboard() {
        let mut ok = FakeClipboard { fail: false, contents: None };
        assert_eq!(copy_to_clipboard(&mut ok, "x = 1"), Some(Notice::info(COPIED_TEXT)));
        assert_eq!(ok.contents.as_deref(), Some("x = 1"));

        let mut denied = FakeClipboard { fail: true, contents: None };
        assert_eq!(copy_to_clipboard(&mut denied, "x = 1"), None);
        assert_eq!(denied.contents, None);
    }
}
