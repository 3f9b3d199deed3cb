//! Traits for the two external capabilities the conversation talks to.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition). The concrete
//! implementations live in thresh-infra (`HttpGenerationService`,
//! `SystemClipboard`).

use thresh_types::error::{ClipboardError, TransportError};
use thresh_types::generation::GeneratedCode;
use thresh_types::message::MessageId;

/// Client for the remote code-generation service.
///
/// Each call is a single attempt: no retries, no cancellation.
pub trait GenerationService: Send + Sync {
    /// Submit a prompt and receive the generated code.
    ///
    /// Fails with `GenerationFailed` on transport errors or a non-success
    /// status and `MalformedResponse` when the payload lacks `code`.
    fn request_generation(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<GeneratedCode, TransportError>> + Send;

    /// Record a thumbs-up (`true`) or thumbs-down (`false`) for a message.
    fn submit_feedback(
        &self,
        message_id: &MessageId,
        is_positive: bool,
    ) -> impl std::future::Future<Output = Result<(), TransportError>> + Send;
}

/// Write access to the system clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
