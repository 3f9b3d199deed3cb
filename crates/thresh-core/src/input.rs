//! Draft text and the in-flight flag that gates submission.

/// Holds what the user is typing and whether a generation is outstanding.
#[derive(Debug, Default)]
pub struct InputController {
    draft: String,
    in_flight: bool,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft text. Validation happens at submit time.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether a generation request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Accept the draft for submission.
    ///
    /// Returns `None` without touching any state when the draft is blank or a
    /// submission is already in flight. Otherwise takes the draft, leaving it
    /// empty, and marks a submission as in flight.
    pub fn submit(&mut self) -> Option<String> {
        if self.in_flight || self.draft.trim().is_empty() {
            return None;
        }
        self.in_flight = true;
        Some(std::mem::take(&mut self.draft))
    }

    /// Clear the in-flight flag once the generation call has settled.
    pub fn settle(&mut self) {
        self.in_flight = false;
    }
}
