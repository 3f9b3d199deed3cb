//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` to provide async line reading with
//! proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C) signals. Output
//! written through the returned `SharedWriter` appears above the prompt.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a line (untrimmed).
    Line(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler wrapping rustyline_async.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given initial prompt.
    ///
    /// Submitted lines are not echoed; the transcript renders them instead.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (mut rl, stdout) = Readline::new(prompt)?;
        rl.should_print_line_on(false, false);
        Ok((Self { rl }, stdout))
    }

    /// Update the prompt displayed to the user.
    pub fn update_prompt(&mut self, prompt: &str) {
        let _ = self.rl.update_prompt(prompt);
    }

    /// Read a line of input.
    ///
    /// Cancel-safe: the partially typed line survives when this future is
    /// dropped inside `tokio::select!`.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if !line.trim().is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(err) => {
                tracing::debug!("readline error: {err}");
                InputEvent::Eof
            }
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }

    /// Restore the terminal before exiting.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}
