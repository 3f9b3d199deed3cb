//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Snippet commands take an optional transcript
//! number; without one they target the latest generated snippet.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Re-render the whole transcript.
    History,
    /// Copy a snippet to the clipboard.
    Copy(Option<usize>),
    /// Thumbs-up (`true`) or thumbs-down (`false`) on a snippet.
    Feedback { positive: bool, target: Option<usize> },
    /// Malformed arguments for a known command.
    Invalid(String),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    let target = |name: &str| -> Result<Option<usize>, ChatCommand> {
        match arg {
            None => Ok(None),
            Some(raw) => raw
                .trim_start_matches('#')
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ChatCommand::Invalid(format!("{name} expects a message number, got '{raw}'"))),
        }
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/clear" | "/cls" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/history" => ChatCommand::History,
        "/copy" | "/cp" => target("/copy").map_or_else(|e| e, ChatCommand::Copy),
        "/up" | "/+1" => target("/up").map_or_else(|e| e, |t| ChatCommand::Feedback {
            positive: true,
            target: t,
        }),
        "/down" | "/-1" => target("/down").map_or_else(|e| e, |t| ChatCommand::Feedback {
            positive: false,
            target: t,
        }),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Help text listing all available commands.
pub fn help_text() -> String {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
        ("/history", "Show the whole transcript"),
        ("/copy [N]", "Copy snippet #N (default: latest) to the clipboard"),
        ("/up [N]", "Thumbs-up snippet #N (default: latest)"),
        ("/down [N]", "Thumbs-down snippet #N (default: latest)"),
    ];

    let mut out = format!("\n  {}\n\n", style("Available commands:").bold());
    for (cmd, desc) in rows {
        out.push_str(&format!("  {:<12} {}\n", style(cmd).cyan(), desc));
    }
    out.push_str(&format!(
        "\n  {}\n",
        style("Ctrl+D to exit. The transcript is not saved.").dim()
    ));
    out
}
