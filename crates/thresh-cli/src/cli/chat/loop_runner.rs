//! Main chat loop orchestration.
//!
//! A single task owns the [`Conversation`] and is its only mutator. Network
//! calls are spawned and report back over a channel; `tokio::select!`
//! multiplexes those completions with keyboard input. Generation requests
//! are serialized by the conversation's in-flight flag, feedback requests
//! are not (the last one to complete wins).

use std::io::Write;
use std::sync::Arc;

use console::style;
use rustyline_async::SharedWriter;
use tokio::sync::mpsc;

use thresh_core::conversation::{self, Conversation, Notice, PendingFeedback};
use thresh_core::transport::{ClipboardSink, GenerationService};
use thresh_types::error::TransportError;
use thresh_types::generation::GeneratedCode;
use thresh_types::message::Feedback;

use super::banner::welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// A settled network call, delivered back to the loop.
#[derive(Debug)]
enum TransportEvent {
    Generation(Result<GeneratedCode, TransportError>),
    Feedback(PendingFeedback, Result<(), TransportError>),
}

fn idle_prompt() -> String {
    format!("  {} ", style("You >").green().bold())
}

fn busy_prompt() -> String {
    format!("  {} ", style("Generating... >").yellow().dim())
}

/// Write a chunk of rendered output above the prompt.
fn emit(out: &mut SharedWriter, text: &str) {
    if text.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}", text.trim_end_matches('\n'));
}

/// Draw whatever the transcript gained since the last draw.
fn emit_new_messages(out: &mut SharedWriter, renderer: &ChatRenderer, conv: &mut Conversation) {
    let blocks = conv.take_new_blocks();
    if !blocks.is_empty() {
        emit(out, &renderer.render_blocks(&blocks));
    }
}

/// Run the interactive conversation view until the user exits.
pub async fn run_chat_loop<S, C>(
    service: Arc<S>,
    clipboard: &mut C,
    renderer: &ChatRenderer,
    api_url: &str,
) -> anyhow::Result<()>
where
    S: GenerationService + 'static,
    C: ClipboardSink + ?Sized,
{
    let (mut chat_input, mut out) = ChatInput::new(idle_prompt())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    emit(&mut out, &welcome_banner(api_url));

    let (tx, mut rx) = mpsc::unbounded_channel::<TransportEvent>();
    let mut conv = Conversation::new();

    loop {
        tokio::select! {
            // --- Branch 1: keyboard input ---
            event = chat_input.read_line() => match event {
                InputEvent::Eof => {
                    emit(&mut out, &format!("\n  {}", style("Session ended.").dim()));
                    break;
                }
                InputEvent::Interrupted => {
                    emit(&mut out, &format!("  {}", style("Press Ctrl+D to exit, or keep chatting.").dim()));
                }
                InputEvent::Line(text) => {
                    if let Some(cmd) = commands::parse(&text) {
                        match cmd {
                            ChatCommand::Help => emit(&mut out, &commands::help_text()),
                            ChatCommand::Clear => chat_input.clear(),
                            ChatCommand::Exit => {
                                emit(&mut out, &format!("\n  {}", style("Session ended.").dim()));
                                break;
                            }
                            ChatCommand::History => {
                                let blocks = conv.redraw();
                                if blocks.is_empty() {
                                    emit(&mut out, &format!("  {}", style("Nothing here yet.").dim()));
                                } else {
                                    emit(&mut out, &renderer.render_blocks(&blocks));
                                }
                            }
                            ChatCommand::Copy(target) => match conv.resolve_generated(target) {
                                Ok(message) => {
                                    if let Some(notice) = conversation::copy_to_clipboard(clipboard, &message.content) {
                                        emit(&mut out, &renderer.render_notice(&notice));
                                    }
                                }
                                Err(err) => emit(&mut out, &renderer.render_notice(&Notice::error(err.to_string()))),
                            },
                            ChatCommand::Feedback { positive, target } => {
                                let pending = conv
                                    .resolve_generated(target)
                                    .and_then(|m| conv.begin_feedback(&m.id, positive));
                                match pending {
                                    Ok(pending) => {
                                        let service = service.clone();
                                        let tx = tx.clone();
                                        tokio::spawn(async move {
                                            let result = conversation::send_feedback(&*service, &pending).await;
                                            let _ = tx.send(TransportEvent::Feedback(pending, result));
                                        });
                                    }
                                    Err(err) => emit(&mut out, &renderer.render_notice(&Notice::error(err.to_string()))),
                                }
                            }
                            ChatCommand::Invalid(reason) => {
                                emit(&mut out, &renderer.render_notice(&Notice::error(reason)));
                            }
                            ChatCommand::Unknown(name) => {
                                emit(&mut out, &format!(
                                    "  {} Unknown command: {}. Type /help for available commands.",
                                    style("?").yellow().bold(),
                                    style(name).dim()
                                ));
                            }
                        }
                        continue;
                    }

                    conv.update_draft(text);
                    let was_busy = conv.is_busy();
                    match conv.submit() {
                        Some(pending) => {
                            emit_new_messages(&mut out, renderer, &mut conv);
                            chat_input.update_prompt(&busy_prompt());
                            let service = service.clone();
                            let tx = tx.clone();
                            tokio::spawn(async move {
                                let result = conversation::generate(&*service, &pending).await;
                                let _ = tx.send(TransportEvent::Generation(result));
                            });
                        }
                        None if was_busy && !conv.input().draft().trim().is_empty() => {
                            emit(&mut out, &format!(
                                "  {}",
                                style("Still generating. Send your prompt again once the response arrives.").dim()
                            ));
                        }
                        None => {}
                    }
                }
            },

            // --- Branch 2: settled network calls ---
            Some(event) = rx.recv() => match event {
                TransportEvent::Generation(result) => {
                    conv.complete_generation(result);
                    emit_new_messages(&mut out, renderer, &mut conv);
                    chat_input.update_prompt(&idle_prompt());
                }
                TransportEvent::Feedback(pending, result) => {
                    let applied = conv
                        .complete_feedback(&pending, result)
                        .map(|m| (m.id.clone(), m.feedback));
                    match applied {
                        Ok((id, feedback)) => {
                            let number = conv.store().number_of(&id).unwrap_or_default();
                            let controls = renderer.render_feedback_controls(
                                number,
                                feedback == Feedback::Positive,
                                feedback == Feedback::Negative,
                            );
                            emit(&mut out, &format!(
                                "  {} Feedback recorded for #{number}\n{controls}",
                                style("*").cyan().bold()
                            ));
                        }
                        Err(notice) => emit(&mut out, &renderer.render_notice(&notice)),
                    }
                }
            },
        }
    }

    chat_input.flush();
    Ok(())
}
