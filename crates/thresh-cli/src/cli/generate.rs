//! One-shot generation: submit a single prompt and print the result.

use console::style;

use thresh_core::conversation::{self, Conversation};
use thresh_core::transport::GenerationService;
use thresh_types::message::MessageKind;

use super::chat::renderer::ChatRenderer;

/// Generate code for `prompt` and print it.
///
/// Goes through the same conversation state as the chat loop, so the output
/// is exactly what the transcript would show. Fails when the prompt is
/// blank or the service call does not produce code.
pub async fn generate_once<S: GenerationService>(
    service: &S,
    renderer: &ChatRenderer,
    prompt: &str,
    json: bool,
) -> anyhow::Result<()> {
    let mut conv = Conversation::new();
    conv.update_draft(prompt);
    let pending = conv
        .submit()
        .ok_or_else(|| anyhow::anyhow!("prompt is empty"))?;

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message("Generating...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = conversation::generate(service, &pending).await;
    spinner.finish_and_clear();

    let failure = result.as_ref().err().map(|e| e.to_string());
    let message = conv.complete_generation(result);

    if json {
        let out = serde_json::json!({
            "id": message.id.to_string(),
            "kind": message.kind,
            "language": message.language,
            "content": message.content,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if message.kind == MessageKind::System {
        let blocks = conv.redraw();
        if let Some(block) = blocks.last() {
            println!("{}", renderer.render_block(block));
        }
    } else {
        eprintln!("  {} {}", style("!").red().bold(), style(&message.content).red());
    }

    match failure {
        Some(reason) => anyhow::bail!(reason),
        None => Ok(()),
    }
}
