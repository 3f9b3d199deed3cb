//! Thresh CLI entry point.
//!
//! Binary name: `thresh`
//!
//! Parses CLI arguments, resolves configuration (flags and environment over
//! `config.toml` over defaults), then opens the conversation view or runs a
//! one-shot generation.

mod cli;

use std::sync::Arc;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use thresh_infra::clipboard::SystemClipboard;
use thresh_infra::config::{load_client_config, resolve_config_dir};
use thresh_infra::http::HttpGenerationService;
use thresh_types::config::ClientConfig;

use cli::chat::renderer::ChatRenderer;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,thresh=debug,thresh_core=debug,thresh_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Shell completions don't need configuration
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "thresh", &mut std::io::stdout());
        return Ok(());
    }

    let config_dir = resolve_config_dir();
    let file_config = load_client_config(&config_dir).await;
    let config = ClientConfig {
        api_url: cli.api_url.clone().unwrap_or(file_config.api_url),
        theme: cli.theme.clone().unwrap_or(file_config.theme),
    };
    tracing::debug!(api_url = %config.api_url, theme = %config.theme, "configuration resolved");

    let service = HttpGenerationService::new(config.api_url.clone())?;
    let renderer = ChatRenderer::new(&config.theme);

    match cli.command {
        None | Some(Commands::Chat) => {
            let mut clipboard = SystemClipboard::new();
            cli::chat::loop_runner::run_chat_loop(
                Arc::new(service),
                &mut clipboard,
                &renderer,
                &config.api_url,
            )
            .await?;
        }
        Some(Commands::Generate { prompt, json }) => {
            cli::generate::generate_once(&service, &renderer, &prompt, json).await?;
        }
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    }

    Ok(())
}
