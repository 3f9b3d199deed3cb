//! CLI command definitions for the `thresh` binary.
//!
//! Uses clap derive macros for argument parsing. Running `thresh` with no
//! subcommand opens the interactive conversation view.

pub mod chat;
pub mod generate;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Generate code from natural-language prompts.
#[derive(Parser)]
#[command(name = "thresh", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base URL of the generation service.
    #[arg(long, global = true, env = "THRESH_API_URL")]
    pub api_url: Option<String>,

    /// Syntax highlighting theme for code blocks.
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive conversation view (default).
    Chat,

    /// Generate code for a single prompt and print it.
    #[command(alias = "gen")]
    Generate {
        /// What the code should do.
        prompt: String,

        /// Output machine-readable JSON instead of styled text.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["thresh"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from(["thresh", "gen", "fizzbuzz in rust", "--json", "--api-url", "http://gen:9000"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://gen:9000"));
        match cli.command {
            Some(Commands::Generate { prompt, json }) => {
                assert_eq!(prompt, "fizzbuzz in rust");
                assert!(json);
            }
            _ => panic!("expected generate"),
        }
    }
}
