//! Client configuration types.
//!
//! `ClientConfig` represents the optional `config.toml` in the Thresh config
//! directory. Every field has a default so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Generation service address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Highlighting theme used when nothing else is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the generation service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Syntect theme name for code blocks.
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            theme: default_theme(),
        }
    }
}
