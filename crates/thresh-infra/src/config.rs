//! Client configuration loader for Thresh.
//!
//! Reads `config.toml` from the config directory (`~/.thresh/` by default)
//! and deserializes it into [`ClientConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use thresh_types::config::ClientConfig;
use thresh_types::error::ConfigError;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "THRESH_CONFIG_DIR";

/// Resolve the config directory.
///
/// Priority: `THRESH_CONFIG_DIR`, then `~/.thresh`, then `./.thresh`.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".thresh");
    }

    PathBuf::from(".thresh")
}

/// Read and parse `{config_dir}/config.toml`.
///
/// A missing file is not an error and yields the defaults.
pub async fn read_client_config(config_dir: &Path) -> Result<ClientConfig, ConfigError> {
    let config_path = config_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(ClientConfig::default());
        }
        Err(err) => return Err(ConfigError::Read(format!("{}: {err}", config_path.display()))),
    };

    toml::from_str::<ClientConfig>(&content)
        .map_err(|err| ConfigError::Parse(format!("{}: {err}", config_path.display())))
}

/// Load the client configuration, logging and falling back to defaults on error.
pub async fn load_client_config(config_dir: &Path) -> ClientConfig {
    match read_client_config(config_dir).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ClientConfig::default()
        }
    }
}
