//! Infrastructure implementations for the Thresh chat client.
//!
//! - [`http::HttpGenerationService`]: reqwest client for the generation service
//! - [`clipboard::SystemClipboard`]: arboard-backed clipboard
//! - [`config`]: `config.toml` loading and config directory resolution

pub mod clipboard;
pub mod config;
pub mod http;
