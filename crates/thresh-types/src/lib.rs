//! Shared domain types for the Thresh chat client.
//!
//! Transcript messages, highlighting languages, generation service wire
//! types, client configuration, and the associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod generation;
pub mod language;
pub mod message;
