//! Conversation logic for the Thresh chat client.
//!
//! Owns the transcript and input state, defines the transport and clipboard
//! traits that thresh-infra implements, and projects the transcript into
//! render blocks. No I/O happens here.

pub mod conversation;
pub mod input;
pub mod store;
pub mod transport;
pub mod view;
