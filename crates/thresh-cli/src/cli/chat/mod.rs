//! Interactive conversation view.
//!
//! Prompts go to the generation service, generated code is rendered with
//! syntax highlighting, and snippets can be copied or rated with slash
//! commands. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
