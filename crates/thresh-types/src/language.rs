//! Languages with a dedicated highlighting capability.
//!
//! Any tag outside this set is rendered through the plain-text fallback.

use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Cpp,
    Rust,
    Java,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::JavaScript,
        Language::Python,
        Language::Cpp,
        Language::Rust,
        Language::Java,
    ];

    /// Resolve a service language tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "javascript" => Some(Language::JavaScript),
            "python" => Some(Language::Python),
            "cpp" => Some(Language::Cpp),
            "rust" => Some(Language::Rust),
            "java" => Some(Language::Java),
            _ => None,
        }
    }

    /// The tag used on the wire.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Cpp => "cpp",
            Language::Rust => "rust",
            Language::Java => "java",
        }
    }

    /// File extension understood by the syntax highlighter.
    pub fn extension(&self) -> &'static str {
        match self {
            Language::JavaScript => "js",
            Language::Python => "py",
            Language::Cpp => "cpp",
            Language::Rust => "rs",
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
