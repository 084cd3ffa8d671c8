//! commi - generates Git commit messages from diffs with an LLM.
//!
//! # Overview
//!
//! commi reads the staged or working-tree diff, asks a completion provider
//! (Gemini or the Claude Code CLI) for a commit message, and checks the
//! result against a fixed format: a short imperative summary, a blank line,
//! and an optional bulleted body. Non-conforming messages are regenerated a
//! bounded number of times before the last one is used as-is.

pub mod clipboard;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod llm;

// Re-export commonly used types
pub use commit::{GeneratedMessage, GenerationLog, MessageGenerator, TracingLog, is_valid};
pub use config::Settings;
pub use error::{ClipboardError, CommitError, CompletionError, DiffError, InitError};
pub use llm::{CompletionService, Provider};
