//! AI-generated commit messages: prompt, format check and retry loop.

pub mod generator;
pub mod prompt;
pub mod validate;

pub use generator::{AttemptOutcome, GeneratedMessage, GenerationLog, MessageGenerator, TracingLog};
pub use prompt::{CORRECTIVE_INSTRUCTION, REFERENCE_MESSAGE, build_commit_prompt};
pub use validate::{ACCEPTED_VERBS, MAX_LINE_LENGTH, Violation, is_valid};
