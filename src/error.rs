//! Error types for commi modules using thiserror.

use thiserror::Error;

/// Errors raised while setting up the repository handle or the completion
/// service. Reported once, before any generation attempt.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to open repository at '{path}': {source}")]
    OpenRepository {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error(
        "No API key found. Pass --api-key or set the COMMI_API_KEY (or GEMINI_API_KEY) environment variable"
    )]
    MissingApiKey,

    #[error("Claude Code CLI not found. Install with: npm install -g @anthropic-ai/claude-code")]
    ClaudeNotInstalled,

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from diff retrieval.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Failed to resolve HEAD: {0}")]
    HeadFailed(#[source] git2::Error),

    #[error("Failed to collect diff: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to read repository status: {0}")]
    StatusFailed(#[source] git2::Error),
}

/// Errors from a single completion call.
///
/// These are hard failures. They are never treated as a format rejection
/// and never consume a retry.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Request to {provider} failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned an unreadable response: {detail}")]
    InvalidResponse {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned no text")]
    EmptyResponse { provider: &'static str },

    #[error("Claude Code CLI reported an error: {0}")]
    ExecutionFailed(String),

    #[error("Failed to spawn Claude process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Claude process timed out after {0} seconds")]
    Timeout(u64),

    #[error("Claude CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors from creating the commit.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No staged changes to commit")]
    NoStagedChanges,

    #[error("Failed to stage changes: {0}")]
    StagingFailed(#[source] git2::Error),

    #[error("Failed to commit changes: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from clipboard access.
#[derive(Error, Debug)]
#[error("Failed to copy to clipboard: {0}")]
pub struct ClipboardError(#[source] pub arboard::Error);
