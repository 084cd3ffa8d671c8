//! Claude Code CLI spawning.

use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tokio::time::timeout;

use super::CompletionService;
use crate::config::duration_from_env;
use crate::error::{CompletionError, InitError};

/// Default timeout for Claude subprocess execution (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "COMMI_CLAUDE_TIMEOUT";

const PROVIDER: &str = "Claude";

/// Check if Claude Code CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection.
pub async fn check_claude_installed() -> Result<(), InitError> {
    if which::which("claude").is_err() {
        return Err(InitError::ClaudeNotInstalled);
    }

    // Verify it actually runs
    let version_check = Command::new("claude")
        .arg("--version")
        .output()
        .await
        .map_err(|_| InitError::ClaudeNotInstalled)?;

    if !version_check.status.success() {
        return Err(InitError::ClaudeNotInstalled);
    }

    Ok(())
}

/// Claude CLI JSON envelope when using --output-format json
#[derive(Deserialize)]
struct ClaudeCliResponse {
    result: String,
    #[serde(default)]
    is_error: bool,
}

/// Runs `claude -p <prompt> --output-format json` per completion.
pub struct ClaudeCli {
    program: OsString,
    timeout: Duration,
}

impl ClaudeCli {
    /// Use the `claude` binary from `PATH`.
    ///
    /// The subprocess timeout defaults to 300 seconds and can be configured
    /// via the `COMMI_CLAUDE_TIMEOUT` environment variable.
    pub fn new() -> Self {
        Self {
            program: OsString::from("claude"),
            timeout: duration_from_env(TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Use a different executable, e.g. a wrapper script.
    pub fn with_program(program: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for ClaudeCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionService for ClaudeCli {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let timeout_secs = self.timeout.as_secs();

        let output = timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("-p")
                .arg(prompt)
                .arg("--output-format")
                .arg("json")
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| CompletionError::Timeout(timeout_secs))?
        .map_err(CompletionError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(CompletionError::NonZeroExit { code, stderr });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_claude_response(&stdout)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

/// Unwrap the CLI envelope; plain text output is passed through as-is.
fn parse_claude_response(response: &str) -> Result<String, CompletionError> {
    let text = match serde_json::from_str::<ClaudeCliResponse>(response) {
        Ok(envelope) if envelope.is_error => {
            return Err(CompletionError::ExecutionFailed(envelope.result));
        }
        Ok(envelope) => envelope.result,
        Err(_) => response.to_string(),
    };

    if text.trim().is_empty() {
        return Err(CompletionError::EmptyResponse { provider: PROVIDER });
    }
    Ok(text)
}
