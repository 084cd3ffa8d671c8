//! Generate-validate-retry loop for commit messages.

use tracing::{info, warn};

use crate::commit::prompt::build_commit_prompt;
use crate::commit::validate::{self, Violation};
use crate::config::DEFAULT_MAX_RETRIES;
use crate::error::CompletionError;
use crate::llm::CompletionService;

/// Result of a single completion attempt.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// The candidate passed the format check.
    Accepted(String),
    /// The candidate failed the format check; retryable.
    Rejected(String, Violation),
    /// The completion call itself failed; never retried.
    Failed(CompletionError),
}

/// A message produced by [`MessageGenerator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub text: String,
    /// Number of completion calls made.
    pub attempts: u32,
    /// False when retries ran out and `text` is the last, non-conforming
    /// candidate.
    pub conforms: bool,
}

/// Receives one event per attempt.
pub trait GenerationLog: Send + Sync {
    /// A conforming message was produced on `attempt` (1-based).
    fn generated(&self, attempt: u32);
    /// Attempt `attempt` was rejected and another will follow.
    fn rejected(&self, attempt: u32, violation: &Violation);
    /// The last of `attempts` was rejected; it is returned as-is.
    fn exhausted(&self, attempts: u32, violation: &Violation);
}

/// Default log that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl GenerationLog for TracingLog {
    fn generated(&self, attempt: u32) {
        info!(attempt, "Commit message generated successfully");
    }

    fn rejected(&self, attempt: u32, violation: &Violation) {
        warn!(
            attempt,
            reason = %violation,
            "Commit message does not follow the expected format. Regenerating..."
        );
    }

    fn exhausted(&self, attempts: u32, violation: &Violation) {
        warn!(
            attempts,
            reason = %violation,
            "Maximum retries exceeded. Using the last generated message."
        );
    }
}

/// Turns a diff into a commit message through a completion service.
///
/// Holds no per-request state, so one generator can serve any number of
/// `generate` calls; each call owns its own attempt counter.
pub struct MessageGenerator<S, L = TracingLog> {
    service: S,
    max_retries: u32,
    log: L,
}

impl<S: CompletionService> MessageGenerator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            max_retries: DEFAULT_MAX_RETRIES,
            log: TracingLog,
        }
    }
}

impl<S: CompletionService, L: GenerationLog> MessageGenerator<S, L> {
    /// Number of regenerations allowed after the first attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Replace the log sink.
    pub fn with_log<L2: GenerationLog>(self, log: L2) -> MessageGenerator<S, L2> {
        MessageGenerator {
            service: self.service,
            max_retries: self.max_retries,
            log,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Generate a commit message for `diff`.
    ///
    /// Makes at most `max_retries + 1` completion calls. When every candidate
    /// is rejected, the last one is returned unchanged with
    /// `conforms == false`. A failed completion call is returned as an error
    /// straight away.
    pub async fn generate(&self, diff: &str) -> Result<GeneratedMessage, CompletionError> {
        let mut attempt: u32 = 0;

        loop {
            match self.attempt(diff, attempt).await {
                AttemptOutcome::Accepted(text) => {
                    let attempts = attempt.saturating_add(1);
                    self.log.generated(attempts);
                    return Ok(GeneratedMessage {
                        text,
                        attempts,
                        conforms: true,
                    });
                }
                AttemptOutcome::Rejected(text, violation) => {
                    if attempt >= self.max_retries {
                        let attempts = attempt.saturating_add(1);
                        self.log.exhausted(attempts, &violation);
                        return Ok(GeneratedMessage {
                            text,
                            attempts,
                            conforms: false,
                        });
                    }
                    // attempt < max_retries, so this cannot overflow
                    attempt += 1;
                    self.log.rejected(attempt, &violation);
                }
                AttemptOutcome::Failed(err) => return Err(err),
            }
        }
    }

    /// Run one completion call and classify the candidate.
    ///
    /// `attempt` is 0-based; anything past the first carries the corrective
    /// instruction.
    pub async fn attempt(&self, diff: &str, attempt: u32) -> AttemptOutcome {
        let prompt = build_commit_prompt(diff, attempt > 0);

        let candidate = match self.service.complete(&prompt).await {
            Ok(response) => response.trim().to_string(),
            Err(err) => return AttemptOutcome::Failed(err),
        };

        match validate::check(&candidate) {
            Ok(()) => AttemptOutcome::Accepted(candidate),
            Err(violation) => AttemptOutcome::Rejected(candidate, violation),
        }
    }
}
