//! Completion providers behind a single mockable trait.

pub mod claude;
pub mod gemini;

use std::fmt;

use async_trait::async_trait;
use clap::ValueEnum;

use crate::config::Settings;
use crate::error::{CompletionError, InitError};

pub use claude::{ClaudeCli, check_claude_installed};
pub use gemini::GeminiClient;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[default]
    Gemini,
    Claude,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Claude => "Claude",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single prompt-in, text-out completion call.
///
/// Implementations perform exactly one request per call and never retry;
/// retrying on bad output is the generator's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Provider name used in log output.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<S: CompletionService + ?Sized> CompletionService for Box<S> {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Build the completion service selected by `settings`.
///
/// Fails with [`InitError`] when credentials are missing or the provider
/// cannot be reached locally, before any generation attempt is made.
pub async fn build_service(settings: &Settings) -> Result<Box<dyn CompletionService>, InitError> {
    match settings.provider {
        Provider::Gemini => {
            let api_key = settings.api_key.clone().ok_or(InitError::MissingApiKey)?;
            let client = GeminiClient::new(api_key, settings.model.clone())?;
            Ok(Box::new(client))
        }
        Provider::Claude => {
            check_claude_installed().await?;
            Ok(Box::new(ClaudeCli::new()))
        }
    }
}
