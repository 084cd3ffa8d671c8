//! Runtime configuration resolved from CLI arguments and the environment.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::llm::Provider;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["COMMI_API_KEY", "GEMINI_API_KEY"];

/// Environment variable naming the Gemini model.
pub const MODEL_ENV_VAR: &str = "MODEL_NAME";

/// Gemini models the tool knows how to talk to.
pub const SUPPORTED_MODELS: [&str; 3] = ["gemini-1.0-pro", "gemini-1.5-pro", "gemini-1.5-flash"];

/// Model used when none is configured or the configured one is unknown.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Number of regenerations after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: Provider,
    /// Only required by the Gemini provider.
    pub api_key: Option<String>,
    pub model: String,
    pub max_retries: u32,
}

impl Settings {
    /// Merge explicit CLI values with environment fallbacks.
    pub fn resolve(
        provider: Provider,
        api_key: Option<String>,
        model: Option<String>,
        max_retries: Option<u32>,
    ) -> Self {
        Self {
            provider,
            api_key: resolve_api_key(api_key),
            model: resolve_model(model),
            max_retries: max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// An explicit key wins; otherwise the first non-empty env var.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    explicit.filter(|k| !k.trim().is_empty()).or_else(|| {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|v| !v.trim().is_empty())
    })
}

/// An explicit model wins over `MODEL_NAME`; the result is validated.
pub fn resolve_model(explicit: Option<String>) -> String {
    let requested = explicit.or_else(|| env::var(MODEL_ENV_VAR).ok());
    match requested {
        Some(name) => validate_model_name(&name),
        None => DEFAULT_MODEL.to_string(),
    }
}

/// Return the model name if supported, otherwise the default model.
pub fn validate_model_name(name: &str) -> String {
    if SUPPORTED_MODELS.contains(&name) {
        name.to_string()
    } else {
        warn!(
            "Unsupported model '{}', falling back to {}",
            name, DEFAULT_MODEL
        );
        DEFAULT_MODEL.to_string()
    }
}

/// Read a duration in whole seconds from `var`.
///
/// Logs a warning if the variable is set but is not a non-negative integer.
pub(crate) fn duration_from_env(var: &str, default_secs: u64) -> Duration {
    match env::var(var) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}s", var, v, default_secs);
                Duration::from_secs(default_secs)
            }
        },
        _ => Duration::from_secs(default_secs),
    }
}
