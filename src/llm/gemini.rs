//! Google Gemini REST client.

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletionService;
use crate::config::duration_from_env;
use crate::error::{CompletionError, InitError};

/// Public Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable to override the API endpoint.
const BASE_URL_ENV_VAR: &str = "COMMI_GEMINI_BASE_URL";

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "COMMI_REQUEST_TIMEOUT";

const PROVIDER: &str = "Gemini";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client against the default (or env-overridden) endpoint.
    ///
    /// The timeout can be configured via `COMMI_REQUEST_TIMEOUT` (seconds).
    pub fn new(api_key: String, model: String) -> Result<Self, InitError> {
        let base_url = env::var(BASE_URL_ENV_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(api_key, model, base_url)
    }

    /// Create a client against an explicit endpoint.
    pub fn with_base_url(
        api_key: String,
        model: String,
        base_url: impl Into<String>,
    ) -> Result<Self, InitError> {
        let client = Client::builder()
            .timeout(duration_from_env(TIMEOUT_ENV_VAR, DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(InitError::HttpClient)?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|source| CompletionError::Transport {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error response body: {e}");
                String::new()
            });
            return Err(CompletionError::Api {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| CompletionError::InvalidResponse {
                    provider: PROVIDER,
                    detail: e.to_string(),
                })?;

        let text = extract_text(parsed).ok_or(CompletionError::EmptyResponse {
            provider: PROVIDER,
        })?;

        debug!(response_len = text.len(), "Received Gemini API response");
        Ok(text)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() { None } else { Some(text) }
}
