//! Gemini-backed generation capability.
//!
//! Talks to the `generateContent` endpoint of the Generative Language API.
//! One instance carries one system instruction, so each pipeline stage gets
//! its own capability bound to its instruction profile.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::GenerationCapability;
use crate::errors::GenerationError;

/// Configuration for the Gemini generation capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// API base URL (overridable for tests and proxies).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout() -> f64 {
    60.0
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

impl GeminiConfig {
    /// Creates a configuration with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            base_url: default_base_url(),
        }
    }

    /// Reads the configuration from the environment (`GEMINI_API_KEY`).
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY not found in environment"))?;
        Ok(Self::new(api_key))
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// A generation capability backed by a Gemini model.
pub struct GeminiCapability {
    client: Client,
    config: GeminiConfig,
    system_instruction: String,
}

impl GeminiCapability {
    /// Creates a capability with a fixed system instruction.
    pub fn new(
        config: GeminiConfig,
        system_instruction: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            config,
            system_instruction: system_instruction.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

impl std::fmt::Debug for GeminiCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiCapability")
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct UserContent<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<UserContent<'a>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

fn extract_text(response: GenerateResponse) -> Result<String, GenerationError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::MalformedResponse("no candidates".to_string()))?;
    let content = candidate
        .content
        .ok_or_else(|| GenerationError::MalformedResponse("candidate without content".to_string()))?;

    let text: String = content.parts.into_iter().map(|part| part.text).collect();
    if text.is_empty() {
        return Err(GenerationError::MalformedResponse(
            "candidate without text parts".to_string(),
        ));
    }
    Ok(text)
}

#[async_trait]
impl GenerationCapability for GeminiCapability {
    async fn generate(&self, input: &str) -> Result<String, GenerationError> {
        let request = GenerateRequest {
            system_instruction: Content {
                parts: vec![Part {
                    text: &self.system_instruction,
                }],
            },
            contents: vec![UserContent {
                role: "user",
                parts: vec![Part { text: input }],
            }],
        };

        debug!(model = %self.config.model, input_chars = input.len(), "Sending generation request");

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GenerationError::Timeout {
                        seconds: self.config.timeout_seconds,
                    }
                } else {
                    GenerationError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(GenerationError::RateLimited);
        }
        if !status.is_success() {
            return Err(GenerationError::Http {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::MalformedResponse(err.to_string()))?;

        extract_text(body)
    }
}
