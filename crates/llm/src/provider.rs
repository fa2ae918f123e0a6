use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-call generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Ask the backend to emit a JSON document instead of free text.
    pub json_response: bool,
}

impl GenerateOptions {
    pub fn text(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
            json_response: false,
        }
    }

    pub fn json(temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            temperature,
            max_output_tokens,
            json_response: true,
        }
    }
}

/// A text-generation backend. One shared instance serves every stage.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a single prompt and return the generated text.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} — {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}
