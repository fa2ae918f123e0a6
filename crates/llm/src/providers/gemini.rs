use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::provider::{GenerateOptions, LlmError, LlmProvider};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    /// Same as `new`, with a request timeout applied to every call.
    pub fn with_timeout(api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the request body for the Gemini generateContent API.
    fn build_request_body(prompt: &str, options: &GenerateOptions) -> serde_json::Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "temperature": options.temperature,
                "maxOutputTokens": options.max_output_tokens,
            },
        });

        if options.json_response {
            body["generationConfig"]["responseMimeType"] = json!("application/json");
        }

        body
    }

    /// Concatenate the text parts of the first candidate.
    fn parse_response(resp: &serde_json::Value) -> Result<String, LlmError> {
        let parts = resp["candidates"][0]["content"]["parts"]
            .as_array()
            .ok_or_else(|| {
                let reason = resp["promptFeedback"]["blockReason"]
                    .as_str()
                    .or_else(|| resp["candidates"][0]["finishReason"].as_str())
                    .unwrap_or("no candidates returned");
                LlmError::ParseError(format!(
                    "missing candidates[0].content.parts ({reason})"
                ))
            })?;

        let text: String = parts
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect();

        if text.is_empty() {
            return Err(LlmError::ParseError("response contained no text parts".into()));
        }
        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = Self::build_request_body(prompt, options);

        debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            json = options.json_response,
            "Gemini request"
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let resp: serde_json::Value = response.json().await?;
        Self::parse_response(&resp)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_structure() {
        let body = GeminiProvider::build_request_body("Summarize this", &GenerateOptions::text(0.3, 6000));

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "Summarize this");

        let temp = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temp - 0.3).abs() < 1e-6, "temperature should be ~0.3, got {temp}");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 6000);

        // Free-text requests don't force a MIME type
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn test_request_body_json_mode() {
        let body = GeminiProvider::build_request_body("Themes?", &GenerateOptions::json(0.2, 4000));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 4000);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let resp = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "# Intro" }, { "text": "duction" }] },
                "finishReason": "STOP"
            }]
        });
        assert_eq!(GeminiProvider::parse_response(&resp).unwrap(), "# Introduction");
    }

    #[test]
    fn test_parse_response_blocked() {
        let resp = json!({ "promptFeedback": { "blockReason": "SAFETY" } });
        let err = GeminiProvider::parse_response(&resp).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_base_url_override() {
        let provider = GeminiProvider::new("k".into(), "gemini-2.5-flash".into())
            .with_base_url("http://localhost:8080/v1beta/");
        assert_eq!(provider.base_url, "http://localhost:8080/v1beta");
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }
}
