pub mod gemini;
pub mod ollama;

use std::sync::Arc;
use std::time::Duration;

use digest_core::config::LlmConfig;

use crate::provider::{LlmError, LlmProvider};

/// Create the appropriate LLM provider based on config.
pub fn create_provider(llm_config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, LlmError> {
    let timeout = llm_config.timeout_secs.map(Duration::from_secs);
    match llm_config.provider.as_str() {
        "gemini" | "google" => {
            let api_key = llm_config
                .require_api_key()
                .map_err(|e| LlmError::NotConfigured(e.to_string()))?
                .to_string();
            let model = llm_config.gemini_model.clone();
            let provider = match timeout {
                Some(t) => gemini::GeminiProvider::with_timeout(api_key, model, t)?,
                None => gemini::GeminiProvider::new(api_key, model),
            };
            Ok(Arc::new(provider))
        }
        "ollama" => {
            let url = llm_config.ollama_url.clone();
            let model = llm_config.ollama_model.clone();
            let provider = match timeout {
                Some(t) => ollama::OllamaProvider::with_timeout(url, model, t)?,
                None => ollama::OllamaProvider::new(url, model),
            };
            Ok(Arc::new(provider))
        }
        other => Err(LlmError::NotConfigured(format!(
            "unknown LLM provider: '{}'",
            other
        ))),
    }
}
