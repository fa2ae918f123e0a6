use std::env;

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Default Gemini model used for every call.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Documents with more pages than this are compressed before analysis.
pub const DEFAULT_PAGE_THRESHOLD: usize = 10;

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub llm: LlmConfig,
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DIGEST_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("DIGEST_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            llm: LlmConfig::from_env_profiled(p),
            pipeline: PipelineConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  llm:       provider={}, model={}, key={}",
            self.llm.provider,
            self.llm.model(),
            if self.llm.google_api_key.is_some() { "set" } else { "(none)" },
        );
        tracing::info!("  pipeline:  page_threshold={}", self.pipeline.page_threshold);
    }
}

// ── LLM (Gemini / Ollama) ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" or "ollama"
    pub provider: String,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
    /// Per-request timeout; `None` leaves the HTTP client default in place.
    pub timeout_secs: Option<u64>,
}

impl LlmConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            provider: profiled_env_or(p, "LLM_PROVIDER", "gemini").to_lowercase(),
            google_api_key: profiled_env_opt(p, "GOOGLE_API_KEY")
                .or_else(|| profiled_env_opt(p, "GEMINI_API_KEY")),
            gemini_model: profiled_env_or(p, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            ollama_url: profiled_env_or(p, "OLLAMA_URL", "http://localhost:11434"),
            ollama_model: profiled_env_or(p, "OLLAMA_MODEL", "llama3.2"),
            timeout_secs: profiled_env_opt(p, "LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()),
        }
    }

    /// Gemini settings with an explicit key, no environment lookup.
    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            provider: "gemini".to_string(),
            google_api_key: Some(api_key.into()),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            ollama_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2".to_string(),
            timeout_secs: None,
        }
    }

    /// Model identifier for the active provider.
    pub fn model(&self) -> &str {
        match self.provider.as_str() {
            "ollama" => &self.ollama_model,
            _ => &self.gemini_model,
        }
    }

    /// Override the model of the active provider.
    pub fn set_model(&mut self, model: impl Into<String>) {
        match self.provider.as_str() {
            "ollama" => self.ollama_model = model.into(),
            _ => self.gemini_model = model.into(),
        }
    }

    /// The Gemini credential, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str, DigestError> {
        self.google_api_key
            .as_deref()
            .ok_or_else(|| DigestError::Config("GOOGLE_API_KEY not found in environment or .env file".into()))
    }

    pub fn is_configured(&self) -> bool {
        match self.provider.as_str() {
            "gemini" => self.google_api_key.is_some(),
            "ollama" => true,
            _ => false,
        }
    }
}

// ── Pipeline ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Page count above which a document is compressed before analysis.
    pub page_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            page_threshold: DEFAULT_PAGE_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            page_threshold: profiled_env_parse(p, "DIGEST_PAGE_THRESHOLD", DEFAULT_PAGE_THRESHOLD),
        }
    }
}
