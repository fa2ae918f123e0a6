use std::sync::Arc;

use digest_core::ThemeAnalysis;
use tracing::{debug, info, warn};

use crate::json::extract_json;
use crate::prompt::{self, THEMES_TEMPLATE};
use crate::provider::{GenerateOptions, LlmError, LlmProvider};

const THEME_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: 0.2,
    max_output_tokens: 4000,
    json_response: true,
};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("invalid theme analysis: {reason}")]
    InvalidResponse { reason: String, raw_response: String },
}

/// Ranks the themes of a document and suggests subtopics for its summary.
pub struct ThemeAnalyzer {
    provider: Arc<dyn LlmProvider>,
}

impl ThemeAnalyzer {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    /// Analyze `text`, substituting [`ThemeAnalysis::fallback`] on any failure.
    pub async fn analyze(&self, text: &str) -> ThemeAnalysis {
        match self.try_analyze(text).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!(error = %e, "Theme analysis failed, using default themes");
                ThemeAnalysis::fallback()
            }
        }
    }

    /// One JSON-mode request; the parsed result is used exactly as returned.
    pub async fn try_analyze(&self, text: &str) -> Result<ThemeAnalysis, AnalysisError> {
        let request = prompt::render(THEMES_TEMPLATE, &[], text);
        let response = self.provider.generate(&request, &THEME_OPTIONS).await?;

        debug!("Theme analysis response: {}", response);

        let analysis: ThemeAnalysis =
            serde_json::from_str(extract_json(&response)).map_err(|e| AnalysisError::InvalidResponse {
                reason: e.to_string(),
                raw_response: response.clone(),
            })?;

        info!(
            themes = analysis.themes.len(),
            subtopics = analysis.suggested_subtopics.len(),
            "Themes analyzed"
        );
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::ScriptedProvider;
    use digest_core::Theme;

    async fn analyze_with(reply: Result<&str, &str>) -> (ThemeAnalysis, Arc<ScriptedProvider>) {
        let provider = match reply {
            Ok(text) => ScriptedProvider::new().reply(text),
            Err(msg) => ScriptedProvider::new().fail(msg),
        };
        let provider = Arc::new(provider);
        let analysis = ThemeAnalyzer::new(provider.clone()).analyze("Quarterly report").await;
        (analysis, provider)
    }

    #[tokio::test]
    async fn parses_model_json_as_is() {
        let reply = r#"{
            "themes": [
                {"name": "Revenue Growth", "importance": 0.95},
                {"name": "Cost Pressure", "importance": 1.7}
            ],
            "suggested_subtopics": ["Financials", "Operations", "Outlook", "Risks"]
        }"#;
        let (analysis, provider) = analyze_with(Ok(reply)).await;

        assert_eq!(
            analysis.themes,
            vec![
                Theme { name: "Revenue Growth".into(), importance: 0.95 },
                // out-of-range scores are kept
                Theme { name: "Cost Pressure".into(), importance: 1.7 },
            ]
        );
        assert_eq!(analysis.suggested_subtopics, vec!["Financials", "Operations", "Outlook", "Risks"]);

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].options.json_response);
        assert!(calls[0].prompt.contains("<<<\nQuarterly report\n>>>"));
    }

    #[tokio::test]
    async fn fenced_json_is_accepted() {
        let reply = "```json\n{\"themes\": [], \"suggested_subtopics\": [\"A\"]}\n```";
        let (analysis, _) = analyze_with(Ok(reply)).await;
        assert!(analysis.themes.is_empty());
        assert_eq!(analysis.suggested_subtopics, vec!["A"]);
    }

    #[tokio::test]
    async fn invalid_json_yields_fallback() {
        let (analysis, _) = analyze_with(Ok("I could not find themes, sorry.")).await;
        assert_eq!(analysis, ThemeAnalysis::fallback());
    }

    #[tokio::test]
    async fn missing_fields_yield_fallback() {
        let (analysis, _) = analyze_with(Ok(r#"{"themes": [{"name": "Only Themes", "importance": 0.5}]}"#)).await;
        assert_eq!(analysis, ThemeAnalysis::fallback());

        let (analysis, _) = analyze_with(Ok(r#"{"themes": [{"name": "No score"}], "suggested_subtopics": []}"#)).await;
        assert_eq!(analysis, ThemeAnalysis::fallback());
    }

    #[tokio::test]
    async fn provider_error_yields_fallback() {
        let (analysis, _) = analyze_with(Err("connection reset")).await;
        assert_eq!(analysis, ThemeAnalysis::fallback());
        assert_eq!(analysis.themes[0].name, "General Analysis");
        assert_eq!(analysis.themes[0].importance, 0.8);
    }

    #[tokio::test]
    async fn try_analyze_surfaces_raw_response() {
        let provider = Arc::new(ScriptedProvider::new().reply("nope"));
        let err = ThemeAnalyzer::new(provider).try_analyze("x").await.unwrap_err();
        match err {
            AnalysisError::InvalidResponse { raw_response, .. } => assert_eq!(raw_response, "nope"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
