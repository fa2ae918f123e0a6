use std::sync::Arc;

use digest_core::config::PipelineConfig;
use digest_core::{Document, SummaryRequest, ThemeAnalysis};
use tracing::info;

use crate::provider::LlmProvider;
use crate::router::{DocumentRouter, RoutedText};
use crate::summary::SummaryGenerator;
use crate::themes::ThemeAnalyzer;

/// Result of a full run. `summary` is always populated: when generation
/// fails it holds the error text and `summary_failed` is set.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub routed: RoutedText,
    pub analysis: ThemeAnalysis,
    /// The request as sent, with subtopics taken from the analysis.
    pub request: SummaryRequest,
    pub summary: String,
    pub summary_failed: bool,
}

/// Route → analyze → summarize, one model call at a time.
pub struct ReportPipeline {
    router: DocumentRouter,
    analyzer: ThemeAnalyzer,
    generator: SummaryGenerator,
}

impl ReportPipeline {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &PipelineConfig) -> Self {
        Self {
            router: DocumentRouter::new(provider.clone(), config.page_threshold),
            analyzer: ThemeAnalyzer::new(provider.clone()),
            generator: SummaryGenerator::new(provider),
        }
    }

    pub fn router(&self) -> &DocumentRouter {
        &self.router
    }

    pub fn analyzer(&self) -> &ThemeAnalyzer {
        &self.analyzer
    }

    pub fn generator(&self) -> &SummaryGenerator {
        &self.generator
    }

    /// Summarize `text`; a generation failure becomes the summary content.
    pub async fn summarize(&self, text: &str, request: &SummaryRequest) -> (String, bool) {
        match self.generator.generate(text, request).await {
            Ok(summary) => (summary, false),
            Err(e) => {
                tracing::error!(error = %e, "Summary generation failed");
                (e.as_content(), true)
            }
        }
    }

    /// Run every stage. `request.subtopics` is replaced by the analyzer's
    /// suggestions; the other fields are the caller's choices.
    pub async fn run(&self, document: &Document, request: SummaryRequest) -> PipelineOutcome {
        let routed = self.router.route(document).await;
        let analysis = self.analyzer.analyze(&routed.text).await;

        let request = SummaryRequest {
            subtopics: analysis.suggested_subtopics.clone(),
            ..request
        }
        .normalized();

        let (summary, summary_failed) = self.summarize(&routed.text, &request).await;

        info!(
            source = %document.source,
            pages = document.page_count,
            route = ?routed.route,
            summary_chars = summary.len(),
            summary_failed,
            "Pipeline finished"
        );

        PipelineOutcome {
            routed,
            analysis,
            request,
            summary,
            summary_failed,
        }
    }
}
