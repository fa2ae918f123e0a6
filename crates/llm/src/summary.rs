use std::sync::Arc;

use digest_core::{BodyStyle, SummaryRequest};
use tracing::info;

use crate::prompt::{self, SUMMARY_TEMPLATE};
use crate::provider::{GenerateOptions, LlmError, LlmProvider};

const SUMMARY_OPTIONS: GenerateOptions = GenerateOptions {
    temperature: 0.3,
    max_output_tokens: 6000,
    json_response: false,
};

const KEY_FINDINGS: &str = "\
For key_findings style:
- Each bullet should follow: Key Insight + Supporting Evidence + Business Implication
- Focus on actionable insights and strategic value
- Example: \"• Customer retention decreased 15% (Q3 data) → indicating need for enhanced loyalty programs\"";

const PROS_CONS: &str = "\
For pros_cons style:
- Alternate between **Pros** and **Cons** with clear justification
- Present balanced perspective with evidence
- Example: \"• **Pro:** Revenue increased 12% due to new product launch **Con:** Operating costs rose 8% from expanded infrastructure\"";

const RISKS_MITIGATIONS: &str = "\
For risks_mitigations style:
- Each bullet: Risk Description → Likelihood (High/Medium/Low) → Impact → Specific Mitigation
- Focus on actionable risk management
- Example: \"• Supply chain disruption → High likelihood → $2M potential loss → Establish secondary supplier agreements\"";

const METRICS_TRENDS: &str = "\
For metrics_trends style:
- Each bullet: Metric Name → Current Value → Change/Trend → Key Driver
- Include quantitative data and trend analysis
- Example: \"• Customer Acquisition Cost → $150 → 25% increase YoY → driven by competitive digital marketing landscape\"";

/// Guidance block for a body style.
pub fn style_instructions(style: BodyStyle) -> &'static str {
    match style {
        BodyStyle::KeyFindings => KEY_FINDINGS,
        BodyStyle::ProsCons => PROS_CONS,
        BodyStyle::RisksMitigations => RISKS_MITIGATIONS,
        BodyStyle::MetricsTrends => METRICS_TRENDS,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("{0}")]
    Llm(#[from] LlmError),
}

impl SummaryError {
    /// The text written in place of a summary when generation fails.
    pub fn as_content(&self) -> String {
        format!("Error generating summary: {}", self)
    }
}

/// Markdown outline of the body: one `##` section per subtopic with the
/// requested number of placeholder bullets.
fn body_skeleton(subtopics: &[String], bullets: usize) -> String {
    subtopics
        .iter()
        .map(|name| {
            let mut section = format!("## {name}\n");
            for i in 1..=bullets {
                section.push_str(&format!("- Bullet {i}\n"));
            }
            section
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the style-specific prompt and asks the model for the final
/// Introduction / Body / Conclusion summary.
pub struct SummaryGenerator {
    provider: Arc<dyn LlmProvider>,
}

impl SummaryGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn build_prompt(&self, text: &str, request: &SummaryRequest) -> String {
        let subtopics = request.subtopics_to_use();
        let num_subtopics = request.num_subtopics.to_string();
        let bullets = request.bullets_per_subtopic.to_string();
        let subtopic_list = format!("{:?}", subtopics);
        let skeleton = body_skeleton(subtopics, request.bullets_per_subtopic);

        prompt::render(
            SUMMARY_TEMPLATE,
            &[
                ("audience", request.audience.as_str()),
                ("tone", request.tone.as_str()),
                ("num_subtopics", num_subtopics.as_str()),
                ("bullets_per_subtopic", bullets.as_str()),
                ("subtopics", subtopic_list.as_str()),
                ("body_style", request.body_style.as_str()),
                ("style_instructions", style_instructions(request.body_style)),
                ("body_skeleton", skeleton.as_str()),
            ],
            text,
        )
    }

    /// Exactly one request; the model's markdown is returned verbatim.
    pub async fn generate(&self, text: &str, request: &SummaryRequest) -> Result<String, SummaryError> {
        let request = request.clone().normalized();
        let prompt = self.build_prompt(text, &request);

        info!(
            audience = %request.audience,
            tone = %request.tone,
            style = %request.body_style,
            subtopics = request.subtopics_to_use().len(),
            bullets = request.bullets_per_subtopic,
            "Generating summary"
        );

        Ok(self.provider.generate(&prompt, &SUMMARY_OPTIONS).await?)
    }
}
