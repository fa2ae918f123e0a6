use std::fmt;

use serde::{Deserialize, Serialize};

/// Subtopics used when the caller (or the theme analyzer) has none to offer.
pub const DEFAULT_SUBTOPICS: [&str; 3] = ["Key Points", "Analysis", "Recommendations"];

/// Default number of body sub-sections and bullets per sub-section.
pub const DEFAULT_COUNT: usize = 3;

/// Upper bound on sub-sections and bullets per sub-section.
pub const MAX_COUNT: usize = 20;

/// Extracted text of a single PDF plus its total page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name the text came from (no directory).
    pub source: String,
    pub text: String,
    /// Total pages in the file, not just the pages that were read.
    pub page_count: usize,
}

impl Document {
    pub fn new(source: impl Into<String>, text: impl Into<String>, page_count: usize) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            page_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

// ── Theme analysis ────────────────────────────────────────────

/// A named topic with the importance score the model assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub importance: f64,
}

/// Ranked themes plus the subtopic names suggested for the summary body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeAnalysis {
    pub themes: Vec<Theme>,
    pub suggested_subtopics: Vec<String>,
}

impl ThemeAnalysis {
    /// The canonical result substituted whenever analysis fails.
    pub fn fallback() -> Self {
        Self {
            themes: vec![Theme {
                name: "General Analysis".to_string(),
                importance: 0.8,
            }],
            suggested_subtopics: DEFAULT_SUBTOPICS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ── Summary parameters ────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    Management,
    TechnicalTeam,
    GeneralAudience,
    #[default]
    Executives,
}

impl Audience {
    pub const ALL: [Audience; 4] = [
        Audience::Management,
        Audience::TechnicalTeam,
        Audience::GeneralAudience,
        Audience::Executives,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Management => "management",
            Audience::TechnicalTeam => "technical team",
            Audience::GeneralAudience => "general audience",
            Audience::Executives => "executives",
        }
    }

    /// Accepts the display label or its snake_case form, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace('_', " ");
        Self::ALL.into_iter().find(|a| a.as_str() == normalized)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Formal,
    Concise,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Neutral, Tone::Formal, Tone::Concise];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Formal => "formal",
            Tone::Concise => "concise",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == normalized)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How bullets in the summary body are structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    #[default]
    KeyFindings,
    ProsCons,
    RisksMitigations,
    MetricsTrends,
}

impl BodyStyle {
    pub const ALL: [BodyStyle; 4] = [
        BodyStyle::KeyFindings,
        BodyStyle::ProsCons,
        BodyStyle::RisksMitigations,
        BodyStyle::MetricsTrends,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyStyle::KeyFindings => "key_findings",
            BodyStyle::ProsCons => "pros_cons",
            BodyStyle::RisksMitigations => "risks_mitigations",
            BodyStyle::MetricsTrends => "metrics_trends",
        }
    }

    /// Unknown names resolve to `KeyFindings` without error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "pros_cons" => BodyStyle::ProsCons,
            "risks_mitigations" => BodyStyle::RisksMitigations,
            "metrics_trends" => BodyStyle::MetricsTrends,
            "key_findings" => BodyStyle::KeyFindings,
            other => {
                tracing::debug!(style = %other, "Unknown body style, using key_findings");
                BodyStyle::KeyFindings
            }
        }
    }

    /// One-line description shown in the style menu.
    pub fn description(&self) -> &'static str {
        match self {
            BodyStyle::KeyFindings => "Key Insight + Evidence + Implication",
            BodyStyle::ProsCons => "Alternating Pros/Cons with justification",
            BodyStyle::RisksMitigations => "Risk → Likelihood → Impact → Mitigation",
            BodyStyle::MetricsTrends => "Metric → Current Value → Change → Driver",
        }
    }
}

impl fmt::Display for BodyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the summary generator needs besides the document text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub audience: Audience,
    pub tone: Tone,
    pub num_subtopics: usize,
    pub bullets_per_subtopic: usize,
    pub subtopics: Vec<String>,
    pub body_style: BodyStyle,
}

impl Default for SummaryRequest {
    fn default() -> Self {
        Self {
            audience: Audience::default(),
            tone: Tone::default(),
            num_subtopics: DEFAULT_COUNT,
            bullets_per_subtopic: DEFAULT_COUNT,
            subtopics: DEFAULT_SUBTOPICS.iter().map(|s| s.to_string()).collect(),
            body_style: BodyStyle::default(),
        }
    }
}

impl SummaryRequest {
    /// Replace zero counts and an empty subtopic list with their defaults,
    /// and clamp counts to [`MAX_COUNT`].
    pub fn normalized(mut self) -> Self {
        self.num_subtopics = normalize_count(self.num_subtopics);
        self.bullets_per_subtopic = normalize_count(self.bullets_per_subtopic);
        if self.subtopics.is_empty() {
            self.subtopics = DEFAULT_SUBTOPICS.iter().map(|s| s.to_string()).collect();
        }
        self
    }

    /// The first `num_subtopics` names, never padded.
    pub fn subtopics_to_use(&self) -> &[String] {
        let n = self.num_subtopics.min(self.subtopics.len());
        &self.subtopics[..n]
    }
}

/// Zero means "use the default"; anything above [`MAX_COUNT`] is clamped.
pub fn normalize_count(n: usize) -> usize {
    match n {
        0 => DEFAULT_COUNT,
        n => n.min(MAX_COUNT),
    }
}
