pub mod json;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod router;
pub mod summary;
pub mod themes;

#[cfg(any(test, feature = "test-util"))]
pub mod stub;

pub use pipeline::{PipelineOutcome, ReportPipeline};
pub use provider::{GenerateOptions, LlmError, LlmProvider};
pub use router::{DocumentRouter, Route, RoutedText};
pub use summary::{style_instructions, SummaryError, SummaryGenerator};
pub use themes::{AnalysisError, ThemeAnalyzer};
