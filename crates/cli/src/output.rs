use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use digest_core::{BodyStyle, SummaryRequest};

/// `<pdf-basename>_<body_style>_summary.md`
pub fn output_filename(pdf_path: &Path, style: BodyStyle) -> String {
    let stem = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    format!("{}_{}_summary.md", stem, style.as_str())
}

/// Metadata header, a horizontal rule, then the summary exactly as generated.
pub fn render_report(
    source: &str,
    request: &SummaryRequest,
    generated: DateTime<Local>,
    summary: &str,
) -> String {
    let mut out = String::new();
    out.push_str("# Multi-Format Summary Report\n\n");
    out.push_str(&format!("**Generated:** {}\n\n", generated.format("%Y-%m-%d %H:%M:%S")));
    out.push_str(&format!("**Source:** {}\n\n", source));
    out.push_str(&format!("**Audience:** {}\n\n", request.audience));
    out.push_str(&format!("**Tone:** {}\n\n", request.tone));
    out.push_str(&format!("**Body Style:** {}\n\n", request.body_style));
    out.push_str(&format!(
        "**Structure:** {} subtopics, {} bullets each\n\n",
        request.num_subtopics, request.bullets_per_subtopic
    ));
    out.push_str("---\n\n");
    out.push_str(summary);
    out
}

/// Write the report into `output_dir` and return its path.
pub fn write_report(
    output_dir: &Path,
    pdf_path: &Path,
    request: &SummaryRequest,
    summary: &str,
) -> Result<PathBuf> {
    let source = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = output_dir.join(output_filename(pdf_path, request.body_style));
    let content = render_report(&source, request, Local::now(), summary);

    std::fs::write(&path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "Summary written");
    Ok(path)
}
