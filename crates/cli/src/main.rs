mod cli;
mod config;
mod menu;
mod output;
mod terminal;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use digest_core::{BodyStyle, Config, DigestError, Document, SummaryRequest};
use digest_llm::providers::create_provider;
use digest_llm::{ReportPipeline, Route};

use crate::cli::CliArgs;
use crate::config::CliConfig;
use crate::menu::{menu_label, AUDIENCE_MENU, TONE_MENU};
use crate::terminal::Terminal;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let default_filter = if args.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    run(args, &Terminal::new()).await
}

/// Everything after argument parsing. A missing input file, a provider that
/// cannot be built, or a PDF with no text is an error; a failed save is
/// reported and is not.
async fn run(args: CliArgs, terminal: &Terminal) -> Result<()> {
    digest_core::config::load_dotenv();
    let mut config = Config::from_env();
    if let Some(ref provider) = args.provider {
        config.llm.provider = provider.to_lowercase();
    }
    if let Some(ref model) = args.model {
        config.llm.set_model(model.clone());
    }
    if let Some(ref key) = args.api_key {
        config.llm.google_api_key = Some(key.clone());
    }
    config.log_summary();

    let prefs = CliConfig::load(args.config.as_deref()).context("failed to load preferences")?;

    let pdf_path = match args.pdf.clone() {
        Some(path) => path,
        None if args.non_interactive => bail!("no PDF path given"),
        None => PathBuf::from(terminal.ask("Enter PDF file path: ")?),
    };
    if !pdf_path.exists() {
        return Err(DigestError::InputNotFound(pdf_path.display().to_string()).into());
    }

    let provider = create_provider(&config.llm).context("failed to create LLM provider")?;
    let pipeline = ReportPipeline::new(provider, &config.pipeline);

    terminal.print_info(&format!("Processing: {}", display_name(&pdf_path)))?;
    let document = load_document(&pdf_path, args.max_pages.or(prefs.max_pages))?;

    let request = collect_request(&args, &prefs, terminal)?;

    if pipeline.router().needs_compression(document.page_count) {
        terminal.print_info(&format!(
            "Long document detected ({} pages). Processing with intelligent extraction...",
            document.page_count
        ))?;
    }
    let spinner = terminal.start_spinner(&format!(
        "\nAnalyzing themes and generating summary for {} with {} tone using {} style...\nStructure: {} subtopics with {} bullets each",
        request.audience,
        request.tone,
        request.body_style,
        request.num_subtopics,
        request.bullets_per_subtopic,
    ))?;
    let outcome = pipeline.run(&document, request).await;
    spinner.stop();

    match &outcome.routed.route {
        Route::PassThrough => {}
        Route::Compressed {
            original_chars,
            compressed_chars,
        } => terminal.print_info(&format!(
            "Successfully extracted key points from {} pages.\nOriginal: {} chars → Extracted: {} chars",
            document.page_count, original_chars, compressed_chars
        ))?,
        Route::Fallback { reason } => terminal.print_warning(&format!(
            "Error in intelligent extraction: {}\nFalling back to full document...",
            reason
        ))?,
    }
    info!(
        themes = ?outcome.analysis.themes.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(),
        "Themes used"
    );

    terminal.print_summary(&outcome.summary)?;

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| prefs.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    save_report(terminal, &output_dir, &pdf_path, &outcome.request, &outcome.summary)
}

fn load_document(path: &Path, max_pages: Option<usize>) -> Result<Document> {
    let document = digest_ingest::read_pdf(path, max_pages)
        .with_context(|| format!("Could not read PDF file {}", path.display()))?;
    if document.is_empty() {
        return Err(DigestError::EmptyDocument(path.display().to_string()).into());
    }
    Ok(document)
}

fn save_report(
    terminal: &Terminal,
    output_dir: &Path,
    pdf_path: &Path,
    request: &SummaryRequest,
    summary: &str,
) -> Result<()> {
    match output::write_report(output_dir, pdf_path, request, summary) {
        Ok(path) => terminal.print_info(&format!("\nSummary saved to: {}", path.display())),
        Err(e) => terminal.print_error(&format!("saving file: {:#}", e)),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Flags win; otherwise ask (or, non-interactively, use the saved preference).
fn collect_request(args: &CliArgs, prefs: &CliConfig, terminal: &Terminal) -> Result<SummaryRequest> {
    let interactive = !args.non_interactive;
    if interactive {
        terminal.print_info("\nSelect options for summary generation (press Enter for defaults):")?;
    }

    let audience = match args.audience {
        Some(a) => a,
        None if interactive => {
            let options: Vec<String> = AUDIENCE_MENU
                .iter()
                .map(|a| menu_label(a.as_str(), *a == prefs.audience))
                .collect();
            terminal.print_menu("Audience options:", &options)?;
            menu::audience_choice(&terminal.ask("Choose audience (1-3): ")?, prefs.audience)
        }
        None => prefs.audience,
    };

    let tone = match args.tone {
        Some(t) => t,
        None if interactive => {
            let options: Vec<String> = TONE_MENU
                .iter()
                .map(|t| menu_label(t.as_str(), *t == prefs.tone))
                .collect();
            terminal.print_menu("Tone options:", &options)?;
            menu::tone_choice(&terminal.ask("Choose tone (1-3): ")?, prefs.tone)
        }
        None => prefs.tone,
    };

    let body_style = match args.style {
        Some(s) => s,
        None if interactive => {
            let options: Vec<String> = BodyStyle::ALL
                .iter()
                .map(|s| {
                    let label = format!("{} - {}", s.as_str(), s.description());
                    menu_label(&label, *s == prefs.body_style)
                })
                .collect();
            terminal.print_menu("Body style options:", &options)?;
            menu::style_choice(&terminal.ask("Choose body style (1-4): ")?, prefs.body_style)
        }
        None => prefs.body_style,
    };

    if interactive && (args.subtopics.is_none() || args.bullets.is_none()) {
        terminal.print_menu("Structure options:", &[])?;
    }

    let num_subtopics = match args.subtopics {
        Some(n) => n as usize,
        None if interactive => menu::count_choice(
            &terminal.ask(&format!("Number of subtopics (default: {}): ", prefs.num_subtopics))?,
            prefs.num_subtopics,
        ),
        None => prefs.num_subtopics,
    };

    let bullets_per_subtopic = match args.bullets {
        Some(n) => n as usize,
        None if interactive => menu::count_choice(
            &terminal.ask(&format!("Bullets per subtopic (default: {}): ", prefs.bullets_per_subtopic))?,
            prefs.bullets_per_subtopic,
        ),
        None => prefs.bullets_per_subtopic,
    };

    Ok(SummaryRequest {
        audience,
        tone,
        num_subtopics,
        bullets_per_subtopic,
        body_style,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["report-digest", "-y", "--provider", "ollama"];
        argv.extend_from_slice(extra);
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn digest_error(err: &anyhow::Error) -> &DigestError {
        err.downcast_ref::<DigestError>().expect("DigestError")
    }

    #[tokio::test]
    async fn missing_input_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.pdf");
        let prefs = dir.path().join("config.toml");

        let err = run(
            args(&[missing.to_str().unwrap(), "--config", prefs.to_str().unwrap()]),
            &Terminal::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(digest_error(&err), DigestError::InputNotFound(_)));
        assert!(err.to_string().starts_with("file not found - "));
    }

    #[tokio::test]
    async fn pdf_without_text_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("scanned.pdf");
        std::fs::write(&pdf, digest_ingest::fixture::blank_pdf(2)).unwrap();
        let prefs = dir.path().join("config.toml");

        let err = run(
            args(&[pdf.to_str().unwrap(), "--config", prefs.to_str().unwrap()]),
            &Terminal::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(digest_error(&err), DigestError::EmptyDocument(_)));
        assert!(err.to_string().contains("no text extracted"));
    }

    #[test]
    fn unreadable_pdf_fails() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("broken.pdf");
        std::fs::write(&pdf, b"not a pdf").unwrap();
        let err = load_document(&pdf, None).unwrap_err();
        assert!(err.to_string().starts_with("Could not read PDF file"));
    }

    #[test]
    fn failed_save_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing_dir = dir.path().join("no-such-dir");
        let result = save_report(
            &Terminal::new(),
            &missing_dir,
            Path::new("a.pdf"),
            &SummaryRequest::default(),
            "summary",
        );
        assert!(result.is_ok());
        assert!(!missing_dir.exists());
    }
}
