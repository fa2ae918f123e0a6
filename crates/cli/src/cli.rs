use std::path::PathBuf;

use clap::Parser;
use digest_core::{Audience, BodyStyle, Tone, MAX_COUNT};

/// Summarize a PDF report into a structured markdown brief.
///
/// Extracts the PDF's text, ranks its themes with an LLM and writes a
/// three-section summary in the chosen body style. Options not given as
/// flags are asked for interactively.
#[derive(Parser, Debug)]
#[command(name = "report-digest", version, about = "Multi-format PDF report summaries")]
pub struct CliArgs {
    /// PDF file to summarize (prompted for when omitted)
    pub pdf: Option<PathBuf>,

    /// LLM provider: gemini or ollama (overrides LLM_PROVIDER)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name override
    #[arg(long)]
    pub model: Option<String>,

    /// Gemini API key (overrides GOOGLE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Target audience: management, technical_team, general_audience, executives
    #[arg(long, value_parser = parse_audience)]
    pub audience: Option<Audience>,

    /// Tone: neutral, formal, concise
    #[arg(long, value_parser = parse_tone)]
    pub tone: Option<Tone>,

    /// Body style: key_findings, pros_cons, risks_mitigations, metrics_trends
    #[arg(long, value_parser = parse_style)]
    pub style: Option<BodyStyle>,

    /// Number of body subtopics
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=MAX_COUNT as i64))]
    pub subtopics: Option<u16>,

    /// Bullets per subtopic
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=MAX_COUNT as i64))]
    pub bullets: Option<u16>,

    /// Read at most this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Directory for the summary file (default: current directory)
    #[arg(long, short)]
    pub output_dir: Option<PathBuf>,

    /// Take every unset option from the preferences file instead of asking
    #[arg(long, short = 'y')]
    pub non_interactive: bool,

    /// Show progress logs
    #[arg(long, short)]
    pub verbose: bool,

    /// Path to preferences file (default: ~/.config/report-digest/config.toml)
    #[arg(long)]
    pub config: Option<String>,
}

fn parse_audience(s: &str) -> Result<Audience, String> {
    Audience::from_name(s).ok_or_else(|| format!("unknown audience '{s}'"))
}

fn parse_tone(s: &str) -> Result<Tone, String> {
    Tone::from_name(s).ok_or_else(|| format!("unknown tone '{s}'"))
}

/// Unknown styles fall back to key_findings rather than failing.
fn parse_style(s: &str) -> Result<BodyStyle, String> {
    Ok(BodyStyle::from_name(s))
}
