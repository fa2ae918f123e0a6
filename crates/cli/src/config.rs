use anyhow::{Context, Result};
use digest_core::{normalize_count, Audience, BodyStyle, Tone, DEFAULT_COUNT};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Saved summary preferences, loaded from TOML. These are the defaults
/// offered at each menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_audience")]
    pub audience: Audience,

    #[serde(default)]
    pub tone: Tone,

    #[serde(default)]
    pub body_style: BodyStyle,

    #[serde(default = "default_count")]
    pub num_subtopics: usize,

    #[serde(default = "default_count")]
    pub bullets_per_subtopic: usize,

    /// Directory the summary file is written to (current directory if unset).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Read at most this many pages of each PDF.
    #[serde(default)]
    pub max_pages: Option<usize>,
}

fn default_audience() -> Audience {
    Audience::Management
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            audience: default_audience(),
            tone: Tone::default(),
            body_style: BodyStyle::default(),
            num_subtopics: default_count(),
            bullets_per_subtopic: default_count(),
            output_dir: None,
            max_pages: None,
        }
    }
}

impl CliConfig {
    /// Return the default config directory path: ~/.config/report-digest/
    pub fn default_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("report-digest");
        Ok(config_dir)
    }

    /// Return the default config file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    /// Returns default config if the file does not exist; nothing is written.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            debug!(?config_path, "Loading preferences");
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read config: {}", config_path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
            Ok(config.sanitized())
        } else {
            debug!(?config_path, "Preferences file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Zero counts in a hand-edited file fall back to the default; large
    /// ones are clamped.
    fn sanitized(mut self) -> Self {
        self.num_subtopics = normalize_count(self.num_subtopics);
        self.bullets_per_subtopic = normalize_count(self.bullets_per_subtopic);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.audience, Audience::Management);
        assert_eq!(config.tone, Tone::Neutral);
        assert_eq!(config.body_style, BodyStyle::KeyFindings);
        assert_eq!(config.num_subtopics, 3);
        assert_eq!(config.bullets_per_subtopic, 3);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: CliConfig = toml::from_str(
            r#"
            body_style = "metrics_trends"
            audience = "technical_team"
            "#,
        )
        .unwrap();
        assert_eq!(config.body_style, BodyStyle::MetricsTrends);
        assert_eq!(config.audience, Audience::TechnicalTeam);
        assert_eq!(config.tone, Tone::Neutral);
        assert_eq!(config.num_subtopics, 3);
    }

    #[test]
    fn test_load_missing_uses_defaults_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.num_subtopics, 3);
        assert_eq!(config.audience, Audience::Management);
        assert!(!path.exists());
        assert!(!path.parent().unwrap().exists());
    }

    #[test]
    fn test_zero_counts_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "num_subtopics = 0\nbullets_per_subtopic = 5\n").unwrap();
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.num_subtopics, 3);
        assert_eq!(config.bullets_per_subtopic, 5);

        std::fs::write(&path, "bullets_per_subtopic = 4000000000\n").unwrap();
        let config = CliConfig::load(path.to_str()).unwrap();
        assert_eq!(config.bullets_per_subtopic, digest_core::MAX_COUNT);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tone = \"shouty\"\n").unwrap();
        assert!(CliConfig::load(path.to_str()).is_err());
    }
}
