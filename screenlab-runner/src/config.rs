//! Serializable report configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) reproduces the
//! standard report: newest `P123_Screen_*.csv` under `Universe Data/`, top
//! 15 by market cap, written as `results.md` in the working directory.

use std::path::{Path, PathBuf};

use screenlab_core::data::{LatestSnapshot, SourceSelector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ranking::{DEFAULT_NAME_MAX_CHARS, DEFAULT_TOP_K};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub source: SourceConfig,
    pub report: ReportSettings,
    pub output: OutputConfig,
}

/// Where to look for snapshot exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub dir: PathBuf,
    pub prefix: String,
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Universe Data"),
            prefix: "P123_Screen_".into(),
            extension: "csv".into(),
        }
    }
}

/// Knobs that change report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub top_k: usize,
    pub name_max_chars: usize,
    /// Text shown for absent title / date / notes.
    pub placeholder: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            name_max_chars: DEFAULT_NAME_MAX_CHARS,
            placeholder: "Unknown".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown output format '{other}' (expected markdown or json)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// File name without extension.
    pub stem: String,
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            stem: "results".into(),
            format: OutputFormat::Markdown,
        }
    }
}

impl ReportConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report.top_k == 0 {
            return Err(ConfigError::Invalid("report.top_k must be at least 1".into()));
        }
        if self.report.name_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "report.name_max_chars must be at least 1".into(),
            ));
        }
        if self.report.placeholder.trim().is_empty() {
            return Err(ConfigError::Invalid("report.placeholder must not be empty".into()));
        }
        if self.output.stem.trim().is_empty() {
            return Err(ConfigError::Invalid("output.stem must not be empty".into()));
        }
        if self.source.extension.is_empty() {
            return Err(ConfigError::Invalid("source.extension must not be empty".into()));
        }
        Ok(())
    }

    /// Selector for the newest export matching `[source]`.
    pub fn latest_snapshot(&self) -> LatestSnapshot {
        LatestSnapshot::new(&self.source.dir, &self.source.prefix, &self.source.extension)
    }

    pub fn selector(&self) -> Box<dyn SourceSelector> {
        Box::new(self.latest_snapshot())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ReportConfig::from_toml("").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.report.top_k, 15);
        assert_eq!(config.report.name_max_chars, 40);
        assert_eq!(config.report.placeholder, "Unknown");
        assert_eq!(config.source.dir, PathBuf::from("Universe Data"));
        assert_eq!(config.output.format, OutputFormat::Markdown);
    }

    #[test]
    fn partial_override() {
        let config = ReportConfig::from_toml(
            r#"
[report]
top_k = 10

[output]
format = "json"
stem = "universe"
"#,
        )
        .unwrap();
        assert_eq!(config.report.top_k, 10);
        assert_eq!(config.report.name_max_chars, 40);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.stem, "universe");
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn zero_top_k_rejected() {
        let err = ReportConfig::from_toml("[report]\ntop_k = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn blank_placeholder_rejected() {
        let err = ReportConfig::from_toml("[report]\nplaceholder = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn unknown_format_is_parse_error() {
        let err = ReportConfig::from_toml("[output]\nformat = \"pptx\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn toml_roundtrip() {
        let config = ReportConfig::default();
        let parsed = ReportConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ReportConfig::from_file(Path::new("/no/such/screenlab.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
