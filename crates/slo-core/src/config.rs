use crate::answers::AnswerSet;
use crate::error::Result;
use crate::export::ExportFormat;
use crate::paths;
use crate::query::QueryContext;
use crate::types::Category;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl ConfigWarning {
    pub fn is_error(&self) -> bool {
        self.level == WarnLevel::Error
    }
}

/// True if any finding blocks exporting.
pub fn has_errors(warnings: &[ConfigWarning]) -> bool {
    warnings.iter().any(ConfigWarning::is_error)
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_openslo_file")]
    pub openslo: String,
    #[serde(default = "default_sloth_file")]
    pub sloth: String,
    #[serde(default = "default_markdown_file")]
    pub markdown: String,
    #[serde(default = "default_pdf_file")]
    pub pdf: String,
}

fn default_openslo_file() -> String {
    paths::OPENSLO_FILE.to_string()
}

fn default_sloth_file() -> String {
    paths::SLOTH_FILE.to_string()
}

fn default_markdown_file() -> String {
    paths::MARKDOWN_FILE.to_string()
}

fn default_pdf_file() -> String {
    paths::PDF_FILE.to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            openslo: default_openslo_file(),
            sloth: default_sloth_file(),
            markdown: default_markdown_file(),
            pdf: default_pdf_file(),
        }
    }
}

impl OutputConfig {
    pub fn filename_for(&self, format: ExportFormat) -> &str {
        match format {
            ExportFormat::OpenSlo => &self.openslo,
            ExportFormat::Sloth => &self.sloth,
            ExportFormat::Markdown => &self.markdown,
            ExportFormat::Pdf => &self.pdf,
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Service label used in queries. Defaults to the first selected service type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_runbook_base_url")]
    pub runbook_base_url: String,
    /// Range selector used inside every `rate(...)`.
    #[serde(default = "default_rate_window")]
    pub rate_window: String,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_owner() -> String {
    "sre-team".to_string()
}

fn default_runbook_base_url() -> String {
    "https://runbooks.example.com/slo".to_string()
}

fn default_rate_window() -> String {
    "5m".to_string()
}

pub const DEFAULT_SERVICE: &str = "service";

impl Default for Config {
    fn default() -> Self {
        Self {
            service: None,
            owner: default_owner(),
            runbook_base_url: default_runbook_base_url(),
            rate_window: default_rate_window(),
            output: OutputConfig::default(),
        }
    }
}

static WINDOW_RE: OnceLock<Regex> = OnceLock::new();

fn window_re() -> &'static Regex {
    WINDOW_RE.get_or_init(|| Regex::new(r"^[1-9][0-9]*(s|m|h|d)$").unwrap())
}

impl Config {
    /// Load `slo-navigator.yaml` from `root`, or defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(&data)?;
        Ok(config)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    /// Configured service name, else the first selected service type.
    pub fn service_name(&self, answers: &AnswerSet) -> String {
        if let Some(service) = self.service.as_deref().filter(|s| !s.trim().is_empty()) {
            return service.to_string();
        }
        answers
            .selections(Category::ServiceType)
            .first()
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_SERVICE.to_string())
    }

    pub fn query_context(&self, answers: &AnswerSet) -> QueryContext {
        QueryContext::new(self.service_name(answers), self.rate_window.clone())
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if matches!(self.service.as_deref(), Some(s) if s.trim().is_empty()) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "service is empty; the first selected service type will be used"
                    .to_string(),
            });
        }

        if self.owner.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "owner is empty; exported rules will carry an empty owner label"
                    .to_string(),
            });
        }

        if !(self.runbook_base_url.starts_with("http://")
            || self.runbook_base_url.starts_with("https://"))
        {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "runbook_base_url '{}' is not an http(s) URL",
                    self.runbook_base_url
                ),
            });
        }

        if !window_re().is_match(&self.rate_window) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "rate_window '{}' is not a Prometheus duration like 5m",
                    self.rate_window
                ),
            });
        }

        for format in ExportFormat::all() {
            if self.output.filename_for(*format).trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("output file name for {format} is empty"),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            paths::config_path(dir.path()),
            "service: checkout\noutput:\n  pdf: report.pdf\n",
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.service.as_deref(), Some("checkout"));
        assert_eq!(config.owner, "sre-team");
        assert_eq!(config.rate_window, "5m");
        assert_eq!(config.output.filename_for(ExportFormat::Pdf), "report.pdf");
        assert_eq!(
            config.output.filename_for(ExportFormat::Markdown),
            "slo-report.md"
        );
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            service: Some("payments".to_string()),
            ..Config::default()
        };
        config.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn service_name_falls_back_to_answers() {
        let mut answers = AnswerSet::new();
        let config = Config::default();
        assert_eq!(config.service_name(&answers), "service");
        answers.select(Category::ServiceType, "api");
        answers.select(Category::ServiceType, "web");
        assert_eq!(config.service_name(&answers), "web");

        let named = Config {
            service: Some("checkout".to_string()),
            ..Config::default()
        };
        assert_eq!(named.service_name(&answers), "checkout");
    }

    #[test]
    fn validate_flags_bad_values() {
        let config = Config {
            service: Some("  ".to_string()),
            runbook_base_url: "runbooks".to_string(),
            rate_window: "five minutes".to_string(),
            ..Config::default()
        };
        let warnings = config.validate();
        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings.iter().filter(|w| w.is_error()).count(), 2);
        assert!(has_errors(&warnings));
    }

    #[test]
    fn warnings_alone_do_not_block() {
        let config = Config {
            owner: String::new(),
            ..Config::default()
        };
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(!has_errors(&warnings));
    }
}
