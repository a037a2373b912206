//! Renderers that turn recommendations into shareable artifacts.
//!
//! Every generator here is pure: it takes the recommendation lists plus an
//! [`ExportContext`] and returns text or bytes. Writing the result somewhere
//! is the job of a [`crate::deliver::Delivery`].

pub mod document;
pub mod markdown;
pub mod openslo;
pub mod pdf;
pub mod sloth;

use crate::answers::AnswerSet;
use crate::config::Config;
use crate::error::{NavigatorError, Result};
use crate::paths;
use crate::query::QueryContext;
use crate::recommend::Recommendations;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ExportFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// `openslo/v1` SLO documents.
    OpenSlo,
    /// `prometheus/v1` rule-generator spec.
    Sloth,
    Markdown,
    Pdf,
}

impl ExportFormat {
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::OpenSlo,
            ExportFormat::Sloth,
            ExportFormat::Markdown,
            ExportFormat::Pdf,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::OpenSlo => "openslo",
            ExportFormat::Sloth => "sloth",
            ExportFormat::Markdown => "markdown",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::OpenSlo | ExportFormat::Sloth => "yaml",
            ExportFormat::Markdown => "md",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::OpenSlo | ExportFormat::Sloth => "application/yaml",
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    pub fn default_filename(self) -> &'static str {
        match self {
            ExportFormat::OpenSlo => paths::OPENSLO_FILE,
            ExportFormat::Sloth => paths::SLOTH_FILE,
            ExportFormat::Markdown => paths::MARKDOWN_FILE,
            ExportFormat::Pdf => paths::PDF_FILE,
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = NavigatorError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openslo" => Ok(ExportFormat::OpenSlo),
            "sloth" | "prometheus" => Ok(ExportFormat::Sloth),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "pdf" => Ok(ExportFormat::Pdf),
            _ => Err(NavigatorError::UnknownFormat(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Alerting tiers
// ---------------------------------------------------------------------------

/// Multi-window burn-rate alert shared by both YAML dialects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertTier {
    pub severity: &'static str,
    pub burn_rate: f64,
    pub long_window: &'static str,
    pub short_window: &'static str,
}

impl AlertTier {
    pub fn describe(&self) -> String {
        format!(
            "burn rate above {}x over {} and {}",
            self.burn_rate, self.long_window, self.short_window
        )
    }
}

pub const PAGE_ALERT: AlertTier = AlertTier {
    severity: "critical",
    burn_rate: 14.4,
    long_window: "1h",
    short_window: "5m",
};

pub const TICKET_ALERT: AlertTier = AlertTier {
    severity: "warning",
    burn_rate: 6.0,
    long_window: "6h",
    short_window: "30m",
};

// ---------------------------------------------------------------------------
// ExportContext
// ---------------------------------------------------------------------------

/// Everything a renderer needs besides the records themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportContext {
    pub query: QueryContext,
    pub owner: String,
    pub runbook_base_url: String,
}

impl ExportContext {
    pub fn from_config(config: &Config, answers: &AnswerSet) -> Self {
        Self {
            query: config.query_context(answers),
            owner: config.owner.clone(),
            runbook_base_url: config.runbook_base_url.clone(),
        }
    }

    pub fn service(&self) -> &str {
        &self.query.service
    }

    pub fn runbook_url(&self, record_name: &str) -> String {
        format!(
            "{}/{}",
            self.runbook_base_url.trim_end_matches('/'),
            paths::slugify(record_name)
        )
    }
}

/// Rolling window for a measurement window literal: `7d` for a seven day
/// window, `30d` otherwise.
pub fn window_duration(measurement_window: &str) -> &'static str {
    let days = measurement_window
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u32>().ok());
    match days {
        Some(7) => "7d",
        _ => "30d",
    }
}

// ---------------------------------------------------------------------------
// Report / render
// ---------------------------------------------------------------------------

pub const REPORT_TITLE: &str = "SLO Strategy Report";

/// Checklist closing every report.
pub const NEXT_STEPS: [&str; 5] = [
    "Roll out the high-priority monitoring and alerting first",
    "Establish a baseline by collecting 2-4 weeks of historical data",
    "Set initial SLO targets and start tracking the error budget",
    "Hold a recurring SLO review meeting",
    "Adjust SLO targets based on how the service behaves in production",
];

pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Answers for `category` joined for display, `N/A` when nothing is selected.
pub fn answer_summary(answers: &AnswerSet, category: crate::types::Category) -> String {
    let ids = answers.selections(category);
    if ids.is_empty() {
        crate::target::NOT_APPLICABLE.to_string()
    } else {
        ids.join(", ")
    }
}

/// Inputs for the full report formats.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub answers: &'a AnswerSet,
    pub recommendations: &'a Recommendations,
    pub context: &'a ExportContext,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Text(String),
    Binary(Vec<u8>),
}

impl Rendered {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Rendered::Text(s) => s.as_bytes(),
            Rendered::Binary(b) => b,
        }
    }
}

pub fn render(format: ExportFormat, report: &Report<'_>) -> Result<Rendered> {
    let slos = &report.recommendations.slos;
    let rendered = match format {
        ExportFormat::OpenSlo => Rendered::Text(openslo::generate(slos, report.context)?),
        ExportFormat::Sloth => Rendered::Text(sloth::generate(slos, report.context)?),
        ExportFormat::Markdown => Rendered::Text(markdown::generate(report)?),
        ExportFormat::Pdf => Rendered::Binary(pdf::generate(report)?),
    };
    tracing::debug!(%format, bytes = rendered.as_bytes().len(), "rendered export");
    Ok(rendered)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
