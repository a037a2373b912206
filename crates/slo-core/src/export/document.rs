//! The report as a flat list of logical blocks. Page geometry and fonts are
//! the renderer's business; a block only says what kind of line it is.

use super::{answer_summary, format_timestamp, Report, NEXT_STEPS, REPORT_TITLE};
use crate::types::Category;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Title(String),
    Heading(String),
    Subheading(String),
    Field { label: String, value: String },
    Paragraph(String),
    Spacer,
}

impl Block {
    fn field(label: &str, value: impl Into<String>) -> Self {
        Block::Field {
            label: label.to_string(),
            value: value.into(),
        }
    }

    /// Text shown for this block, `None` for spacers.
    pub fn text(&self) -> Option<String> {
        match self {
            Block::Title(s) | Block::Heading(s) | Block::Subheading(s) | Block::Paragraph(s) => {
                Some(s.clone())
            }
            Block::Field { label, value } => Some(format!("{label}: {value}")),
            Block::Spacer => None,
        }
    }
}

pub fn build(report: &Report<'_>) -> Vec<Block> {
    let recs = report.recommendations;
    let mut blocks = vec![Block::Title(REPORT_TITLE.to_string()), Block::Spacer];

    blocks.push(Block::Heading("Service Overview".to_string()));
    for category in Category::all() {
        blocks.push(Block::field(
            category.label(),
            answer_summary(report.answers, *category),
        ));
    }
    blocks.push(Block::field(
        "Business Criticality",
        recs.criticality.as_str(),
    ));
    blocks.push(Block::Spacer);

    blocks.push(Block::Heading("SLI Recommendations".to_string()));
    if recs.slis.is_empty() {
        blocks.push(Block::Paragraph(
            "No SLIs matched the current answers.".to_string(),
        ));
    }
    for (i, sli) in recs.slis.iter().enumerate() {
        blocks.push(Block::Subheading(format!("{}. {}", i + 1, sli.name)));
        blocks.push(Block::field("Description", sli.description.as_str()));
        blocks.push(Block::field("Metric", sli.metric.as_str()));
        blocks.push(Block::field("Recommended Target", sli.target.as_str()));
        blocks.push(Block::field("Priority", sli.priority.label()));
        blocks.push(Block::Spacer);
    }

    blocks.push(Block::Heading("SLO Targets".to_string()));
    for (i, slo) in recs.slos.iter().enumerate() {
        blocks.push(Block::Subheading(format!("{}. {}", i + 1, slo.sli.name)));
        blocks.push(Block::field("Target", slo.slo_target.as_str()));
        blocks.push(Block::field("Error Budget", slo.error_budget.as_str()));
        blocks.push(Block::field(
            "Measurement Window",
            slo.measurement_window.as_str(),
        ));
        blocks.push(Block::Spacer);
    }

    blocks.push(Block::Heading("Implementation Recommendations".to_string()));
    for (i, rec) in recs.implementation.iter().enumerate() {
        blocks.push(Block::Subheading(format!("{}. {}", i + 1, rec.title)));
        blocks.push(Block::field("Category", rec.category.as_str()));
        blocks.push(Block::field("Description", rec.description.as_str()));
        blocks.push(Block::field("Priority", rec.priority.label()));
        blocks.push(Block::field("Estimated Timeline", rec.timeline.as_str()));
        blocks.push(Block::Spacer);
    }

    blocks.push(Block::Heading("Next Steps".to_string()));
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        blocks.push(Block::Paragraph(format!("{}. {}", i + 1, step)));
    }
    blocks.push(Block::Spacer);
    blocks.push(Block::Paragraph(format!(
        "Report generated: {}",
        format_timestamp(&report.generated_at)
    )));

    blocks
}

/// Number of text-bearing blocks, before any wrapping.
pub fn line_count(blocks: &[Block]) -> usize {
    blocks.iter().filter(|b| !matches!(b, Block::Spacer)).count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
