use super::{
    answer_summary, format_timestamp, openslo, sloth, Report, NEXT_STEPS, REPORT_TITLE,
};
use crate::error::Result;
use crate::types::Category;
use std::fmt::Write as _;

/// Full Markdown report: answers, recommendations, both YAML dialects and the
/// closing checklist.
pub fn generate(report: &Report<'_>) -> Result<String> {
    let recs = report.recommendations;
    let mut md = String::new();

    // `fmt::Write` for String never fails.
    let _ = writeln!(md, "# {REPORT_TITLE}\n");

    md.push_str("## Service Overview\n");
    for category in Category::all() {
        let _ = writeln!(
            md,
            "- **{}**: {}",
            category.label(),
            answer_summary(report.answers, *category)
        );
    }
    let _ = writeln!(md, "- **Business Criticality**: {}\n", recs.criticality);

    md.push_str("## SLI Recommendations\n\n");
    if recs.slis.is_empty() {
        md.push_str("No SLIs matched the current answers.\n\n");
    }
    for (i, sli) in recs.slis.iter().enumerate() {
        let _ = write!(
            md,
            "### {}. {}\n\n\
             **Description**: {}  \n\
             **Metric**: `{}`  \n\
             **Recommended Target**: {}  \n\
             **Priority**: {}\n\n",
            i + 1,
            sli.name,
            sli.description,
            sli.metric,
            sli.target,
            sli.priority.label()
        );
    }

    md.push_str("## SLO Targets\n\n");
    for (i, slo) in recs.slos.iter().enumerate() {
        let _ = write!(
            md,
            "### {}. {}\n\n\
             - **Target**: {}\n\
             - **Error Budget**: {}\n\
             - **Measurement Window**: {}\n\n",
            i + 1,
            slo.sli.name,
            slo.slo_target,
            slo.error_budget,
            slo.measurement_window
        );
    }

    md.push_str("## Implementation Recommendations\n\n");
    for (i, rec) in recs.implementation.iter().enumerate() {
        let _ = write!(
            md,
            "### {}. {}\n\n\
             **Category**: {}  \n\
             **Description**: {}  \n\
             **Priority**: {}  \n\
             **Estimated Timeline**: {}\n\n",
            i + 1,
            rec.title,
            rec.category,
            rec.description,
            rec.priority.label(),
            rec.timeline
        );
    }

    if !recs.slos.is_empty() {
        md.push_str("## Monitoring Configuration\n\n");
        md.push_str("### OpenSLO\n\n```yaml\n");
        md.push_str(&openslo::generate(&recs.slos, report.context)?);
        md.push_str("```\n\n");
        md.push_str("### Prometheus SLO Rules (Sloth)\n\n```yaml\n");
        md.push_str(&sloth::generate(&recs.slos, report.context)?);
        md.push_str("```\n\n");
    }

    md.push_str("## Next Steps\n\n");
    for (i, step) in NEXT_STEPS.iter().enumerate() {
        let _ = writeln!(md, "{}. {}", i + 1, step);
    }

    let _ = write!(
        md,
        "\n---\n*Report generated: {}*\n",
        format_timestamp(&report.generated_at)
    );

    Ok(md)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
