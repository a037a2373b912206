//! OpenSLO (`openslo/v1`) documents, one `SLO` per target.

use super::{window_duration, ExportContext, PAGE_ALERT, TICKET_ALERT};
use crate::error::Result;
use crate::paths::slugify;
use crate::query;
use crate::recommend::SloTarget;
use crate::target;
use serde::Serialize;
use std::collections::BTreeMap;

pub const API_VERSION: &str = "openslo/v1";
pub const DOCUMENT_SEPARATOR: &str = "---\n";

const ANNOTATION_PREFIX: &str = "slo-navigator";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SloDocument {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    spec: SloSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata {
    name: String,
    display_name: String,
    annotations: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SloSpec {
    description: String,
    service: String,
    indicator: Indicator,
    time_window: Vec<TimeWindow>,
    budgeting_method: &'static str,
    objectives: Vec<Objective>,
}

#[derive(Debug, Serialize)]
struct Indicator {
    metadata: IndicatorMetadata,
    spec: IndicatorSpec,
}

#[derive(Debug, Serialize)]
struct IndicatorMetadata {
    name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorSpec {
    ratio_metric: RatioMetric,
}

#[derive(Debug, Serialize)]
struct RatioMetric {
    counter: bool,
    good: MetricRef,
    total: MetricRef,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetricRef {
    metric_source: MetricSource,
}

#[derive(Debug, Serialize)]
struct MetricSource {
    #[serde(rename = "type")]
    source_type: &'static str,
    spec: QuerySpec,
}

#[derive(Debug, Serialize)]
struct QuerySpec {
    query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeWindow {
    duration: &'static str,
    is_rolling: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Objective {
    display_name: String,
    target: f64,
}

fn prometheus(query: String) -> MetricRef {
    MetricRef {
        metric_source: MetricSource {
            source_type: "Prometheus",
            spec: QuerySpec { query },
        },
    }
}

fn annotations(slo: &SloTarget, ctx: &ExportContext) -> BTreeMap<String, String> {
    let key = |k: &str| format!("{ANNOTATION_PREFIX}/{k}");
    BTreeMap::from([
        (key("priority"), slo.sli.priority.to_string()),
        (key("slo-target"), slo.slo_target.clone()),
        (key("error-budget"), slo.error_budget.clone()),
        (key("alert-page"), PAGE_ALERT.describe()),
        (key("alert-ticket"), TICKET_ALERT.describe()),
        (key("runbook"), ctx.runbook_url(&slo.sli.name)),
    ])
}

fn document(slo: &SloTarget, ctx: &ExportContext) -> SloDocument {
    let queries = query::resolve(slo.sli.kind, &slo.slo_target, &ctx.query);
    let name = slugify(&format!("{}-{}", ctx.service(), slo.sli.name));

    SloDocument {
        api_version: API_VERSION,
        kind: "SLO",
        metadata: Metadata {
            display_name: slo.sli.name.clone(),
            annotations: annotations(slo, ctx),
            name: name.clone(),
        },
        spec: SloSpec {
            description: slo.sli.description.clone(),
            service: ctx.service().to_string(),
            indicator: Indicator {
                metadata: IndicatorMetadata {
                    name: format!("{name}-sli"),
                },
                spec: IndicatorSpec {
                    ratio_metric: RatioMetric {
                        counter: true,
                        good: prometheus(queries.good),
                        total: prometheus(queries.total),
                    },
                },
            },
            time_window: vec![TimeWindow {
                duration: window_duration(&slo.measurement_window),
                is_rolling: true,
            }],
            budgeting_method: "Occurrences",
            objectives: vec![Objective {
                display_name: format!("{} {}", slo.sli.name, slo.slo_target),
                target: target::objective_fraction(&slo.slo_target),
            }],
        },
    }
}

/// One YAML document per SLO target, separated by `---` lines.
pub fn generate(slos: &[SloTarget], ctx: &ExportContext) -> Result<String> {
    let docs = slos
        .iter()
        .map(|slo| serde_yaml::to_string(&document(slo, ctx)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(docs.join(DOCUMENT_SEPARATOR))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
