//! `prometheus/v1` spec for rule generators such as Sloth: a service header
//! and one entry per SLO with event queries and a two-tier alert block.

use super::{AlertTier, ExportContext, PAGE_ALERT, TICKET_ALERT};
use crate::error::Result;
use crate::paths::slugify;
use crate::query;
use crate::recommend::SloTarget;
use crate::target;
use serde::Serialize;
use std::collections::BTreeMap;

pub const VERSION: &str = "prometheus/v1";

#[derive(Debug, Serialize)]
struct Spec {
    version: &'static str,
    service: String,
    labels: BTreeMap<&'static str, String>,
    slos: Vec<Slo>,
}

#[derive(Debug, Serialize)]
struct Slo {
    name: String,
    objective: f64,
    description: String,
    labels: BTreeMap<&'static str, String>,
    sli: Sli,
    alerting: Alerting,
}

#[derive(Debug, Serialize)]
struct Sli {
    events: Events,
}

#[derive(Debug, Serialize)]
struct Events {
    error_query: String,
    total_query: String,
}

#[derive(Debug, Serialize)]
struct Alerting {
    name: String,
    labels: BTreeMap<&'static str, String>,
    annotations: BTreeMap<&'static str, String>,
    page_alert: AlertSpec,
    ticket_alert: AlertSpec,
}

#[derive(Debug, Serialize)]
struct AlertSpec {
    labels: BTreeMap<&'static str, String>,
    annotations: BTreeMap<&'static str, String>,
}

fn tier(tier: &AlertTier) -> AlertSpec {
    AlertSpec {
        labels: BTreeMap::from([("severity", tier.severity.to_string())]),
        annotations: BTreeMap::from([("summary", tier.describe())]),
    }
}

/// `"checkout"` + `"Error Rate"` -> `"CheckoutErrorRate"`.
fn pascal_case(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| slugify(p).split('-').map(str::to_string).collect::<Vec<_>>())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

fn slo_entry(slo: &SloTarget, ctx: &ExportContext) -> Slo {
    let queries = query::resolve(slo.sli.kind, &slo.slo_target, &ctx.query);
    let slug = slugify(&slo.sli.name);

    Slo {
        name: slug,
        objective: target::objective_percent(&slo.slo_target),
        description: slo.sli.description.clone(),
        labels: BTreeMap::from([
            ("kind", slo.sli.kind.to_string()),
            ("priority", slo.sli.priority.to_string()),
        ]),
        sli: Sli {
            events: Events {
                error_query: queries.error,
                total_query: queries.total,
            },
        },
        alerting: Alerting {
            name: format!("{}BurnRate", pascal_case(&[ctx.service(), slo.sli.name.as_str()])),
            labels: BTreeMap::from([("category", slo.sli.kind.to_string())]),
            annotations: BTreeMap::from([
                ("runbook", ctx.runbook_url(&slo.sli.name)),
                (
                    "summary",
                    format!(
                        "{} SLO for {} is burning its {} error budget",
                        slo.sli.name,
                        ctx.service(),
                        slo.error_budget
                    ),
                ),
            ]),
            page_alert: tier(&PAGE_ALERT),
            ticket_alert: tier(&TICKET_ALERT),
        },
    }
}

/// Single document covering every SLO target.
pub fn generate(slos: &[SloTarget], ctx: &ExportContext) -> Result<String> {
    let spec = Spec {
        version: VERSION,
        service: ctx.service().to_string(),
        labels: BTreeMap::from([
            ("owner", ctx.owner.clone()),
            ("generator", "slo-navigator".to_string()),
        ]),
        slos: slos.iter().map(|slo| slo_entry(slo, ctx)).collect(),
    };
    Ok(serde_yaml::to_string(&spec)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use serde_yaml::Value;

    fn parsed() -> Value {
        let recs = fixtures::recommendations();
        serde_yaml::from_str(&generate(&recs.slos, &fixtures::context()).unwrap()).unwrap()
    }

    #[test]
    fn header_and_entry_count() {
        let v = parsed();
        assert_eq!(v["version"], "prometheus/v1");
        assert_eq!(v["service"], "checkout");
        assert_eq!(v["labels"]["owner"], "sre-team");
        assert_eq!(
            v["slos"].as_sequence().unwrap().len(),
            fixtures::recommendations().slos.len()
        );
    }

    #[test]
    fn availability_entry() {
        let v = parsed();
        let slo = &v["slos"][0];
        assert_eq!(slo["name"], "availability");
        assert_eq!(slo["objective"].as_f64(), Some(99.95));
        assert_eq!(
            slo["sli"]["events"]["error_query"],
            "sum(rate(http_requests_total{service=\"checkout\",code=~\"5..\"}[5m]))"
        );
        assert_eq!(slo["alerting"]["name"], "CheckoutAvailabilityBurnRate");
        assert_eq!(
            slo["alerting"]["annotations"]["runbook"],
            "https://runbooks.example.com/slo/availability"
        );
        assert_eq!(slo["alerting"]["page_alert"]["labels"]["severity"], "critical");
        assert_eq!(slo["alerting"]["ticket_alert"]["labels"]["severity"], "warning");
    }

    #[test]
    fn runbook_slug_for_multi_word_names() {
        let v = parsed();
        let error_rate = &v["slos"][1];
        assert_eq!(error_rate["name"], "error-rate");
        assert_eq!(
            error_rate["alerting"]["annotations"]["runbook"],
            "https://runbooks.example.com/slo/error-rate"
        );
    }

    #[test]
    fn pascal_case_joins_words() {
        assert_eq!(pascal_case(&["web", "User Journey Success"]), "WebUserJourneySuccess");
    }

    #[test]
    fn empty_target_list_still_has_header() {
        let v: Value =
            serde_yaml::from_str(&generate(&[], &fixtures::context()).unwrap()).unwrap();
        assert_eq!(v["service"], "checkout");
        assert!(v["slos"].as_sequence().unwrap().is_empty());
    }
}
