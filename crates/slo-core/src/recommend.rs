use crate::answers::AnswerSet;
use crate::target;
use crate::types::{Category, Criticality, MetricKind, Priority};
use serde::{Deserialize, Serialize};

pub const MEASUREMENT_WINDOW: &str = "30 days";

pub const CRITICAL_AVAILABILITY_TARGET: &str = "99.95%";
pub const CRITICAL_LATENCY_TARGET: &str = "< 150ms";

// ---------------------------------------------------------------------------
// Records (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliRecommendation {
    pub kind: MetricKind,
    pub name: String,
    pub description: String,
    /// Human readable formula.
    pub metric: String,
    pub target: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SloTarget {
    #[serde(flatten)]
    pub sli: SliRecommendation,
    pub slo_target: String,
    pub error_budget: String,
    pub measurement_window: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRecommendation {
    pub category: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub timeline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub criticality: Criticality,
    pub slis: Vec<SliRecommendation>,
    pub slos: Vec<SloTarget>,
    pub implementation: Vec<ImplementationRecommendation>,
}

// ---------------------------------------------------------------------------
// SliRule
// ---------------------------------------------------------------------------

/// Static description of the record a rule emits.
#[derive(Debug, Clone, Copy)]
pub struct SliTemplate {
    pub kind: MetricKind,
    pub name: &'static str,
    pub description: &'static str,
    pub metric: &'static str,
    pub target: &'static str,
    pub priority: Priority,
}

impl SliTemplate {
    pub fn to_recommendation(&self) -> SliRecommendation {
        SliRecommendation {
            kind: self.kind,
            name: self.name.to_string(),
            description: self.description.to_string(),
            metric: self.metric.to_string(),
            target: self.target.to_string(),
            priority: self.priority,
        }
    }
}

/// Fires when `option` is selected in `category`.
#[derive(Debug, Clone, Copy)]
pub struct SliRule {
    pub id: &'static str,
    pub category: Category,
    pub option: &'static str,
    pub template: SliTemplate,
}

macro_rules! sli_rule {
    (
        id: $id:expr,
        when: ($cat:expr, $opt:expr),
        kind: $kind:expr,
        name: $name:expr,
        description: $desc:expr,
        metric: $metric:expr,
        target: $target:expr,
        priority: $prio:expr
    ) => {
        SliRule {
            id: $id,
            category: $cat,
            option: $opt,
            template: SliTemplate {
                kind: $kind,
                name: $name,
                description: $desc,
                metric: $metric,
                target: $target,
                priority: $prio,
            },
        }
    };
}

// ---------------------------------------------------------------------------
// Default rules (table order is output order)
// ---------------------------------------------------------------------------

pub fn default_rules() -> Vec<SliRule> {
    use Category::*;
    vec![
        sli_rule! {
            id: "availability",
            when: (UserConcerns, "availability"),
            kind: MetricKind::Availability,
            name: "Availability",
            description: "Share of requests the service answers successfully",
            metric: "non-5xx responses / total requests",
            target: "99.9%",
            priority: Priority::High
        },
        // Availability concerns also track the broader error rate.
        sli_rule! {
            id: "error_rate",
            when: (UserConcerns, "availability"),
            kind: MetricKind::ErrorRate,
            name: "Error Rate",
            description: "Share of requests completed without server errors or throttling",
            metric: "1 - (5xx + 429 responses / total requests)",
            target: "99.5%",
            priority: Priority::High
        },
        sli_rule! {
            id: "latency",
            when: (UserConcerns, "response_time"),
            kind: MetricKind::Latency,
            name: "Latency",
            description: "Time taken to serve a request",
            metric: "95th percentile response time",
            target: "< 200ms",
            priority: Priority::High
        },
        sli_rule! {
            id: "correctness",
            when: (UserConcerns, "data_accuracy"),
            kind: MetricKind::Correctness,
            name: "Correctness",
            description: "Share of processed records that pass validation",
            metric: "passed validation checks / total validation checks",
            target: "99.99%",
            priority: Priority::Medium
        },
        sli_rule! {
            id: "throughput",
            when: (UserConcerns, "performance"),
            kind: MetricKind::Throughput,
            name: "Throughput",
            description: "Requests handled per unit of time",
            metric: "requests per second (RPS)",
            target: "> 1000 RPS",
            priority: Priority::Medium
        },
        sli_rule! {
            id: "saturation",
            when: (UserConcerns, "performance"),
            kind: MetricKind::Saturation,
            name: "Saturation",
            description: "Headroom left on the most constrained resource",
            metric: "peak CPU / memory utilisation",
            target: "< 80% utilization",
            priority: Priority::Medium
        },
        sli_rule! {
            id: "journey_success",
            when: (UserConcerns, "user_experience"),
            kind: MetricKind::JourneySuccess,
            name: "User Journey Success",
            description: "Share of started critical user journeys that complete",
            metric: "completed journeys / started journeys",
            target: "99.5%",
            priority: Priority::High
        },
        sli_rule! {
            id: "durability",
            when: (ServiceType, "database"),
            kind: MetricKind::Durability,
            name: "Durability",
            description: "Guarantee that written data is never lost",
            metric: "successful backups / scheduled backups",
            target: "100%",
            priority: Priority::High
        },
        sli_rule! {
            id: "job_success",
            when: (ServiceType, "backend"),
            kind: MetricKind::JobSuccess,
            name: "Job Success Rate",
            description: "Share of scheduled jobs that finish successfully",
            metric: "succeeded job runs / total job runs",
            target: "99%",
            priority: Priority::Medium
        },
    ]
}

// ---------------------------------------------------------------------------
// RulesEngine
// ---------------------------------------------------------------------------

pub struct RulesEngine {
    rules: Vec<SliRule>,
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl RulesEngine {
    pub fn new(rules: Vec<SliRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SliRule] {
        &self.rules
    }

    pub fn derive(&self, answers: &AnswerSet) -> Recommendations {
        let slis = self.derive_slis(answers);
        let criticality = criticality(answers);
        let slos = derive_slos(&slis, criticality);
        let implementation = derive_implementation(answers);
        tracing::info!(
            slis = slis.len(),
            implementation = implementation.len(),
            %criticality,
            "derived recommendations"
        );
        Recommendations {
            criticality,
            slis,
            slos,
            implementation,
        }
    }

    pub fn derive_slis(&self, answers: &AnswerSet) -> Vec<SliRecommendation> {
        self.rules
            .iter()
            .filter(|rule| answers.contains(rule.category, rule.option))
            .inspect(|rule| tracing::debug!(rule = rule.id, "sli rule matched"))
            .map(|rule| rule.template.to_recommendation())
            .collect()
    }
}

/// Evaluate the default rule table.
pub fn derive(answers: &AnswerSet) -> Recommendations {
    RulesEngine::default().derive(answers)
}

// ---------------------------------------------------------------------------
// SLO derivation
// ---------------------------------------------------------------------------

/// Business criticality from the impact answers, first match wins.
pub fn criticality(answers: &AnswerSet) -> Criticality {
    if answers.contains(Category::BusinessImpact, "revenue_loss") {
        Criticality::Critical
    } else if answers.contains(Category::BusinessImpact, "customer_churn") {
        Criticality::High
    } else {
        Criticality::Medium
    }
}

/// One SLO per SLI, same order. Only `Critical` tightens targets.
pub fn derive_slos(slis: &[SliRecommendation], criticality: Criticality) -> Vec<SloTarget> {
    slis.iter()
        .map(|sli| {
            let slo_target = match (criticality, sli.kind) {
                (Criticality::Critical, MetricKind::Availability) => {
                    CRITICAL_AVAILABILITY_TARGET.to_string()
                }
                (Criticality::Critical, MetricKind::Latency) => {
                    CRITICAL_LATENCY_TARGET.to_string()
                }
                _ => sli.target.clone(),
            };
            SloTarget {
                sli: sli.clone(),
                error_budget: target::error_budget(&slo_target),
                slo_target,
                measurement_window: MEASUREMENT_WINDOW.to_string(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Implementation guidance
// ---------------------------------------------------------------------------

fn implementation(
    category: &str,
    title: &str,
    description: &str,
    priority: Priority,
    timeline: &str,
) -> ImplementationRecommendation {
    ImplementationRecommendation {
        category: category.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        timeline: timeline.to_string(),
    }
}

pub fn derive_implementation(answers: &AnswerSet) -> Vec<ImplementationRecommendation> {
    let mut recs = Vec::new();

    if !answers.contains(Category::MonitoringCapability, "apm_tools") {
        recs.push(implementation(
            "Monitoring Tools",
            "Deploy APM tooling",
            "Use Prometheus + Grafana or Datadog for application performance monitoring",
            Priority::High,
            "2-4 weeks",
        ));
    }

    if !answers.contains(Category::MonitoringCapability, "automated_ops") {
        recs.push(implementation(
            "Automation",
            "Automate operations",
            "Introduce a CI/CD pipeline with automated deployment and rollback",
            Priority::Medium,
            "4-6 weeks",
        ));
    }

    recs.push(implementation(
        "Alerting",
        "Set up SLO alerting",
        "Configure multi-tier alerts driven by error budget burn rate",
        Priority::High,
        "1-2 weeks",
    ));

    recs.push(implementation(
        "Incident Response",
        "Write runbooks",
        "Write a detailed troubleshooting runbook for every SLI",
        Priority::Medium,
        "2-3 weeks",
    ));

    recs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
