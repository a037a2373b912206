use crate::target;
use crate::types::MetricKind;
use serde::Serialize;

/// Bucket used for latency SLIs whose target carries no duration.
pub const DEFAULT_LATENCY_THRESHOLD_SECS: f64 = 0.2;

// ---------------------------------------------------------------------------
// QueryContext / QuerySet
// ---------------------------------------------------------------------------

/// Inputs shared by every query template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryContext {
    pub service: String,
    pub rate_window: String,
}

impl QueryContext {
    pub fn new(service: impl Into<String>, rate_window: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            rate_window: rate_window.into(),
        }
    }
}

/// Prometheus expressions for one SLI: good events, bad events, all events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySet {
    pub good: String,
    pub error: String,
    pub total: String,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolve the query expressions for a record of `kind` whose SLO target is
/// `slo_target`. Every exporter goes through here so that the same record
/// always yields the same `total` expression.
pub fn resolve(kind: MetricKind, slo_target: &str, ctx: &QueryContext) -> QuerySet {
    let svc = label_value(&ctx.service);
    let w = &ctx.rate_window;
    let rate = |metric: &str, extra: &str| {
        if extra.is_empty() {
            format!("sum(rate({metric}{{service=\"{svc}\"}}[{w}]))")
        } else {
            format!("sum(rate({metric}{{service=\"{svc}\",{extra}}}[{w}]))")
        }
    };

    match kind {
        MetricKind::Availability => QuerySet {
            good: rate("http_requests_total", "code!~\"5..\""),
            error: rate("http_requests_total", "code=~\"5..\""),
            total: rate("http_requests_total", ""),
        },
        MetricKind::Latency => {
            let le = target::threshold_seconds(slo_target).unwrap_or(DEFAULT_LATENCY_THRESHOLD_SECS);
            let good = rate(
                "http_request_duration_seconds_bucket",
                &format!("le=\"{le}\""),
            );
            let total = rate("http_request_duration_seconds_count", "");
            QuerySet {
                error: format!("{total} - {good}"),
                good,
                total,
            }
        }
        MetricKind::Correctness => QuerySet {
            good: rate("data_validation_checks_total", "result=\"pass\""),
            error: rate("data_validation_checks_total", "result=\"fail\""),
            total: rate("data_validation_checks_total", ""),
        },
        MetricKind::Throughput => QuerySet {
            good: rate("http_requests_total", "code!=\"429\""),
            error: rate("http_requests_total", "code=\"429\""),
            total: rate("http_requests_total", ""),
        },
        MetricKind::ErrorRate => QuerySet {
            good: rate("http_requests_total", "code!~\"(5..|429)\""),
            error: rate("http_requests_total", "code=~\"(5..|429)\""),
            total: rate("http_requests_total", ""),
        },
        MetricKind::Saturation => QuerySet {
            good: rate("resource_saturation_samples_total", "state=\"below_threshold\""),
            error: rate("resource_saturation_samples_total", "state=\"above_threshold\""),
            total: rate("resource_saturation_samples_total", ""),
        },
        MetricKind::JourneySuccess => QuerySet {
            good: rate("user_journey_completed_total", ""),
            error: rate("user_journey_failed_total", ""),
            total: rate("user_journey_started_total", ""),
        },
        MetricKind::JobSuccess => QuerySet {
            good: rate("job_runs_total", "status=\"succeeded\""),
            error: rate("job_runs_total", "status=\"failed\""),
            total: rate("job_runs_total", ""),
        },
        // No dedicated instrumentation convention; generic request counters.
        MetricKind::Durability => generic(ctx),
    }
}

/// Escape a string for use inside a double-quoted PromQL label matcher.
fn label_value(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

/// Generic request-count expressions.
pub fn generic(ctx: &QueryContext) -> QuerySet {
    let svc = label_value(&ctx.service);
    let w = &ctx.rate_window;
    QuerySet {
        good: format!("sum(rate(requests_success_total{{service=\"{svc}\"}}[{w}]))"),
        error: format!("sum(rate(requests_failed_total{{service=\"{svc}\"}}[{w}]))"),
        total: format!("sum(rate(requests_total{{service=\"{svc}\"}}[{w}]))"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
