//! Parsing of target literals such as `99.9%`, `< 200ms` or `> 1000 RPS`.

use regex::Regex;
use std::sync::OnceLock;

/// Sentinel used when a target is not a percentage.
pub const NOT_APPLICABLE: &str = "N/A";

/// Objective used for threshold-style targets (latency, throughput, saturation)
/// when exporting: the share of events that must meet the threshold.
pub const DEFAULT_THRESHOLD_OBJECTIVE: f64 = 99.0;

/// Percentage value of a target, e.g. `"99.95%"` -> `99.95`.
///
/// Comparison markers are stripped first. Anything that is not a finite number
/// in `0..=100` followed by `%` yields `None`.
pub fn percentage(target: &str) -> Option<f64> {
    if !target.contains('%') {
        return None;
    }
    let stripped: String = target
        .chars()
        .filter(|c| !matches!(c, '%' | '<' | '>'))
        .collect();
    let value: f64 = stripped.trim().parse().ok()?;
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Error budget for an SLO target: `100 - value` with two decimals, or `N/A`.
pub fn error_budget(slo_target: &str) -> String {
    match percentage(slo_target) {
        Some(value) => format!("{:.2}%", (100.0 - value).max(0.0)),
        None => NOT_APPLICABLE.to_string(),
    }
}

/// Objective as a percentage, falling back to the threshold default.
pub fn objective_percent(slo_target: &str) -> f64 {
    percentage(slo_target).unwrap_or(DEFAULT_THRESHOLD_OBJECTIVE)
}

/// Objective as a fraction in `0..=1`, rounded to six decimals.
pub fn objective_fraction(slo_target: &str) -> f64 {
    round6(objective_percent(slo_target) / 100.0)
}

fn round6(v: f64) -> f64 {
    (v * 1_000_000.0).round() / 1_000_000.0
}

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(ms|s)\b").unwrap())
}

/// Latency threshold in seconds, e.g. `"< 150ms"` -> `0.15`.
pub fn threshold_seconds(target: &str) -> Option<f64> {
    let caps = duration_re().captures(target)?;
    let value: f64 = caps[1].parse().ok()?;
    let secs = match &caps[2] {
        "ms" => value / 1000.0,
        _ => value,
    };
    Some(round6(secs))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_parses_plain_and_marked() {
        assert_eq!(percentage("99.9%"), Some(99.9));
        assert_eq!(percentage("< 0.5%"), Some(0.5));
        assert_eq!(percentage("100%"), Some(100.0));
    }

    #[test]
    fn percentage_rejects_non_percent_targets() {
        for t in ["< 200ms", "> 1000 RPS", "< 80% utilization", "", "%", "abc%", "150%"] {
            assert_eq!(percentage(t), None, "{t}");
        }
    }

    #[test]
    fn error_budget_known_values() {
        assert_eq!(error_budget("99.9%"), "0.10%");
        assert_eq!(error_budget("99.95%"), "0.05%");
        assert_eq!(error_budget("99.99%"), "0.01%");
        assert_eq!(error_budget("100%"), "0.00%");
        assert_eq!(error_budget("99%"), "1.00%");
    }

    #[test]
    fn error_budget_falls_back_to_na() {
        assert_eq!(error_budget("< 150ms"), "N/A");
        assert_eq!(error_budget("> 1000 RPS"), "N/A");
        assert_eq!(error_budget("NaN%"), "N/A");
        assert_eq!(error_budget("inf%"), "N/A");
    }

    #[test]
    fn objective_fraction_is_rounded() {
        assert_eq!(objective_fraction("99.95%"), 0.9995);
        assert_eq!(objective_fraction("99.9%"), 0.999);
        assert_eq!(objective_fraction("100%"), 1.0);
        assert_eq!(objective_fraction("< 200ms"), 0.99);
    }

    #[test]
    fn threshold_seconds_from_latency_targets() {
        assert_eq!(threshold_seconds("< 150ms"), Some(0.15));
        assert_eq!(threshold_seconds("< 200ms"), Some(0.2));
        assert_eq!(threshold_seconds("< 2s"), Some(2.0));
        assert_eq!(threshold_seconds("99.9%"), None);
    }
}
