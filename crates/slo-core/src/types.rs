use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A question category. Declaration order is the wizard step order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ServiceType,
    UserConcerns,
    BusinessImpact,
    TechnicalRequirements,
    #[serde(alias = "respondent_role")]
    MonitoringCapability,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::ServiceType,
            Category::UserConcerns,
            Category::BusinessImpact,
            Category::TechnicalRequirements,
            Category::MonitoringCapability,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(i: usize) -> Option<Category> {
        Category::all().get(i).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::ServiceType => "service_type",
            Category::UserConcerns => "user_concerns",
            Category::BusinessImpact => "business_impact",
            Category::TechnicalRequirements => "technical_requirements",
            Category::MonitoringCapability => "monitoring_capability",
        }
    }

    /// Label used when echoing answers in reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::ServiceType => "Service Type",
            Category::UserConcerns => "User Concerns",
            Category::BusinessImpact => "Business Impact",
            Category::TechnicalRequirements => "Technical Requirements",
            Category::MonitoringCapability => "Monitoring Capability",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "service_type" | "service-type" => Ok(Category::ServiceType),
            "user_concerns" | "user-concerns" => Ok(Category::UserConcerns),
            "business_impact" | "business-impact" => Ok(Category::BusinessImpact),
            "technical_requirements" | "technical-requirements" => {
                Ok(Category::TechnicalRequirements)
            }
            "monitoring_capability" | "monitoring-capability" | "respondent_role"
            | "respondent-role" => Ok(Category::MonitoringCapability),
            _ => Err(crate::error::NavigatorError::UnknownCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MetricKind
// ---------------------------------------------------------------------------

/// What an SLI measures. Query resolution and SLO escalation key on this,
/// never on the display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Availability,
    Latency,
    Correctness,
    Throughput,
    ErrorRate,
    Saturation,
    JourneySuccess,
    JobSuccess,
    Durability,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Availability => "availability",
            MetricKind::Latency => "latency",
            MetricKind::Correctness => "correctness",
            MetricKind::Throughput => "throughput",
            MetricKind::ErrorRate => "error_rate",
            MetricKind::Saturation => "saturation",
            MetricKind::JourneySuccess => "journey_success",
            MetricKind::JobSuccess => "job_success",
            MetricKind::Durability => "durability",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Criticality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Critical,
    High,
    Medium,
}

impl Criticality {
    pub fn as_str(self) -> &'static str {
        match self {
            Criticality::Critical => "critical",
            Criticality::High => "high",
            Criticality::Medium => "medium",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_wizard_steps() {
        for (i, c) in Category::all().iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Category::from_index(i), Some(*c));
        }
        assert_eq!(Category::from_index(5), None);
    }

    #[test]
    fn category_parses_both_spellings() {
        assert_eq!(
            "service-type".parse::<Category>().unwrap(),
            Category::ServiceType
        );
        assert_eq!(
            "respondent_role".parse::<Category>().unwrap(),
            Category::MonitoringCapability
        );
        assert!("colour".parse::<Category>().is_err());
    }

    #[test]
    fn category_yaml_alias() {
        let c: Category = serde_yaml::from_str("respondent_role").unwrap();
        assert_eq!(c, Category::MonitoringCapability);
        assert_eq!(
            serde_yaml::to_string(&c).unwrap().trim(),
            "monitoring_capability"
        );
    }

    #[test]
    fn metric_kind_serializes_snake_case() {
        let json = serde_json::to_string(&MetricKind::JourneySuccess).unwrap();
        assert_eq!(json, "\"journey_success\"");
    }
}
