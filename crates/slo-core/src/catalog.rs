use crate::types::Category;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Question catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuestionOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub category: Category,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn option(&self, id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Position of `id` in the option list, used to echo answers in a stable order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.options.iter().position(|o| o.id == id)
    }
}

macro_rules! opt {
    ($id:expr, $label:expr, $desc:expr) => {
        QuestionOption {
            id: $id,
            label: $label,
            description: $desc,
        }
    };
}

static QUESTIONS: [Question; 5] = [
    Question {
        category: Category::ServiceType,
        title: "What kind of service is this? (select all that apply)",
        subtitle: "Service characteristics decide which reliability targets make sense",
        options: &[
            opt!("web", "Web frontend", "Websites, web APIs, frontend applications"),
            opt!("mobile", "Mobile service", "Mobile apps and their backend APIs"),
            opt!("database", "Database", "MySQL, MongoDB, Redis"),
            opt!("microservice", "Microservices", "Distributed, containerised services"),
            opt!("api", "API service", "REST, GraphQL, gRPC"),
            opt!("infrastructure", "Desktop application", "WinAPI, Linux or macOS native software"),
            opt!("backend", "Backend platform", "Cloud services, CDN, load balancing, batch jobs"),
        ],
    },
    Question {
        category: Category::UserConcerns,
        title: "What do users care about most? (select all that apply)",
        subtitle: "Identify the user-facing experience indicators",
        options: &[
            opt!("availability", "Availability", "The service is reachable and does not go down"),
            opt!("response_time", "Response time", "Request handling speed, page load time"),
            opt!("data_accuracy", "Data accuracy", "Data is correct and consistent"),
            opt!("user_experience", "User experience", "Key user journeys complete smoothly"),
            opt!("security", "Security", "Data security and privacy"),
            opt!("performance", "Performance", "Capacity and concurrency headroom"),
        ],
    },
    Question {
        category: Category::BusinessImpact,
        title: "How does an outage affect the business? (select all that apply)",
        subtitle: "Weigh the cost of failure to pick sensible objectives",
        options: &[
            opt!("productivity_loss", "Lost productivity", "Internal teams cannot work efficiently"),
            opt!("revenue_loss", "Direct revenue loss", "Sales, transactions or paying users are affected"),
            opt!("customer_churn", "Customer churn", "Poor experience drives customers away"),
            opt!("reputation_damage", "Reputation damage", "Brand and market trust suffer"),
            opt!("operational_cost", "Operational cost", "Extra staff time is needed to handle incidents"),
            opt!("compliance_risk", "Compliance risk", "Regulatory requirements or SLA breaches"),
        ],
    },
    Question {
        category: Category::TechnicalRequirements,
        title: "Any additional environment or requirements? (select all that apply)",
        subtitle: "Make sure the indicators can actually be measured and enforced",
        options: &[
            opt!("cloud_native", "Cloud native", "Kubernetes, Docker, microservices"),
            opt!("legacy_system", "Legacy system", "Monoliths on physical servers"),
            opt!("hybrid_cloud", "Hybrid cloud", "Public plus private cloud"),
            opt!("high_availability", "High availability", "99.9%+ availability requirement"),
            opt!("scalability", "Elastic scaling", "Needs automatic scale out and in"),
            opt!("real_time", "Real time", "Low latency, real-time data processing"),
        ],
    },
    Question {
        category: Category::MonitoringCapability,
        title: "Who are you, and what tooling do you already have? (select all that apply)",
        subtitle: "Different roles need different things from an SLO",
        options: &[
            opt!("end_user", "End user", "Uses the product or service"),
            opt!("pm", "Product manager", "Owns product planning"),
            opt!("developer", "Developer", "Builds and ships the software"),
            opt!("ops", "Operations", "Runs and maintains the systems"),
            opt!("sre", "SRE", "Site reliability engineer focused on reliability"),
            opt!("basic_logging", "Basic logging", "Logs are collected but not analysed"),
            opt!("apm_tools", "APM tooling", "Prometheus, Grafana, Datadog or similar are in place"),
            opt!("automated_ops", "Automated operations", "CI/CD with automated deploy and rollback"),
        ],
    },
];

/// All questions in wizard order.
pub fn questions() -> &'static [Question] {
    &QUESTIONS
}

pub fn question(category: Category) -> &'static Question {
    &QUESTIONS[category.index()]
}

pub fn is_known_option(category: Category, id: &str) -> bool {
    question(category).option(id).is_some()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn one_question_per_category_in_order() {
        assert_eq!(questions().len(), Category::all().len());
        for (q, c) in questions().iter().zip(Category::all()) {
            assert_eq!(q.category, *c);
            assert_eq!(question(*c).category, *c);
        }
    }

    #[test]
    fn option_ids_are_unique_within_a_question() {
        for q in questions() {
            let ids: HashSet<_> = q.options.iter().map(|o| o.id).collect();
            assert_eq!(ids.len(), q.options.len(), "duplicate id in {}", q.category);
        }
    }

    #[test]
    fn rule_trigger_options_exist() {
        assert!(is_known_option(Category::UserConcerns, "availability"));
        assert!(is_known_option(Category::BusinessImpact, "revenue_loss"));
        assert!(is_known_option(Category::ServiceType, "database"));
        assert!(is_known_option(Category::MonitoringCapability, "apm_tools"));
        assert!(is_known_option(Category::MonitoringCapability, "automated_ops"));
        assert!(!is_known_option(Category::ServiceType, "availability"));
    }
}
