use anyhow::Context;
use clap::Args;
use slo_core::{answers::AnswerSet, types::Category};
use std::path::PathBuf;

/// Where answers come from: an optional YAML file, with any per-category
/// flags replacing that category wholesale.
#[derive(Args, Debug, Default)]
pub struct AnswerArgs {
    /// YAML answers file, keyed by category id
    #[arg(long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Service types, comma separated (e.g. web,api)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub service_type: Vec<String>,

    /// What users care about (e.g. availability,response_time)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub concerns: Vec<String>,

    /// Business impact of an outage (e.g. revenue_loss)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub impact: Vec<String>,

    /// Technical requirements (e.g. cloud_native,real_time)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub requirements: Vec<String>,

    /// Roles and existing tooling (e.g. sre,apm_tools)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub capability: Vec<String>,
}

impl AnswerArgs {
    fn overrides(&self) -> [(Category, &[String]); 5] {
        [
            (Category::ServiceType, self.service_type.as_slice()),
            (Category::UserConcerns, self.concerns.as_slice()),
            (Category::BusinessImpact, self.impact.as_slice()),
            (Category::TechnicalRequirements, self.requirements.as_slice()),
            (Category::MonitoringCapability, self.capability.as_slice()),
        ]
    }

    pub fn resolve(&self) -> anyhow::Result<AnswerSet> {
        let mut answers = match &self.answers {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading answers");
                AnswerSet::load(path)
                    .with_context(|| format!("failed to read answers from {}", path.display()))?
            }
            None => AnswerSet::new(),
        };

        for (category, ids) in self.overrides() {
            let ids: Vec<&str> = ids
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            if !ids.is_empty() {
                answers.set(category, ids);
            }
        }

        answers.validate().context("invalid answers")?;
        Ok(answers)
    }
}
