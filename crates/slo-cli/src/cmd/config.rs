use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use slo_core::config::{self, Config, ConfigWarning, WarnLevel};
use slo_core::export::ExportFormat;
use slo_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration (defaults filled in)
    Show,

    /// Validate slo-navigator.yaml for common mistakes
    Validate,

    /// Write a slo-navigator.yaml with default values
    Init {
        /// Service label for generated queries
        #[arg(long)]
        service: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::Init { service, force } => init(root, service, force),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }

    let mut rows = vec![
        vec![
            "service".to_string(),
            config
                .service
                .clone()
                .unwrap_or_else(|| "(first selected service type)".to_string()),
        ],
        vec!["owner".to_string(), config.owner.clone()],
        vec!["runbook_base_url".to_string(), config.runbook_base_url.clone()],
        vec!["rate_window".to_string(), config.rate_window.clone()],
    ];
    for format in ExportFormat::all() {
        rows.push(vec![
            format!("output.{format}"),
            config.output.filename_for(*format).to_string(),
        ]);
    }
    print_table(&["KEY", "VALUE"], rows);
    Ok(())
}

/// One line per finding, e.g. `[error] rate_window 'x' is not ...`.
pub fn finding_line(w: &ConfigWarning) -> String {
    let prefix = match w.level {
        WarnLevel::Warning => "warning",
        WarnLevel::Error => "error",
    };
    format!("[{prefix}] {}", w.message)
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        print_json(&serde_json::json!({ "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        warnings.iter().map(finding_line).for_each(|l| println!("{l}"));
    }

    if config::has_errors(&warnings) {
        anyhow::bail!("config validation found errors");
    }
    Ok(())
}

fn init(root: &Path, service: Option<String>, force: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let config = Config {
        service,
        ..Config::default()
    };
    config
        .save(root)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finding_line_prefixes_level() {
        let w = ConfigWarning {
            level: WarnLevel::Error,
            message: "rate_window 'five' is not a Prometheus duration like 5m".to_string(),
        };
        assert_eq!(
            finding_line(&w),
            "[error] rate_window 'five' is not a Prometheus duration like 5m"
        );
        let w = ConfigWarning {
            level: WarnLevel::Warning,
            message: "owner is empty".to_string(),
        };
        assert_eq!(finding_line(&w), "[warning] owner is empty");
    }
}
