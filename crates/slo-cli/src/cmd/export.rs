use crate::cmd::answers::AnswerArgs;
use crate::cmd::config::finding_line;
use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use slo_core::answers::AnswerSet;
use slo_core::config::{self, Config};
use slo_core::deliver::{Delivery, FsDelivery};
use slo_core::export::{self, ExportContext, ExportFormat, Report};
use slo_core::recommend;
use slo_core::NavigatorError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// ExportTarget
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    One(ExportFormat),
    All,
}

impl ExportTarget {
    pub fn formats(self) -> Vec<ExportFormat> {
        match self {
            ExportTarget::One(f) => vec![f],
            ExportTarget::All => ExportFormat::all().to_vec(),
        }
    }
}

impl FromStr for ExportTarget {
    type Err = NavigatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(ExportTarget::All)
        } else {
            s.parse().map(ExportTarget::One)
        }
    }
}

// ---------------------------------------------------------------------------
// Stdout sink
// ---------------------------------------------------------------------------

struct StdoutDelivery;

impl Delivery for StdoutDelivery {
    fn deliver_text(&self, filename: &str, content: &str) -> slo_core::Result<()> {
        self.deliver_bytes(filename, content.as_bytes())
    }

    fn deliver_bytes(&self, _filename: &str, content: &[u8]) -> slo_core::Result<()> {
        let mut out = std::io::stdout().lock();
        out.write_all(content)?;
        out.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared export pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct Written {
    pub format: ExportFormat,
    pub content_type: &'static str,
    pub file: String,
    pub bytes: usize,
}

/// Load config, refusing configs with errors; warnings are logged.
pub fn load_config(root: &Path) -> anyhow::Result<Config> {
    let config = Config::load(root).context("failed to load slo-navigator.yaml")?;
    let warnings = config.validate();
    for w in &warnings {
        if w.is_error() {
            tracing::error!("{}", finding_line(w));
        } else {
            tracing::warn!("{}", finding_line(w));
        }
    }
    if config::has_errors(&warnings) {
        anyhow::bail!("config validation found errors; run `slo-navigator config validate`");
    }
    Ok(config)
}

/// Render each format for `answers` and hand it to `sink`.
pub fn deliver_all(
    config: &Config,
    answers: &AnswerSet,
    formats: &[ExportFormat],
    sink: &dyn Delivery,
) -> anyhow::Result<Vec<Written>> {
    let recs = recommend::derive(answers);
    let ctx = ExportContext::from_config(config, answers);
    let report = Report {
        answers,
        recommendations: &recs,
        context: &ctx,
        generated_at: Utc::now(),
    };

    let mut written = Vec::new();
    for &format in formats {
        let rendered = export::render(format, &report)
            .with_context(|| format!("failed to render {format}"))?;
        let file = config.output.filename_for(format).to_string();
        sink.deliver(&file, &rendered)
            .with_context(|| format!("failed to write {file}"))?;
        written.push(Written {
            format,
            content_type: format.content_type(),
            bytes: rendered.as_bytes().len(),
            file,
        });
    }
    Ok(written)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(
    root: &Path,
    target: ExportTarget,
    args: &AnswerArgs,
    out: Option<&Path>,
    stdout: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = load_config(root)?;
    let answers = args.resolve()?;
    let formats = target.formats();

    if stdout {
        if formats.len() != 1 {
            anyhow::bail!("--stdout needs a single format, not 'all'");
        }
        deliver_all(&config, &answers, &formats, &StdoutDelivery)?;
        return Ok(());
    }

    let out_dir: PathBuf = out.map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    let sink = FsDelivery::new(&out_dir);
    let written = deliver_all(&config, &answers, &formats, &sink)?;

    if json {
        print_json(&written)?;
    } else {
        for w in &written {
            println!("wrote {} ({} bytes)", sink.path_for(&w.file).display(), w.bytes);
        }
    }
    Ok(())
}
