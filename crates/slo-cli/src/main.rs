mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{answers::AnswerArgs, config::ConfigSubcommand, export::ExportTarget};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "slo-navigator",
    about = "Guided SLO questionnaire: answer five questions, get SLIs, SLOs and monitoring config",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from slo-navigator.yaml or .git/)
    #[arg(long, global = true, env = "SLO_NAVIGATOR_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the questionnaire and its option ids
    Questions {
        /// Only show one category (e.g. user_concerns)
        #[arg(long)]
        category: Option<String>,
    },

    /// Derive SLIs, SLOs and implementation advice from answers
    Recommend {
        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Render recommendations as OpenSLO, Sloth, Markdown or PDF
    Export {
        /// openslo, sloth, markdown, pdf or all
        format: ExportTarget,

        #[command(flatten)]
        answers: AnswerArgs,

        /// Output directory (default: project root)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write to stdout instead of files
        #[arg(long, conflicts_with = "out")]
        stdout: bool,
    },

    /// Answer the questionnaire interactively on stdin
    Wizard {
        /// Also write every export format into this directory when done
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Inspect or create slo-navigator.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Questions { category } => cmd::questions::run(category.as_deref(), cli.json),
        Commands::Recommend { answers } => cmd::recommend::run(&answers, cli.json),
        Commands::Export {
            format,
            answers,
            out,
            stdout,
        } => cmd::export::run(&root, format, &answers, out.as_deref(), stdout, cli.json),
        Commands::Wizard { export_dir } => cmd::wizard::run(&root, export_dir.as_deref()),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
