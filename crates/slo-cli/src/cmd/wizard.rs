use crate::cmd::export::{deliver_all, load_config};
use crate::cmd::recommend::print_summary;
use anyhow::Context;
use slo_core::answers::AnswerSet;
use slo_core::catalog::Question;
use slo_core::deliver::FsDelivery;
use slo_core::export::ExportFormat;
use slo_core::wizard::Wizard;
use std::io::{BufRead, Write};
use std::path::Path;

const PROMPT: &str =
    "Select by number or id (comma separated), empty line to continue, 'back' or 'quit':";

fn show_question<W: Write>(out: &mut W, wizard: &Wizard, q: &Question) -> std::io::Result<()> {
    let (current, total) = wizard.progress();
    writeln!(out, "\n[{current}/{total}] {}", q.title)?;
    writeln!(out, "{}", q.subtitle)?;
    for (i, o) in q.options.iter().enumerate() {
        let mark = if wizard.answers().contains(q.category, o.id) {
            "x"
        } else {
            " "
        };
        writeln!(
            out,
            "  {:>2}. [{mark}] {} ({}) - {}",
            i + 1,
            o.label,
            o.id,
            o.description
        )?;
    }
    writeln!(out, "{PROMPT}")?;
    out.flush()
}

/// `"2"` -> second option id; anything else is taken as an id.
fn option_id<'a>(q: &'a Question, token: &'a str) -> &'a str {
    match token.parse::<usize>() {
        Ok(n) if (1..=q.options.len()).contains(&n) => q.options[n - 1].id,
        _ => token,
    }
}

/// Run the questionnaire over line-oriented input until the results are
/// reached. Input ending early is an error.
pub fn drive<R: BufRead, W: Write>(input: R, out: &mut W) -> anyhow::Result<AnswerSet> {
    let mut wizard = Wizard::new();
    let mut lines = input.lines();

    while !wizard.show_results() {
        let q = wizard.current_question();
        show_question(out, &wizard, q)?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input ended before the questionnaire was finished");
        };
        let line = line.context("failed to read answer")?;

        match line.trim() {
            "" => {
                if let Err(e) = wizard.next() {
                    writeln!(out, "{e}")?;
                }
            }
            "back" | "b" => {
                if !wizard.back() {
                    writeln!(out, "Already at the first question.")?;
                }
            }
            "quit" | "q" => anyhow::bail!("wizard cancelled"),
            tokens => {
                for token in tokens.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    if let Err(e) = wizard.toggle(option_id(q, token)) {
                        writeln!(out, "{e}")?;
                    }
                }
            }
        }
    }

    Ok(wizard.into_answers())
}

pub fn run(root: &Path, export_dir: Option<&Path>) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let answers = {
        let mut stdout = std::io::stdout().lock();
        drive(stdin.lock(), &mut stdout)?
    };

    println!();
    print_summary(&slo_core::recommend::derive(&answers));

    if let Some(dir) = export_dir {
        let config = load_config(root)?;
        let sink = FsDelivery::new(dir);
        for w in deliver_all(&config, &answers, ExportFormat::all(), &sink)? {
            println!("wrote {}", sink.path_for(&w.file).display());
        }
    }
    Ok(())
}
