use crate::output::{print_json, print_section, print_table};
use serde::Serialize;
use slo_core::catalog::{self, Question};
use slo_core::types::Category;

#[derive(Serialize)]
struct OptionOut<'a> {
    id: &'a str,
    label: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct QuestionOut<'a> {
    category: Category,
    title: &'a str,
    subtitle: &'a str,
    options: Vec<OptionOut<'a>>,
}

fn to_output(q: &Question) -> QuestionOut<'_> {
    QuestionOut {
        category: q.category,
        title: q.title,
        subtitle: q.subtitle,
        options: q
            .options
            .iter()
            .map(|o| OptionOut {
                id: o.id,
                label: o.label,
                description: o.description,
            })
            .collect(),
    }
}

pub fn run(category: Option<&str>, json: bool) -> anyhow::Result<()> {
    let selected: Vec<&Question> = match category {
        Some(c) => vec![catalog::question(c.parse::<Category>()?)],
        None => catalog::questions().iter().collect(),
    };

    if json {
        let out: Vec<QuestionOut> = selected.iter().map(|q| to_output(q)).collect();
        return print_json(&out);
    }

    for q in selected {
        print_section(&format!(
            "{}. {} [{}]",
            q.category.index() + 1,
            q.title,
            q.category
        ));
        println!("{}\n", q.subtitle);
        let rows = q
            .options
            .iter()
            .map(|o| {
                vec![
                    o.id.to_string(),
                    o.label.to_string(),
                    o.description.to_string(),
                ]
            })
            .collect();
        print_table(&["ID", "OPTION", "DESCRIPTION"], rows);
    }
    Ok(())
}
