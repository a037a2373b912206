use crate::cmd::answers::AnswerArgs;
use crate::output::{print_json, print_section, print_table};
use slo_core::recommend::{Recommendations, RulesEngine};

pub fn run(args: &AnswerArgs, json: bool) -> anyhow::Result<()> {
    let answers = args.resolve()?;
    let recs = RulesEngine::default().derive(&answers);

    if json {
        return print_json(&recs);
    }
    print_summary(&recs);
    Ok(())
}

pub fn print_summary(recs: &Recommendations) {
    println!("Business criticality: {}", recs.criticality);

    print_section("SLI Recommendations");
    if recs.slis.is_empty() {
        println!("No SLIs matched. Answer the service type and user concern questions first.");
    } else {
        let rows = recs
            .slis
            .iter()
            .enumerate()
            .map(|(i, sli)| {
                vec![
                    (i + 1).to_string(),
                    sli.name.clone(),
                    sli.kind.to_string(),
                    sli.target.clone(),
                    sli.priority.to_string(),
                ]
            })
            .collect();
        print_table(&["#", "NAME", "KIND", "TARGET", "PRIORITY"], rows);
    }

    if !recs.slos.is_empty() {
        print_section("SLO Targets");
        let rows = recs
            .slos
            .iter()
            .map(|slo| {
                vec![
                    slo.sli.name.clone(),
                    slo.slo_target.clone(),
                    slo.error_budget.clone(),
                    slo.measurement_window.clone(),
                ]
            })
            .collect();
        print_table(&["NAME", "TARGET", "ERROR BUDGET", "WINDOW"], rows);
    }

    print_section("Implementation");
    let rows = recs
        .implementation
        .iter()
        .map(|rec| {
            vec![
                rec.title.clone(),
                rec.category.clone(),
                rec.priority.to_string(),
                rec.timeline.clone(),
            ]
        })
        .collect();
    print_table(&["TITLE", "CATEGORY", "PRIORITY", "TIMELINE"], rows);
}
