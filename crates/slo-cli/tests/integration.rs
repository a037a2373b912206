#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn navigator(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slo-navigator").unwrap();
    cmd.current_dir(dir.path())
        .env("SLO_NAVIGATOR_ROOT", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn json_output(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

const CRITICAL_DB: [&str; 4] = [
    "--service-type",
    "database",
    "--concerns",
    "availability,response_time",
];

// ---------------------------------------------------------------------------
// questions
// ---------------------------------------------------------------------------

#[test]
fn questions_lists_all_categories() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("service_type"))
        .stdout(predicate::str::contains("revenue_loss"))
        .stdout(predicate::str::contains("apm_tools"));
}

#[test]
fn questions_json_single_category() {
    let dir = TempDir::new().unwrap();
    let v = json_output(navigator(&dir).args(["--json", "questions", "--category", "user-concerns"]));
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["category"], "user_concerns");
    assert_eq!(list[0]["options"][0]["id"], "availability");
}

#[test]
fn questions_unknown_category_fails() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["questions", "--category", "vibes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question category"));
}

// ---------------------------------------------------------------------------
// recommend
// ---------------------------------------------------------------------------

#[test]
fn recommend_json_escalates_for_revenue_loss() {
    let dir = TempDir::new().unwrap();
    let v = json_output(
        navigator(&dir)
            .args(["--json", "recommend"])
            .args(CRITICAL_DB)
            .args(["--impact", "revenue_loss"]),
    );
    assert_eq!(v["criticality"], "critical");
    let slos = v["slos"].as_array().unwrap();
    assert_eq!(slos.len(), v["slis"].as_array().unwrap().len());
    assert_eq!(slos[0]["name"], "Availability");
    assert_eq!(slos[0]["slo_target"], "99.95%");
    assert_eq!(slos[0]["error_budget"], "0.05%");
    assert_eq!(slos[2]["slo_target"], "< 150ms");
    assert_eq!(slos[2]["error_budget"], "N/A");
    assert_eq!(slos[3]["kind"], "durability");
    assert_eq!(v["implementation"].as_array().unwrap().len(), 4);
}

#[test]
fn recommend_empty_answers() {
    let dir = TempDir::new().unwrap();
    let v = json_output(navigator(&dir).args(["--json", "recommend"]));
    assert!(v["slis"].as_array().unwrap().is_empty());
    assert!(v["slos"].as_array().unwrap().is_empty());
    assert_eq!(v["implementation"].as_array().unwrap().len(), 4);
}

#[test]
fn recommend_reads_answers_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("mine.yaml");
    std::fs::write(
        &file,
        "user_concerns: [availability]\nrespondent_role: [apm_tools, automated_ops]\n",
    )
    .unwrap();
    let v = json_output(
        navigator(&dir)
            .args(["--json", "recommend", "--answers"])
            .arg(&file),
    );
    assert_eq!(v["slos"][0]["slo_target"], "99.9%");
    assert_eq!(v["slos"][1]["name"], "Error Rate");
    let titles: Vec<&str> = v["implementation"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Set up SLO alerting", "Write runbooks"]);
}

#[test]
fn recommend_rejects_unknown_option() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["recommend", "--concerns", "availability,vibes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown option 'vibes'"));
}

#[test]
fn recommend_text_output() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .arg("recommend")
        .args(CRITICAL_DB)
        .assert()
        .success()
        .stdout(predicate::str::contains("Business criticality: medium"))
        .stdout(predicate::str::contains("Durability"))
        .stdout(predicate::str::contains("Deploy APM tooling"));
}

// ---------------------------------------------------------------------------
// export
// ---------------------------------------------------------------------------

#[test]
fn export_all_writes_every_file() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["export", "all"])
        .args(CRITICAL_DB)
        .assert()
        .success();

    for file in ["openslo.yaml", "sloth.yaml", "slo-report.md", "slo-report.pdf"] {
        assert!(dir.path().join(file).exists(), "{file} missing");
    }
    let pdf = std::fs::read(dir.path().join("slo-report.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-1.4"));
    assert!(pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn export_respects_out_dir_and_config_names() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("slo-navigator.yaml"),
        "service: checkout\noutput:\n  markdown: report.md\n",
    )
    .unwrap();
    navigator(&dir)
        .args(["export", "markdown", "--out", "build"])
        .args(CRITICAL_DB)
        .assert()
        .success();

    let md = std::fs::read_to_string(dir.path().join("build/report.md")).unwrap();
    assert!(md.starts_with("# SLO Strategy Report"));
    assert!(md.contains("http_requests_total{service=\"checkout\""));
}

#[test]
fn export_json_reports_content_types() {
    let dir = TempDir::new().unwrap();
    let v = json_output(
        navigator(&dir)
            .args(["--json", "export", "all"])
            .args(CRITICAL_DB),
    );
    let written = v.as_array().unwrap();
    assert_eq!(written.len(), 4);
    assert_eq!(written[0]["format"], "openslo");
    assert_eq!(written[0]["content_type"], "application/yaml");
    assert_eq!(written[3]["file"], "slo-report.pdf");
    assert_eq!(written[3]["content_type"], "application/pdf");
}

#[test]
fn export_escapes_quoted_service_label() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("slo-navigator.yaml"),
        "service: 'pay\"ments'\n",
    )
    .unwrap();
    let output = navigator(&dir)
        .args(["export", "sloth", "--stdout"])
        .args(CRITICAL_DB)
        .output()
        .unwrap();
    assert!(output.status.success());
    let sloth: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(
        sloth["slos"][0]["sli"]["events"]["total_query"],
        "sum(rate(http_requests_total{service=\"pay\\\"ments\"}[5m]))"
    );
}

#[test]
fn export_openslo_to_stdout() {
    let dir = TempDir::new().unwrap();
    let output = navigator(&dir)
        .args(["export", "openslo", "--stdout"])
        .args(CRITICAL_DB)
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let docs: Vec<serde_yaml::Value> = text
        .split("---\n")
        .map(|d| serde_yaml::from_str(d).unwrap())
        .collect();
    assert_eq!(docs.len(), 4);
    assert_eq!(docs[0]["metadata"]["name"], "database-availability");
    assert!(!dir.path().join("openslo.yaml").exists());
}

#[test]
fn export_sloth_total_queries_match_openslo() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["export", "all"])
        .args(CRITICAL_DB)
        .assert()
        .success();

    let openslo = std::fs::read_to_string(dir.path().join("openslo.yaml")).unwrap();
    let sloth: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(dir.path().join("sloth.yaml")).unwrap())
            .unwrap();
    let docs: Vec<serde_yaml::Value> = openslo
        .split("---\n")
        .map(|d| serde_yaml::from_str(d).unwrap())
        .collect();
    let entries = sloth["slos"].as_sequence().unwrap();
    assert_eq!(docs.len(), entries.len());
    for (doc, entry) in docs.iter().zip(entries) {
        assert_eq!(
            doc["spec"]["indicator"]["spec"]["ratioMetric"]["total"]["metricSource"]["spec"]
                ["query"],
            entry["sli"]["events"]["total_query"]
        );
    }
}

#[test]
fn export_all_to_stdout_is_refused() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["export", "all", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stdout needs a single format"));
}

#[test]
fn export_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["export", "docx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown export format"));
}

#[test]
fn export_refuses_invalid_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("slo-navigator.yaml"), "rate_window: five\n").unwrap();
    navigator(&dir)
        .args(["export", "sloth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config validation found errors"));
}

// ---------------------------------------------------------------------------
// wizard
// ---------------------------------------------------------------------------

#[test]
fn wizard_prints_summary_and_exports() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["wizard", "--export-dir", "out"])
        .write_stdin("api\n\n1\n\nrevenue_loss\n\ncloud_native\n\nsre,apm_tools\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[5/5]"))
        .stdout(predicate::str::contains("Business criticality: critical"))
        .stdout(predicate::str::contains("99.95%"))
        .stdout(predicate::str::contains("Automate operations"))
        .stdout(predicate::str::contains("Deploy APM tooling").not());

    let md = std::fs::read_to_string(dir.path().join("out/slo-report.md")).unwrap();
    assert!(md.contains("- **Service Type**: api"));
    assert!(dir.path().join("out/slo-report.pdf").exists());
    assert!(!dir.path().join("answers.yaml").exists());
}

#[test]
fn wizard_fails_on_truncated_input() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .arg("wizard")
        .write_stdin("web\n\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_init_then_validate() {
    let dir = TempDir::new().unwrap();
    navigator(&dir)
        .args(["config", "init", "--service", "payments"])
        .assert()
        .success();
    let saved = std::fs::read_to_string(dir.path().join("slo-navigator.yaml")).unwrap();
    assert!(saved.contains("service: payments"));

    navigator(&dir)
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config is valid"));

    navigator(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("slo-navigator.yaml"),
        "runbook_base_url: runbooks.local\n",
    )
    .unwrap();
    navigator(&dir)
        .args(["config", "validate"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[error] runbook_base_url"));
}
