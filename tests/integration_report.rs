// tests/integration_report.rs
//! Report and log writing. Runs in its own process and changes the working
//! directory, so it stays a single test.

use std::fs;

use scoretree_core::config::Config;
use scoretree_core::forest::assemble;
use scoretree_core::record::{IssueMap, PeriodStamp, RawRecord, Score, TaggedScore};
use scoretree_core::report::{write_log, write_report};
use scoretree_core::runlog::RunLog;
use serde_json::Value;

fn record(org: &str, project: &str, score: f64) -> RawRecord {
    RawRecord {
        org_id: "org-1".to_string(),
        org_name: org.to_string(),
        project_id: format!("{org}-{project}"),
        project_name: project.to_string(),
        dates: vec![PeriodStamp {
            id: 0,
            label: "Jul 2026".to_string(),
        }],
        scores: vec![TaggedScore {
            id: 0,
            value: Score::Value(score),
        }],
        issues: vec![IssueMap::new()],
    }
}

#[test]
fn report_and_log_land_in_the_reports_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::env::set_current_dir(dir.path()).expect("enter tempdir");

    let config = Config {
        server_url: "https://comply.example.com".to_string(),
        auth_url: "https://auth.example.com/token".to_string(),
        client_id: "reporter".to_string(),
        username: None,
        password: None,
        history_months: Some(1),
        history_days: None,
        report_filename: "report.json".to_string(),
    };

    let records = vec![
        record("Acme", "Web", 90.0),
        record("Acme", "Mobile", 70.0),
    ];
    let forest = assemble(&records, 1).expect("assembly should succeed");

    let mut log = RunLog::new();
    log.push("Started");
    let location = write_report(&config, &forest, &mut log).expect("report written");
    let log_location = write_log(&log).expect("log written");

    assert_eq!(location, std::path::Path::new("reports/report.json"));
    let raw = fs::read_to_string(&location).expect("report readable");
    // Tab-indented for the existing consumers.
    assert!(raw.contains("\n\t{"));
    assert!(raw.contains("\n\t\t\"name\""));

    let doc: Vec<Value> = serde_json::from_str(&raw).expect("report parses");
    assert_eq!(doc.len(), 2);
    assert_eq!(doc[0]["name"], "Acme");
    assert_eq!(doc[0]["scores"][0], Value::from(80.0));
    assert_eq!(doc[1]["_url"], "https://comply.example.com");

    let log_text = fs::read_to_string(&log_location).expect("log readable");
    assert!(log_text.contains("Started"));
    assert!(log_text.contains("Report generated in"));
}
