//! Tests for report rendering

use crate::test_utils::*;
use wiring_domain::{DiagnosticsConfig, Lifetime, Severity};
use wiring_validate::{
    AnalysisConfig, AnalysisReport, AnalysisSummary, Analyzer, ClassDeclaration, Reporter,
};

fn snapshot() -> Vec<ClassDeclaration> {
    vec![
        declaration("App.ReportCache")
            .lifetime(Lifetime::Singleton)
            .depends_on(&["App.IDbContext"])
            .build(),
        declaration("App.DbContext")
            .contracts(&["App.IDbContext"])
            .lifetime(Lifetime::Scoped)
            .build(),
        declaration("Jobs.CleanupWorker").worker().build(),
        declaration("App.RedisCache")
            .contracts(&["App.ICache"])
            .lifetime(Lifetime::Singleton)
            .condition(environment("Production"))
            .build(),
    ]
}

#[test]
fn test_summary_counts() {
    let output = analyze(&snapshot());
    let summary = AnalysisSummary::of(&output);

    assert_eq!(summary.total_directives, 6);
    assert_eq!(summary.total_diagnostics, 1);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.by_category.get("lifetime_violation"), Some(&1));
    assert!(!summary.passed);
}

#[test]
fn test_human_readable_report() {
    let output = analyze(&snapshot());
    let report = AnalysisReport::new("snapshot.json", &output);
    let text = Reporter::to_human_readable(&report);

    assert!(text.starts_with("=== Wiring Analysis Report ==="));
    assert!(text.contains("Snapshot:  snapshot.json"));
    assert!(text.contains("Status: FAILED"));
    assert!(text.contains("--- Registration Plan ---"));
    assert!(text.contains("App.ReportCache -> App.ReportCache (Singleton)"));
    assert!(text.contains("Jobs.CleanupWorker -> Jobs.CleanupWorker (Singleton) [hosted]"));
    assert!(text.contains("App.ICache -> App.RedisCache (Singleton) when environment in [Production]"));
    assert!(text.contains("--- Generated Constructor Fields ---"));
    assert!(text.contains("_dbContext <- App.IDbContext"));
    assert!(text.contains("[ERROR] LIF001"));
}

#[test]
fn test_hidden_diagnostics_are_not_printed() {
    let analyzer = Analyzer::new(AnalysisConfig::default()).with_diagnostics_config(
        DiagnosticsConfig::default().with_override("LIF001", Severity::Hidden),
    );
    let output = analyzer.analyze(&snapshot()).unwrap();
    let report = AnalysisReport::new("snapshot.json", &output);
    let text = Reporter::to_human_readable(&report);

    assert!(report.summary.passed);
    assert_eq!(report.summary.hidden, 1);
    assert!(text.contains("Status: PASSED"));
    assert!(!text.contains("--- Diagnostics ---"));
}

#[test]
fn test_json_report() {
    let output = analyze(&snapshot());
    let report = AnalysisReport::new("snapshot.json", &output);
    let json: serde_json::Value = serde_json::from_str(&Reporter::to_json(&report)).unwrap();

    assert_eq!(json["source"], "snapshot.json");
    assert_eq!(json["summary"]["errors"], 1);
    assert_eq!(json["diagnostics"][0]["code"], "LIF001");
    assert_eq!(json["diagnostics"][0]["severity"], "error");
    assert!(
        chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok()
    );
}
