//! Tests for incremental re-analysis

use crate::test_utils::*;
use wiring_domain::Lifetime;
use wiring_validate::{AnalysisConfig, Analyzer, ClassDeclaration, IncrementalAnalyzer, PassStats};

fn snapshot(base_dependency: &str) -> Vec<ClassDeclaration> {
    vec![
        declaration("App.CachingBase")
            .abstract_class()
            .depends_on(&[base_dependency])
            .build(),
        declaration("App.ReportCache")
            .base("App.CachingBase")
            .lifetime(Lifetime::Singleton)
            .build(),
        declaration("App.DbContext")
            .contracts(&["App.IDbContext"])
            .lifetime(Lifetime::Scoped)
            .build(),
    ]
}

fn incremental() -> IncrementalAnalyzer {
    IncrementalAnalyzer::new(Analyzer::new(AnalysisConfig::default()))
}

#[test]
fn test_first_pass_evaluates_everything() {
    let mut analyzer = incremental();

    analyzer.analyze(&snapshot("App.IDbContext")).unwrap();
    assert_eq!(
        analyzer.last_pass(),
        PassStats {
            evaluated: 3,
            reused: 0
        }
    );
}

#[test]
fn test_unchanged_snapshot_is_reused() {
    let mut analyzer = incremental();
    let inputs = snapshot("App.IDbContext");

    let first = analyzer.analyze(&inputs).unwrap();
    let second = analyzer.analyze(&inputs).unwrap();

    assert_eq!(analyzer.last_pass().evaluated, 0);
    assert_eq!(analyzer.last_pass().reused, 3);
    assert_eq!(first, second);
}

#[test]
fn test_base_change_invalidates_derived() {
    let mut analyzer = incremental();
    let first = analyzer.analyze(&snapshot("App.IDbContext")).unwrap();
    assert_eq!(with_code(&first, "LIF001").len(), 1);

    let changed = snapshot("App.IClock");
    let second = analyzer.analyze(&changed).unwrap();

    assert_eq!(
        analyzer.last_pass(),
        PassStats {
            evaluated: 2,
            reused: 1
        }
    );
    assert!(with_code(&second, "LIF001").is_empty());
    assert_eq!(second, analyze(&changed));
}

#[test]
fn test_global_checks_rerun_for_reused_declarations() {
    let mut analyzer = incremental();
    let mut inputs = snapshot("App.IDbContext");
    analyzer.analyze(&inputs).unwrap();

    // Only the implementation changes; the consumer's cached local result
    // must still see the new lifetime.
    inputs[2].metadata.lifetime = Lifetime::Singleton;
    let output = analyzer.analyze(&inputs).unwrap();

    assert_eq!(analyzer.last_pass().evaluated, 1);
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_reordered_snapshot_matches_fresh_analysis() {
    let mut analyzer = incremental();
    let mut inputs = snapshot("App.IDbContext");
    analyzer.analyze(&inputs).unwrap();

    inputs.reverse();
    let output = analyzer.analyze(&inputs).unwrap();

    assert_eq!(analyzer.last_pass().reused, 3);
    assert_eq!(output, analyze(&inputs));
}

#[test]
fn test_removed_declarations_leave_the_cache() {
    let mut analyzer = incremental();
    let inputs = snapshot("App.IDbContext");
    analyzer.analyze(&inputs).unwrap();

    let output = analyzer.analyze(&inputs[..2]).unwrap();
    assert_eq!(analyzer.last_pass().reused, 2);
    assert_eq!(with_code(&output, "DEP003").len(), 1);

    analyzer.analyze(&inputs).unwrap();
    assert_eq!(analyzer.last_pass().evaluated, 1);
}

#[test]
fn test_clear_forces_full_pass() {
    let mut analyzer = incremental();
    let inputs = snapshot("App.IDbContext");
    analyzer.analyze(&inputs).unwrap();

    analyzer.clear();
    analyzer.analyze(&inputs).unwrap();
    assert_eq!(analyzer.last_pass().evaluated, 3);
}
