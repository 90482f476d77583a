//! Tests for the exit code policy (0 all passed, 2 any failed)

use domain_validator::test_support::{failing_report, passing_report};
use domain_validator::{RunReport, ValidationReport, ValidationStats};

/// Helper function that mirrors the exit code mapping in src/main.rs
fn evaluate_exit_code(run: &RunReport) -> i32 {
    if run.all_passed() {
        0
    } else {
        2
    }
}

fn run_of(reports: Vec<ValidationReport>) -> RunReport {
    let stats = ValidationStats::new();
    for report in &reports {
        stats.record(report);
    }
    RunReport {
        reports,
        stats,
        elapsed_seconds: 0.5,
    }
}

#[test]
fn test_all_passed_exits_zero() {
    let run = run_of(vec![passing_report("a.example"), passing_report("b.example")]);
    assert_eq!(evaluate_exit_code(&run), 0);
}

#[test]
fn test_single_failure_exits_two() {
    let run = run_of(vec![
        passing_report("a.example"),
        failing_report("b.example"),
        passing_report("c.example"),
    ]);
    assert_eq!(evaluate_exit_code(&run), 2);
    assert_eq!(run.stats.failed(), 1);
    assert_eq!(run.stats.passed(), 2);
}

#[test]
fn test_empty_run_exits_zero() {
    let run = run_of(Vec::new());
    assert_eq!(evaluate_exit_code(&run), 0);
}
