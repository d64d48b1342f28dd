use std::process::{Command, Output};

use pretty_assertions::assert_eq;

fn test_runner(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_test-runner"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn test-runner")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn runs_tests_from_every_linked_crate() {
    let output = test_runner(&[]);
    let mut lines = stdout_lines(&output);

    assert!(output.status.success());
    assert_eq!(lines.pop().as_deref(), Some("0 failures, 2 passes"));

    // Link order decides the order of the per-test lines.
    lines.sort();
    assert_eq!(
        lines,
        [
            "Calling test 'add_one'... passed",
            "Calling test 'multiply'... passed",
        ]
    );
}

#[test]
fn matching_expected_count_runs_normally() {
    let output = test_runner(&["--expect", "2"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output).last().map(String::as_str),
        Some("0 failures, 2 passes")
    );
}

#[test]
fn expected_count_mismatch_is_an_error() {
    let output = test_runner(&["--expect", "3"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("expected 3 registered tests, found 2"));
    assert!(output.stdout.is_empty());
}

#[test]
fn list_does_not_run_anything() {
    let output = test_runner(&["--list"]);
    let lines = stdout_lines(&output);

    assert!(output.status.success());
    assert_eq!(lines[0], "Collecting 2 tests");
    assert!(lines.contains(&" - add_one (adder)".to_string()));
    assert!(lines.contains(&" - multiply (multiplier)".to_string()));
    assert!(!lines.iter().any(|l| l.starts_with("Calling test")));
}

#[test]
fn filter_selects_tests_by_name() {
    let output = test_runner(&["multi"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        ["Calling test 'multiply'... passed", "0 failures, 1 passes"]
    );
}
