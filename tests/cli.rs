//! CLI tests against the in-memory store.

use std::io::Write;
use std::process::{Command, Output};

const PEOPLE_SCHEMA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/people.yaml");

fn execute_docfactory(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_docfactory"))
        .args(args)
        .env("RUST_LOG", "docfactory=debug")
        .output()
        .expect("Failed to run docfactory")
}

fn assert_cli_success(output: &Output, command_desc: &str) {
    if !output.status.success() {
        panic!(
            "{} failed!\nExit code: {:?}\nStdout: {}\nStderr: {}",
            command_desc,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

#[test]
fn test_create_prints_json_lines() {
    let output = execute_docfactory(&[
        "create",
        "--schema",
        PEOPLE_SCHEMA,
        "--document",
        "Person",
        "--set",
        "age=5",
        "--set",
        "surname=fake",
        "--count",
        "2",
        "--memory",
    ]);
    assert_cli_success(&output, "create Person");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // Logs go to stderr, so every stdout line is a document
    assert_eq!(lines.len(), 2);
    assert_ne!(lines[0]["_id"], lines[1]["_id"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Creating 2 document(s)"));
    for person in &lines {
        assert_eq!(person["age"], 5);
        assert_eq!(person["surname"], "fake");
        assert_eq!(person["active"], true);
        assert!(person["name"].is_string());
        assert!(person["email"].is_string());
    }
}

#[test]
fn test_create_reports_missing_generator() {
    let output = execute_docfactory(&[
        "create",
        "--schema",
        PEOPLE_SCHEMA,
        "--document",
        "Event",
        "--memory",
    ]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot generate value for required field 'day'"));
    assert!(stderr.contains("field type 'date'"));
}

#[test]
fn test_create_requires_a_store() {
    let output = Command::new(env!("CARGO_BIN_EXE_docfactory"))
        .args([
            "create",
            "--schema",
            PEOPLE_SCHEMA,
            "--document",
            "Person",
        ])
        .env_remove("MONGODB_CONNECTION_STRING")
        .output()
        .expect("Failed to run docfactory");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--mongodb-connection-string is required"));
}

#[test]
fn test_check_lists_uncovered_fields() {
    let output = execute_docfactory(&["check", "--schema", PEOPLE_SCHEMA]);
    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Event.day: no generator for type 'date'"));
    assert!(!stdout.contains("Person."));
}

#[test]
fn test_check_passes_for_covered_schema() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "version: 1\ndocuments:\n  - name: Tag\n    fields:\n      - name: label\n        type: str\n        required: true\n      - name: created\n        type: date\n"
    )
    .unwrap();

    let path = file.path().to_str().unwrap();
    let output = execute_docfactory(&["check", "--schema", path]);
    assert_cli_success(&output, "check covered schema");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("All required fields of 1 document(s) can be generated"));
}
