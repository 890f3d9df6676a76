use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn exit_code_0_clean_module() {
    Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["imports", "tests/fixtures/go/simple_module", "--quiet"])
        .assert()
        .code(0);
}

#[test]
fn exit_code_2_when_a_file_fails() {
    // The broken file is reported; the rest of the package still counts
    Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["imports", "tests/fixtures/go/broken_module", "--quiet"])
        .assert()
        .code(2)
        .stdout("fmt\n")
        .stderr(predicate::str::contains("gopdeps::syntax"));
}

#[test]
fn malformed_import_literal_is_reported_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    std::fs::write(root.join("go.mod"), "module example.com/esc\n").unwrap();
    std::fs::write(root.join("a.go"), "package esc\n\nimport \"fmt\"\n").unwrap();
    std::fs::write(root.join("b.go"), "package esc\n\nimport \"a\\qb\"\n").unwrap();
    std::fs::write(
        root.join("c.go"),
        "package esc\n\nimport \"os\" \"strings\"\n",
    )
    .unwrap();

    let output = Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["imports", root.to_str().unwrap(), "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_parsed"], 1);
    assert_eq!(report["files_failed"], 2);
    assert_eq!(report["imports"], serde_json::json!(["fmt"]));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("panicked"), "{stderr}");
    assert!(stderr.matches("gopdeps::syntax").count() >= 2, "{stderr}");
}

#[test]
fn failure_counted_in_json_report() {
    let output = Command::cargo_bin("gopdeps")
        .unwrap()
        .args([
            "imports",
            "tests/fixtures/go/broken_module",
            "--format",
            "json",
            "--quiet",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_parsed"], 1);
    assert_eq!(report["files_failed"], 1);
    assert_eq!(report["imports"], serde_json::json!(["fmt"]));
}

#[test]
fn exit_code_1_on_bad_path() {
    // miette wraps errors with exit code 1
    Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["imports", "/nonexistent/path"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn exit_code_1_when_no_sources() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("README.md"), "# nothing here\n").unwrap();
    Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["imports", tmp.path().to_str().unwrap(), "--quiet"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No Go or Go+ source files"));
}
