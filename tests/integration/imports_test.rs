use assert_cmd::Command;
use predicates::prelude::*;

fn gopdeps() -> Command {
    Command::cargo_bin("gopdeps").unwrap()
}

#[test]
fn imports_simple_module_text() {
    gopdeps()
        .args(["imports", "tests/fixtures/go/simple_module", "--quiet"])
        .assert()
        .success()
        .stdout(
            "example.com/simple/store\n\
             example.com/simple/util\n\
             fmt\n\
             github.com/pkg/errors\n\
             os\n\
             strings\n",
        );
}

#[test]
fn imports_simple_module_json() {
    let output = gopdeps()
        .args([
            "imports",
            "tests/fixtures/go/simple_module",
            "--format",
            "json",
            "--quiet",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["modules"], serde_json::json!(["example.com/simple"]));
    assert_eq!(report["files_parsed"], 3);
    assert_eq!(report["files_failed"], 0);
    let imports = report["imports"].as_array().unwrap();
    assert_eq!(imports.len(), 6);
    assert!(imports.contains(&serde_json::json!("example.com/simple/util")));
}

#[test]
fn include_tests_adds_test_imports() {
    gopdeps()
        .args([
            "imports",
            "tests/fixtures/go/simple_module",
            "--include-tests",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("testing\n"));

    gopdeps()
        .args(["imports", "tests/fixtures/go/simple_module", "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("testing").not());
}

#[test]
fn exclude_pattern_skips_package() {
    gopdeps()
        .args([
            "imports",
            "tests/fixtures/go/simple_module",
            "--exclude",
            "store/**",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("os\n").not())
        .stdout(predicate::str::contains("example.com/simple/store\n"));
}

#[test]
fn module_flag_overrides_go_mod() {
    gopdeps()
        .args([
            "imports",
            "tests/fixtures/go/simple_module",
            "--module",
            "example.com/override",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("example.com/override/util\n"))
        .stdout(predicate::str::contains("example.com/override/store\n"))
        .stdout(predicate::str::contains("example.com/simple/util").not());
}

#[test]
fn gop_module_without_package_clause() {
    gopdeps()
        .args(["imports", "tests/fixtures/gop/hello", "--quiet"])
        .assert()
        .success()
        .stdout("example.com/hello/greet\nfmt\nstrings\n");
}

#[test]
fn single_file_argument() {
    gopdeps()
        .args([
            "imports",
            "tests/fixtures/go/simple_module/util/util.go",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout("example.com/simple/store\nstrings\n");
}

#[test]
fn module_without_mod_file_keeps_relative_paths() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join("main.go"),
        "package main\n\nimport (\n\t\"fmt\"\n\t\"./lib\"\n)\n",
    )
    .unwrap();

    gopdeps()
        .args(["imports", tmp.path().to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout("fmt\nlib\n");
}
