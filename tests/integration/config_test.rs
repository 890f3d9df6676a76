use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn config_show_project_settings() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".gopdeps.toml"),
        r#"
[defaults]
format = "json"

[module]
path = "example.com/configured"
"#,
    )
    .unwrap();

    Command::cargo_bin("gopdeps")
        .unwrap()
        .env_remove("GOPDEPS_FORMAT")
        .env_remove("GOPDEPS_MODULE")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files:"))
        .stdout(predicate::str::contains(".gopdeps.toml"))
        .stdout(predicate::str::contains(
            "defaults.format: json <- project config",
        ))
        .stdout(predicate::str::contains(
            "module.path: example.com/configured <- project config",
        ));
}

#[test]
fn env_var_overrides_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".gopdeps.toml"),
        "[defaults]\nformat = \"json\"\n",
    )
    .unwrap();

    Command::cargo_bin("gopdeps")
        .unwrap()
        .env("GOPDEPS_FORMAT", "text")
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "defaults.format: text <- env var (GOPDEPS_FORMAT)",
        ));
}

#[test]
fn project_config_module_applies_to_imports() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".gopdeps.toml"),
        "[module]\npath = \"example.com/fromcfg\"\n",
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("a.go"),
        "package a\n\nimport \"./b\"\n",
    )
    .unwrap();

    Command::cargo_bin("gopdeps")
        .unwrap()
        .env_remove("GOPDEPS_MODULE")
        .args(["imports", tmp.path().to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout("example.com/fromcfg/b\n");
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".gopdeps.toml"), "[defaults]\nformat = 3\n").unwrap();

    Command::cargo_bin("gopdeps")
        .unwrap()
        .args(["config", "show", "--path", tmp.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}
