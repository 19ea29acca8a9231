//! End-to-end tests for the `breathe` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn breathe(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("breathe").unwrap();
    cmd.env("BREATHE_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("BREATHE_LOG");
    cmd
}

#[test]
fn lists_builtin_techniques() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("techniques")
        .assert()
        .success()
        .stdout(predicate::str::contains("Techniques (3)"))
        .stdout(predicate::str::contains("4-7-8 Breathing"))
        .stdout(predicate::str::contains("Box Breathing"))
        .stdout(predicate::str::contains("Deep Breathing"));
}

#[test]
fn shows_technique_by_prefix() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["show", "box"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Box Breathing"))
        .stdout(predicate::str::contains("4-4-4-4"))
        .stdout(predicate::str::contains("1 minute, 20 seconds"));
}

#[test]
fn simulates_478_as_json() {
    let home = TempDir::new().unwrap();
    let output = breathe(&home)
        .args(["simulate", "4-7-8", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["technique"], "4-7-8 Breathing");
    assert_eq!(parsed["completed"], true);
    assert_eq!(parsed["elapsed_seconds"], 76);
    assert_eq!(parsed["final_snapshot"]["completed_cycles"], 0);
}

#[test]
fn simulates_custom_pattern() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["simulate", "--pattern", "4-0-4", "--cycles", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session complete"))
        .stdout(predicate::str::contains("Completed in 8 seconds"));
}

#[test]
fn unknown_technique_fails() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["simulate", "triangle"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No technique matches 'triangle'"));
}

#[test]
fn config_path_uses_breathe_home() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join("config.yaml");
    breathe(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[test]
fn configured_techniques_join_the_catalog() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        r#"
techniques:
  - name: Triangle
    pattern: "4-4-4"
    cycles: 3
  - name: Nothing
    pattern: []
"#,
    )
    .unwrap();

    breathe(&home)
        .args(["techniques"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Techniques (4)"))
        .stdout(predicate::str::contains("Triangle"))
        .stdout(predicate::str::contains("Nothing"));

    breathe(&home)
        .args(["simulate", "4", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"elapsed_seconds\": 36"));
}

#[test]
fn simulate_survives_extreme_step_rate() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "session:\n  steps_per_second: 2000000000\n",
    )
    .unwrap();

    breathe(&home)
        .args(["simulate", "box", "--ticks", "3", "-o", "json"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"elapsed_seconds\": 3"));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(home.path().join("config.yaml").exists());

    breathe(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn empty_history() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No sessions recorded"));
}

#[test]
fn history_rejects_bad_date() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["history", "--date", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn generates_completions() {
    let home = TempDir::new().unwrap();
    breathe(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breathe"));
}
