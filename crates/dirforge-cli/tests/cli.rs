use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dirforge").expect("dirforge binary");
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn initialized() -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    cmd(tmp.path())
        .args(["--no-log-file", "init"])
        .assert()
        .success()
        .stdout(contains("Initialized"));
    tmp
}

#[test]
fn missing_config_fails_and_is_logged() {
    let tmp = TempDir::new().expect("create temp dir");

    cmd(tmp.path())
        .assert()
        .failure()
        .stderr(contains("is missing!"));

    let log = fs::read_to_string(tmp.path().join("debug.log")).expect("log file written");
    assert!(log.contains("[INFO] Program started. Working directory:"));
    assert!(log.contains("[ERROR] Fatal error:"));
}

#[test]
fn init_then_run_builds_tree() {
    let tmp = initialized();
    fs::write(tmp.path().join("input/main.csv"), "acme\nacme\nglobex\n").expect("write main csv");

    cmd(tmp.path())
        .arg("run")
        .assert()
        .success()
        .stdout(contains("Created:        2 directories"));

    assert!(tmp.path().join("target/acme").is_dir());
    assert!(tmp.path().join("target/globex").is_dir());
    assert_eq!(
        fs::read_to_string(tmp.path().join("errors/main_errors.csv")).expect("read errors"),
        "acme\n"
    );
}

#[test]
fn run_json_report() {
    let tmp = initialized();
    fs::write(tmp.path().join("input/main.csv"), "acme\n").expect("write main csv");
    fs::write(tmp.path().join("input/nested.csv"), "acme\n").expect("write nested csv");

    let out = cmd(tmp.path())
        .args(["--json", "--no-log-file"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: Value = serde_json::from_slice(&out).expect("valid json output");

    assert_eq!(report["main_rows"], 1);
    assert_eq!(report["nested_rows"], 1);
    assert_eq!(report["nested_errors"], 1);
    assert_eq!(report["directories_created"], 1);
    assert!(!tmp.path().join("debug.log").exists());
}

#[test]
fn check_reports_resolved_paths() {
    let tmp = initialized();

    cmd(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(contains("Configuration OK"))
        .stdout(contains("Folder1"));

    assert!(!tmp.path().join("errors").exists());
    assert!(!tmp.path().join("debug.log").exists());
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = initialized();

    cmd(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("--force"));

    cmd(tmp.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn config_in_other_directory() {
    let tmp = TempDir::new().expect("create temp dir");
    let project = tmp.path().join("project");
    fs::create_dir(&project).expect("create project dir");

    cmd(tmp.path())
        .args(["--config", "project/config.toml", "init"])
        .assert()
        .success();
    fs::write(project.join("input/main.csv"), "acme\n").expect("write main csv");

    cmd(tmp.path())
        .args(["--config", "project/config.toml"])
        .assert()
        .success();

    assert!(project.join("target/acme").is_dir());
}

#[test]
fn quiet_run_logs_errors_only() {
    let tmp = initialized();
    fs::write(tmp.path().join("input/main.csv"), "acme\n").expect("write main csv");

    cmd(tmp.path()).args(["-q", "run"]).assert().success();

    assert!(tmp.path().join("target/acme").is_dir());
    let log = fs::read_to_string(tmp.path().join("debug.log")).unwrap_or_default();
    assert!(!log.contains("[INFO]"));
    assert!(!log.contains("[WARNING]"));
}

#[test]
fn verbose_run_logs_debug_lines() {
    let tmp = initialized();

    cmd(tmp.path()).args(["-v", "run"]).assert().success();

    let log = fs::read_to_string(tmp.path().join("debug.log")).expect("log file written");
    assert!(log.contains("[INFO] Program started."));
    assert!(log.contains("[DEBUG] Resolved settings:"));
}

#[test]
fn default_run_has_no_debug_lines() {
    let tmp = initialized();

    cmd(tmp.path()).arg("run").assert().success();

    let log = fs::read_to_string(tmp.path().join("debug.log")).expect("log file written");
    assert!(log.contains("[INFO] Program started."));
    assert!(!log.contains("[DEBUG]"));
}
