use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("imagingiq")
        .env("IMAGINGIQ_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("imagingiq")
        .env("IMAGINGIQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("scan_duration_ms ="));
    assert!(contents.contains("[[provider.accounts]]"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "scan_duration_ms = 1\n").unwrap();

    cargo_bin_cmd!("imagingiq")
        .env("IMAGINGIQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert_eq!(contents, "scan_duration_ms = 1\n");
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "scan_duration_ms = \"soon\"\n").unwrap();

    cargo_bin_cmd!("imagingiq")
        .env("IMAGINGIQ_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}

#[test]
fn test_shell_requires_terminal() {
    let dir = tempdir().unwrap();

    // assert_cmd captures stdout, so the shell refuses to start.
    cargo_bin_cmd!("imagingiq")
        .env("IMAGINGIQ_HOME", dir.path())
        .args(["--route", "dashboard"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));

    assert!(dir.path().join("logs").is_dir());
}
