#![forbid(unsafe_code)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn axup() -> Command {
    Command::cargo_bin("axup").unwrap()
}

#[test]
fn help_lists_lifecycle_subcommands() {
    axup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("restart"))
        .stdout(predicate::str::contains("bootstrap"));
}

#[test]
fn config_set_then_get_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("axup-deploy.toml");

    axup()
        .args(["--store", store.to_str().unwrap(), "config", "set", "database_name", "AxDB"])
        .assert()
        .success();

    axup()
        .args(["--store", store.to_str().unwrap(), "config", "get", "database_name"])
        .assert()
        .success()
        .stdout(predicate::str::diff("AxDB\n"));
}

#[test]
fn config_get_unset_key_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("axup-deploy.toml");
    axup()
        .args(["--store", store.to_str().unwrap(), "config", "get", "backup_path"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn config_show_includes_every_known_key() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("axup-deploy.toml");
    axup()
        .args(["--store", store.to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("install_path"))
        .stdout(predicate::str::contains("website_name"))
        .stdout(predicate::str::contains("packages_path"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("axup-deploy.toml");
    axup()
        .args(["--store", store.to_str().unwrap(), "config", "get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn app_setting_reads_value_from_web_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("web.config");
    std::fs::write(
        &config,
        r#"<configuration><appSettings><add key="DataAccess.Database" value="AxDB" /></appSettings></configuration>"#,
    )
    .unwrap();
    axup()
        .args(["config", "app-setting", config.to_str().unwrap(), "DataAccess.Database"])
        .assert()
        .success()
        .stdout(predicate::str::diff("AxDB\n"));
}
