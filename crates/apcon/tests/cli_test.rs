#![allow(clippy::unwrap_used)]
// CLI surface smoke tests: argument parsing, help output, and the
// offline error paths (no config, no session). Nothing here talks to a
// backend.

use assert_cmd::Command;
use predicates::prelude::*;

fn apcon() -> Command {
    Command::cargo_bin("apcon").unwrap()
}

/// A command isolated from the developer's real config and session.
fn isolated(home: &tempfile::TempDir) -> Command {
    let mut cmd = apcon();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env("XDG_DATA_HOME", home.path().join(".local/share"))
        .env_remove("APCON_PROFILE")
        .env_remove("APCON_SERVER")
        .env_remove("APCON_USERNAME")
        .env_remove("APCON_PASSWORD");
    cmd
}

#[test]
fn help_lists_subcommands() {
    apcon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("devices"))
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("portal"));
}

#[test]
fn version_prints() {
    apcon()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apcon"));
}

#[test]
fn no_args_shows_usage() {
    apcon()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unknown_subcommand_fails() {
    apcon().arg("frobnicate").assert().failure();
}

#[test]
fn completions_generate() {
    apcon()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apcon"));
}

#[test]
fn devices_list_without_config_points_at_init() {
    let home = tempfile::tempdir().unwrap();
    isolated(&home)
        .args(["devices", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("config init"));
}

#[test]
fn backend_commands_require_a_session() {
    let home = tempfile::tempdir().unwrap();
    isolated(&home)
        .args(["-c", "https://127.0.0.1:9", "devices", "list"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("login"));
}

#[test]
fn provision_push_requires_from_file() {
    apcon()
        .args(["provision", "push", "ap-lobby"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--from-file"));
}
