//! End-to-end CLI tests.
//!
//! `DCM_COMPOSE` is pointed at `mkdir -p --`, so every successful step leaves
//! a directory named after the operation (`up`, `down`, ...) inside the
//! project it ran in. No container runtime is needed.
#![cfg(unix)]

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const MARKER_COMPOSE: &str = "mkdir -p --";

const DESCRIPTOR: &str = r#"{
    "version": "1.0",
    "projects": {
        "api":   { "path": "./services/api",  "description": "REST API" },
        "web":   { "path": "./services/web",  "description": "Frontend" },
        "db":    { "path": "./infra/db",      "description": "Postgres" },
        "cache": { "path": "./infra/cache" }
    },
    "groups": {
        "dev":    { "services": ["api", "web"] },
        "infra":  { "services": ["db", "cache"] },
        "full":   { "services": ["api", "web", "db"], "extends": "infra" },
        "broken": { "services": ["api", "ghost", "web"] },
        "empty":  { "services": [] },
        "api":    { "services": ["db"] },
        "loop1":  { "services": [], "extends": "loop2" },
        "loop2":  { "services": [], "extends": "loop1" }
    }
}"#;

fn workspace() -> TempDir {
    let root = TempDir::new().expect("tempdir");
    fs::write(root.path().join("workspace.json"), DESCRIPTOR).expect("write descriptor");
    for dir in ["services/api", "services/web", "infra/db", "infra/cache"] {
        fs::create_dir_all(root.path().join(dir)).expect("mkdir project");
    }
    root
}

fn dcm(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dcm"));
    cmd.current_dir(cwd)
        .env("DCM_COMPOSE", MARKER_COMPOSE)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Projects (relative dirs) that received `operation`.
fn touched(root: &Path, operation: &str) -> BTreeSet<&'static str> {
    ["services/api", "services/web", "infra/db", "infra/cache"]
        .into_iter()
        .filter(|dir| root.join(dir).join(operation).is_dir())
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Bare invocations
// ---------------------------------------------------------------------------

#[test]
fn no_verb_prints_help() {
    let dir = TempDir::new().expect("tempdir");
    dcm(dir.path())
        .assert()
        .success()
        .stdout(contains("Usage").and(contains("up")));
}

#[test]
fn version_needs_no_workspace() {
    let dir = TempDir::new().expect("tempdir");
    dcm(dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(contains(format!("dcm v{}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn up_without_target_is_a_usage_error() {
    let root = workspace();
    dcm(root.path()).arg("up").assert().failure();
    assert!(touched(root.path(), "up").is_empty());
}

#[test]
fn missing_descriptor_fails() {
    let dir = TempDir::new().expect("tempdir");
    let assert = dcm(dir.path()).args(["up", "dev"]).assert();
    // A stray workspace.json above the temp dir would change the outcome;
    // `dev` would then most likely not resolve either.
    assert.failure();
}

#[test]
fn malformed_descriptor_reports_parse_error() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("workspace.json"), "{ \"projects\": [ }").expect("write");
    dcm(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(contains("failed to parse"));
}

// ---------------------------------------------------------------------------
// 2. up / down
// ---------------------------------------------------------------------------

#[test]
fn up_group_runs_members_in_order() {
    let root = workspace();
    let assert = dcm(root.path())
        .args(["up", "dev"])
        .assert()
        .success()
        .stdout(contains("2 succeeded, 0 failed"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let api = stdout.find("Starting api").expect("api line");
    let web = stdout.find("Starting web").expect("web line");
    assert!(api < web, "api must start before web:\n{stdout}");

    assert_eq!(touched(root.path(), "up"), BTreeSet::from(["services/api", "services/web"]));
}

#[test]
fn up_works_from_nested_directory() {
    let root = workspace();
    let nested = root.path().join("services/web/src/deep");
    fs::create_dir_all(&nested).expect("mkdir");

    dcm(&nested).args(["up", "infra"]).assert().success();
    assert_eq!(touched(root.path(), "up"), BTreeSet::from(["infra/cache", "infra/db"]));
}

#[test]
fn extended_group_starts_parent_members_first() {
    let root = workspace();
    let assert = dcm(root.path()).args(["up", "full"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");

    let order: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.split("Starting ").nth(1))
        .filter(|rest| !rest.starts_with("group"))
        .collect();
    assert_eq!(order, ["db", "cache", "api", "web"]);
}

#[test]
fn group_name_shadows_project_name() {
    let root = workspace();
    dcm(root.path())
        .args(["up", "api"])
        .assert()
        .success()
        .stdout(contains("group 'api'"));
    assert_eq!(touched(root.path(), "up"), BTreeSet::from(["infra/db"]));
}

#[test]
fn single_project_target() {
    let root = workspace();
    dcm(root.path()).args(["up", "cache"]).assert().success();
    assert_eq!(touched(root.path(), "up"), BTreeSet::from(["infra/cache"]));
}

#[test]
fn partial_failure_still_runs_remaining_members() {
    let root = workspace();
    dcm(root.path())
        .args(["up", "broken"])
        .assert()
        .failure()
        .stdout(contains("unknown project 'ghost'").and(contains("2 succeeded, 1 failed")))
        .stderr(contains("1 of 3 projects failed"));
    assert_eq!(touched(root.path(), "up"), BTreeSet::from(["services/api", "services/web"]));
}

#[test]
fn empty_group_is_a_successful_no_op() {
    let root = workspace();
    dcm(root.path())
        .args(["up", "empty"])
        .assert()
        .success()
        .stdout(contains("Nothing to do"));
}

#[test]
fn cyclic_group_fails_without_running_anything() {
    let root = workspace();
    dcm(root.path())
        .args(["up", "loop1"])
        .assert()
        .failure()
        .stderr(contains("cyclic group extension: loop1 -> loop2 -> loop1"));
    assert!(touched(root.path(), "up").is_empty());
}

#[test]
fn unknown_target_fails() {
    let root = workspace();
    dcm(root.path())
        .args(["up", "nope"])
        .assert()
        .failure()
        .stderr(contains("no group or project named 'nope'"));
}

#[test]
fn down_without_target_stops_every_project() {
    let root = workspace();
    dcm(root.path())
        .arg("down")
        .assert()
        .success()
        .stdout(contains("4 succeeded, 0 failed"));
    assert_eq!(touched(root.path(), "down").len(), 4);
}

#[test]
fn failing_orchestration_command_is_reported_per_project() {
    let root = workspace();
    fs::remove_dir_all(root.path().join("infra/db")).expect("rm db");

    dcm(root.path())
        .arg("restart")
        .assert()
        .failure()
        .stdout(contains("db:").and(contains("does not exist")))
        .stderr(contains("1 of 4 projects failed"));
    assert_eq!(touched(root.path(), "restart").len(), 3);
}

#[test]
fn compose_flag_overrides_environment() {
    let root = workspace();
    dcm(root.path())
        .args(["--compose", "false", "up", "cache"])
        .assert()
        .failure()
        .stdout(contains("exit status 1"));
}

// ---------------------------------------------------------------------------
// 3. list / inspect / validate / init
// ---------------------------------------------------------------------------

#[test]
fn list_json_schema() {
    let root = workspace();
    let assert = dcm(root.path()).args(["list", "--json"]).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let payload: serde_json::Value = serde_json::from_str(&stdout).expect("json");

    let keys: BTreeSet<&str> = payload
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, BTreeSet::from(["workspace", "version", "projects", "groups"]));

    let projects = payload["projects"].as_array().expect("projects");
    assert_eq!(projects.len(), 4);
    let api = projects.iter().find(|p| p["name"] == "api").expect("api");
    assert!(api["path"].as_str().expect("path").ends_with("services/api"));

    let full = payload["groups"]
        .as_array()
        .expect("groups")
        .iter()
        .find(|g| g["name"] == "full")
        .expect("full");
    assert_eq!(full["extends"], "infra");
}

#[test]
fn list_table_shows_descriptions() {
    let root = workspace();
    dcm(root.path())
        .arg("list")
        .assert()
        .success()
        .stdout(contains("REST API").and(contains("Postgres")));
}

#[test]
fn inspect_shows_plan_and_unresolved_members() {
    let root = workspace();
    dcm(root.path())
        .args(["inspect", "broken"])
        .assert()
        .success()
        .stdout(contains("1. api").and(contains("unknown project 'ghost'")));
}

#[test]
fn inspect_shows_extends_chain() {
    let root = workspace();
    dcm(root.path())
        .args(["inspect", "full"])
        .assert()
        .success()
        .stdout(contains("infra → full"));
}

#[test]
fn inspect_empty_group_says_no_members() {
    let root = workspace();
    dcm(root.path())
        .args(["inspect", "empty"])
        .assert()
        .success()
        .stdout(contains("(no members)"));
}

#[test]
fn validate_flags_broken_workspace() {
    let root = workspace();
    dcm(root.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(
            contains("ghost")
                .and(contains("loop1 -> loop2 -> loop1"))
                .and(contains("'api' is both a group and a project")),
        );
}

#[test]
fn validate_accepts_clean_workspace() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("api")).expect("mkdir");
    fs::write(
        dir.path().join("workspace.yaml"),
        "version: 1\nprojects:\n  api:\n    path: api\ngroups:\n  dev:\n    services: [api]\n",
    )
    .expect("write");

    dcm(dir.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(contains("is valid (1 projects, 1 groups)"));
}

#[test]
fn unknown_version_warns_but_loads() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("workspace.json"), r#"{"version": "9", "projects": {}}"#)
        .expect("write");

    dcm(dir.path())
        .arg("list")
        .assert()
        .success()
        .stderr(contains("unknown schema version '9'"));
}

#[test]
fn unknown_version_is_logged_when_warnings_enabled() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("workspace.json"), r#"{"version": "9", "projects": {}}"#)
        .expect("write");

    dcm(dir.path())
        .env("RUST_LOG", "warn")
        .arg("list")
        .assert()
        .success()
        .stderr(contains("WARN").and(contains("schema version")));
}

#[test]
fn init_writes_template_once() {
    let dir = TempDir::new().expect("tempdir");
    dcm(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("workspace.json").is_file());

    dcm(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(contains("already exists"));
    dcm(dir.path()).args(["init", "--force"]).assert().success();

    dcm(dir.path())
        .args(["inspect", "dev"])
        .assert()
        .success()
        .stdout(contains("group dev"));
}
