//! End-to-end coverage of the `idse` binary's MVP command surface:
//! `project init` -> `session create` -> `artifact save` -> `validate`.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn idse() -> Command {
    Command::new(env!("CARGO_BIN_EXE_idse"))
}

#[test]
fn project_init_is_idempotent_and_prints_the_project_id() {
    let workspace = tempdir().unwrap();

    idse()
        .args(["--workspace", workspace.path().to_str().unwrap(), "project", "init", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project 'demo' ready"));

    // Second init against the same name returns the existing row rather than erroring.
    idse()
        .args(["--workspace", workspace.path().to_str().unwrap(), "project", "init", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project 'demo' ready"));
}

#[test]
fn session_create_requires_an_existing_project() {
    let workspace = tempdir().unwrap();

    idse()
        .args([
            "--workspace",
            workspace.path().to_str().unwrap(),
            "session",
            "create",
            "no-such-project",
            "feature-1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no such project"));
}

#[test]
fn artifact_save_then_show_round_trips_through_stdin() {
    let workspace = tempdir().unwrap();
    let ws = workspace.path().to_str().unwrap();

    idse().args(["--workspace", ws, "project", "init", "demo"]).assert().success();
    idse()
        .args(["--workspace", ws, "session", "create", "demo", "feature-1"])
        .assert()
        .success();

    idse()
        .args(["--workspace", ws, "artifact", "save", "demo", "feature-1", "intent"])
        .write_stdin("# Intent\n\nShip the thing.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("artifact"));

    idse()
        .args(["--workspace", ws, "artifact", "show", "demo", "feature-1", "intent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ship the thing"));
}

#[test]
fn validate_reports_missing_required_stages() {
    let workspace = tempdir().unwrap();
    let ws = workspace.path().to_str().unwrap();

    idse().args(["--workspace", ws, "project", "init", "demo"]).assert().success();
    idse()
        .args(["--workspace", ws, "session", "create", "demo", "feature-1"])
        .assert()
        .success();

    idse()
        .args(["--workspace", ws, "validate", "demo", "feature-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("validation: failed"));
}

#[test]
fn session_set_status_complete_is_blocked_by_the_validation_gate() {
    let workspace = tempdir().unwrap();
    let ws = workspace.path().to_str().unwrap();

    idse().args(["--workspace", ws, "project", "init", "demo"]).assert().success();
    idse()
        .args(["--workspace", ws, "session", "create", "demo", "feature-1"])
        .assert()
        .success();

    // No pipeline artifacts exist yet, so completion must be blocked rather
    // than silently flipping the session's status column.
    idse()
        .args(["--workspace", ws, "session", "set-status", "demo", "feature-1", "complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("completion blocked"));
}
