//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run, each against its own scratch
//! data directory, and verify exit codes and outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "rosterroom-cli", "--quiet", "--"])
        .args(args)
        .env("ROSTERROOM_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
    stdout
}

fn create_admin(data_dir: &Path, name: &str) -> String {
    let stdout = run_cli_success(
        data_dir,
        &[
            "admin",
            "create",
            name,
            "--age",
            "24",
            "--gender",
            "Male",
            "--address",
            "Mirpur, Dhaka",
            "--mobile",
            "01700000000",
            "--batch",
            "20",
            "--join-date",
            "2023-01-15",
        ],
    );
    let json_start = stdout.find('{').expect("no JSON in create output");
    let admin: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    admin["id"].as_str().unwrap().to_string()
}

#[test]
fn admin_create_list_and_status_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_admin(dir.path(), "Rahim Uddin");

    let stdout = run_cli_success(dir.path(), &["admin", "list"]);
    assert!(stdout.contains("Rahim Uddin"));
    assert!(stdout.contains("1 active"));

    let stdout = run_cli_success(dir.path(), &["admin", "status", &id]);
    assert!(stdout.contains("Inactive"));
}

#[test]
fn admin_create_without_required_fields_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["admin", "create", "Only Name"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("missing required field"));
}

#[test]
fn admin_rate_rejects_out_of_range_stars() {
    let dir = tempfile::tempdir().unwrap();
    let id = create_admin(dir.path(), "Rahim Uddin");
    let (_, stderr, code) = run_cli(dir.path(), &["admin", "rate", &id, "6"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("between 1 and 5"));

    run_cli_success(dir.path(), &["admin", "rate", &id, "5"]);
}

#[test]
fn course_and_batch_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["course", "create", "Spoken English"]);
    let json_start = stdout.find('{').unwrap();
    let course: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    let course_id = course["id"].as_str().unwrap().to_string();

    let stdout = run_cli_success(
        dir.path(),
        &["batch", "add", &course_id, "--number", "20", "--status", "ongoing"],
    );
    let json_start = stdout.find('{').unwrap();
    let batch: serde_json::Value = serde_json::from_str(&stdout[json_start..]).unwrap();
    assert_eq!(batch["status"], "Ongoing");
    let batch_id = batch["id"].as_str().unwrap().to_string();

    run_cli_success(dir.path(), &["batch", "delete", &course_id, &batch_id]);
    run_cli_success(dir.path(), &["course", "delete", &course_id]);
}

#[test]
fn schedule_add_list_and_watch_tick() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(
        dir.path(),
        &[
            "schedule",
            "add",
            "--course",
            "Spoken English",
            "--class-type",
            "Live Zoom",
            "--batch",
            "20",
            "--hour",
            "8",
            "--minute",
            "30",
            "--meridiem",
            "PM",
            "--days",
            "Monday,Wednesday",
        ],
    );

    let stdout = run_cli_success(dir.path(), &["schedule", "list"]);
    assert!(stdout.contains("Total schedules: 1"));
    assert!(stdout.contains("08:30 PM"));
    assert!(stdout.contains("in "));

    // A single bounded tick of the watch loop.
    let stdout = run_cli_success(dir.path(), &["schedule", "watch", "--ticks", "1"]);
    assert!(stdout.contains("Total schedules: 1"));
}

#[test]
fn schedule_add_requires_a_day() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "schedule",
            "add",
            "--course",
            "IELTS",
            "--class-type",
            "Live",
            "--batch",
            "3",
            "--hour",
            "8",
            "--minute",
            "30",
            "--meridiem",
            "PM",
            "--days",
            "Funday",
        ],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("unrecognized weekday"));
}

#[test]
fn data_backup_and_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backups = tempfile::tempdir().unwrap();
    create_admin(dir.path(), "Rahim Uddin");

    let stdout = run_cli_success(
        dir.path(),
        &["data", "backup", "--out", backups.path().to_str().unwrap()],
    );
    let path = stdout
        .trim()
        .strip_prefix("Backup written to ")
        .expect("unexpected backup output");
    assert!(path.contains("rosterroom_backup_"));

    // Restore into a fresh data directory.
    let fresh = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(fresh.path(), &["data", "restore", path]);
    assert!(stdout.contains("1 admins"));
    let stdout = run_cli_success(fresh.path(), &["admin", "list"]);
    assert!(stdout.contains("Rahim Uddin"));
}

#[test]
fn config_get_set_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "true");

    run_cli_success(dir.path(), &["config", "set", "ui.dark_mode", "false"]);
    let stdout = run_cli_success(dir.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "false");

    let (_, _, code) = run_cli(dir.path(), &["config", "get", "ui.font"]);
    assert_ne!(code, 0);
}

#[test]
fn data_path_points_into_the_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["data", "path"]);
    assert!(stdout.trim().ends_with("document.json"));
    assert!(stdout.contains(dir.path().to_str().unwrap()));
}
