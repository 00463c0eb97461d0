//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with `ZENTASK_HOME` pointed at a fresh temp
//! dir and verify outputs.

use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command against `home` and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_zentask"))
        .args(args)
        .env("ZENTASK_HOME", home.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &TempDir, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

fn list_json(home: &TempDir) -> Vec<serde_json::Value> {
    let out = run_ok(home, &["task", "list", "--json"]);
    serde_json::from_str(&out).expect("task list --json is not JSON")
}

fn ids(home: &TempDir) -> Vec<String> {
    list_json(home)
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_empty_list() {
    let home = tempfile::tempdir().unwrap();
    assert!(list_json(&home).is_empty());
    assert!(run_ok(&home, &["task", "list"]).contains("No tasks."));
}

#[test]
fn test_task_add_and_cap() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["task", "add", "Write report", "--category", "work"]);
    assert!(out.contains("Task created:"));
    run_ok(&home, &["task", "add", "Go for a run"]);

    let (_, stderr, code) = run_cli(&home, &["task", "add", "One too many"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: daily limit of 2 tasks reached"));

    let tasks = list_json(&home);
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Go for a run");
    assert_eq!(tasks[0]["priority"], "HIGH");
    assert_eq!(tasks[0]["category"], "OTHER");
    assert_eq!(tasks[1]["priority"], "MEDIUM");
    assert_eq!(tasks[1]["category"], "WORK");
}

#[test]
fn test_blank_title_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(&home, &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("task title is empty"));
}

#[test]
fn test_unknown_category_rejected() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(&home, &["task", "add", "x", "--category", "errands"]);
    assert_eq!(code, 2);
}

#[test]
fn test_toggle_completes_day() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["task", "add", "one"]);
    run_ok(&home, &["task", "add", "two"]);
    let ids = ids(&home);

    let out = run_ok(&home, &["task", "toggle", &ids[0], "--yes"]);
    assert!(out.contains("Task completed"));
    let out = run_ok(&home, &["task", "toggle", &ids[1][..8], "--yes"]);
    assert!(out.contains("Day complete!"));

    let stats: serde_json::Value =
        serde_json::from_str(&run_ok(&home, &["stats", "--json"])).unwrap();
    assert_eq!(stats["streak"]["completedDaysCount"], 1);
    assert_eq!(stats["today"]["completed"], 2);
    assert_eq!(stats["today"]["credited"], true);
    assert_eq!(stats["level"]["level"], 1);

    let done = run_ok(&home, &["task", "list", "--filter", "done", "--json"]);
    assert_eq!(serde_json::from_str::<Vec<serde_json::Value>>(&done).unwrap().len(), 2);
}

#[test]
fn test_toggle_without_confirmation_is_declined() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["task", "add", "one"]);
    let id = ids(&home).remove(0);

    // stdin is closed, so the prompt reads no answer.
    let out = run_ok(&home, &["task", "toggle", &id]);
    assert!(out.contains("Unchanged."));
    assert_eq!(list_json(&home)[0]["completed"], false);
}

#[test]
fn test_two_phase_delete() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["task", "add", "keep"]);
    run_ok(&home, &["task", "add", "drop"]);
    let id = ids(&home).remove(0);

    let out = run_ok(&home, &["task", "delete", &id]);
    assert!(out.contains("confirm-delete"));
    assert_eq!(list_json(&home).len(), 2);

    run_ok(&home, &["task", "cancel-delete"]);
    assert!(run_ok(&home, &["task", "confirm-delete"]).contains("Nothing to delete."));

    run_ok(&home, &["task", "delete", &id]);
    assert!(run_ok(&home, &["task", "confirm-delete"]).contains("Task deleted"));
    let tasks = list_json(&home);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "keep");
    assert_eq!(tasks[0]["priority"], "HIGH");
}

#[test]
fn test_reorder_and_move() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["task", "add", "B"]);
    run_ok(&home, &["task", "add", "A"]);
    let ids = ids(&home);

    run_ok(&home, &["task", "reorder", &ids[1], "0"]);
    let tasks = list_json(&home);
    assert_eq!(tasks[0]["title"], "B");
    assert_eq!(tasks[0]["priority"], "HIGH");
    assert_eq!(tasks[1]["title"], "A");

    run_ok(&home, &["task", "move", &ids[1], &ids[0]]);
    assert_eq!(list_json(&home)[0]["title"], "A");

    assert!(run_ok(&home, &["task", "reorder", "nope", "0"]).contains("Task not found"));
}

#[test]
fn test_config_roundtrip() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(&home, &["config", "get", "tasks.daily_cap"]).trim(), "2");
    run_ok(&home, &["config", "set", "tasks.daily_cap", "3"]);
    assert_eq!(run_ok(&home, &["config", "get", "tasks.daily_cap"]).trim(), "3");

    for title in ["a", "b", "c"] {
        run_ok(&home, &["task", "add", title]);
    }
    assert_eq!(list_json(&home).len(), 3);

    let (_, _, code) = run_cli(&home, &["config", "get", "nope"]);
    assert_eq!(code, 1);
    let (_, _, code) = run_cli(&home, &["config", "set", "timer.work_minutes", "soon"]);
    assert_eq!(code, 1);

    run_ok(&home, &["config", "reset"]);
    assert_eq!(run_ok(&home, &["config", "get", "tasks.daily_cap"]).trim(), "2");
}

#[test]
fn test_config_default_category_any_case() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["config", "set", "tasks.default_category", "health"]);
    assert_eq!(
        run_ok(&home, &["config", "get", "tasks.default_category"]).trim(),
        "HEALTH"
    );
    run_ok(&home, &["task", "add", "Stretch"]);
    assert_eq!(list_json(&home)[0]["category"], "HEALTH");
}

#[test]
fn test_debug_logging_reports_board_open() {
    let home = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_zentask"))
        .args(["task", "list"])
        .env("ZENTASK_HOME", home.path())
        .env("RUST_LOG", "debug")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("board opened"), "stderr: {stderr}");

    // Quiet by default.
    let (_, stderr, _) = run_cli(&home, &["task", "list"]);
    assert!(!stderr.contains("board opened"));
}

#[test]
fn test_stats_on_fresh_board() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["stats"]);
    assert!(out.contains("Today:  0/2 done"));
    assert!(out.contains("Streak: 0 days"));
    assert!(out.contains("30 days to level 2"));
}

#[test]
fn test_timer_runs_short_cycles() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(
        &home,
        &[
            "timer", "run", "--work", "0", "--rest", "0", "--cycles", "2", "--auto-ack", "--json",
        ],
    );
    let events: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<_> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        kinds,
        ["TimerStarted", "CycleCompleted", "CycleAdvanced", "CycleCompleted"]
    );
    assert_eq!(events[1]["mode"], "WORK");
    assert_eq!(events[2]["mode"], "REST");
}

#[test]
fn test_plan_failure_is_reported_not_fatal() {
    let home = tempfile::tempdir().unwrap();
    run_ok(&home, &["config", "set", "planner.base_url", "http://127.0.0.1:9/"]);
    let output = Command::new(env!("CARGO_BIN_EXE_zentask"))
        .args(["plan", "run a 5k", "--add"])
        .env("ZENTASK_HOME", home.path())
        .env("GEMINI_API_KEY", "test-key")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No plan could be generated"));
    assert!(list_json(&home).is_empty());
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let out = run_ok(&home, &["completions", "bash"]);
    assert!(out.contains("zentask"));
}
