//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data
//! directory and checks stdout and the exit code.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_solimo"))
        .env("SOLIMO_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_today_json() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["today", "--json"]);
    assert_eq!(code, 0, "today failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["completed"], false);
    assert_eq!(parsed["level"], 1);
    assert_eq!(parsed["age_band"], "3-4");
    assert_eq!(parsed["sound_enabled"], true);
}

#[test]
fn test_week_lists_requested_days() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["week", "--days", "7", "--json"]);
    assert_eq!(code, 0, "week failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = parsed.as_array().unwrap();
    assert_eq!(days.len(), 7);
}

#[test]
fn test_week_rejects_out_of_range_days() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["week", "--days", "0"]);
    assert_ne!(code, 0, "zero days should be rejected");
    let (code, _, _) = run_cli(&dir, &["week", "--days", "18446744073709551615"]);
    assert_ne!(code, 0, "huge day counts should be rejected");

    let (code, stdout, _) = run_cli(&dir, &["week", "--days", "366", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 366);
}

#[test]
fn test_completion_mark_and_clear() {
    let dir = TempDir::new().unwrap();
    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "not completed");

    let (code, _, _) = run_cli(&dir, &["completion", "mark"]);
    assert_eq!(code, 0, "completion mark failed");
    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "completed");

    let (code, _, _) = run_cli(&dir, &["completion", "clear"]);
    assert_eq!(code, 0, "completion clear failed");
    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "not completed");
}

#[test]
fn test_difficulty_set_and_get() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["difficulty", "set", "colors", "3"]);
    assert_eq!(code, 0, "difficulty set failed");

    let (_, stdout, _) = run_cli(&dir, &["difficulty", "get", "colors"]);
    assert_eq!(stdout.trim(), "3");
    let (_, stdout, _) = run_cli(&dir, &["difficulty", "get", "shapes"]);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_difficulty_out_of_range_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(&dir, &["difficulty", "set", "colors", "5"]);
    assert_ne!(code, 0, "level 5 should be rejected");

    let (code, _, stderr) = run_cli(&dir, &["difficulty", "set", "colors", "abc"]);
    assert_ne!(code, 0, "non-numeric level should be rejected");
    assert!(stderr.contains("'abc' is not a difficulty level"));

    let (_, stdout, _) = run_cli(&dir, &["difficulty", "get", "colors"]);
    assert_eq!(stdout.trim(), "1");
}

#[test]
fn test_settings_age_band_and_sound() {
    let dir = TempDir::new().unwrap();
    let (_, stdout, _) = run_cli(&dir, &["settings", "age-band"]);
    assert_eq!(stdout.trim(), "3-4");

    let (code, _, _) = run_cli(&dir, &["settings", "age-band", "5-6"]);
    assert_eq!(code, 0, "settings age-band failed");
    let (_, stdout, _) = run_cli(&dir, &["settings", "age-band"]);
    assert_eq!(stdout.trim(), "5-6");

    let (code, _, _) = run_cli(&dir, &["settings", "sound", "off"]);
    assert_eq!(code, 0, "settings sound failed");
    let (_, stdout, _) = run_cli(&dir, &["settings", "sound"]);
    assert_eq!(stdout.trim(), "off");
}

#[test]
fn test_play_scripted_session_completes_day() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        &dir,
        &["play", "--activity", "colors", "--answers", "ccccc", "--seed", "7"],
    );
    assert_eq!(code, 0, "play failed");
    assert!(stdout.contains("Level up: 1 -> 2"));
    assert!(stdout.contains("You got 5 out of 5 correct!"));

    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "completed");
    let (_, stdout, _) = run_cli(&dir, &["difficulty", "get", "colors"]);
    assert_eq!(stdout.trim(), "2");

    let (code, stdout, _) = run_cli(&dir, &["play", "--answers", "c"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("already done"));
}

#[test]
fn test_play_stops_when_script_runs_out() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(&dir, &["play", "--activity", "shapes", "--answers", "cww"]);
    assert_eq!(code, 0, "play failed");
    assert!(stdout.contains("Stopped after 3 answers (1 correct)"));

    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "not completed");
}

#[test]
fn test_play_rejects_bad_script() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(&dir, &["play", "--activity", "colors", "--answers", "cxz"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid answer"));
}

#[test]
fn test_reset_clears_progress() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["difficulty", "set", "numbers", "3"]);
    run_cli(&dir, &["completion", "mark"]);

    let (code, stdout, _) = run_cli(&dir, &["reset"]);
    assert_eq!(code, 0, "reset failed");
    assert_eq!(stdout.trim(), "progress reset");

    let (_, stdout, _) = run_cli(&dir, &["difficulty", "get", "numbers"]);
    assert_eq!(stdout.trim(), "1");
    let (_, stdout, _) = run_cli(&dir, &["completion", "status"]);
    assert_eq!(stdout.trim(), "not completed");
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let key = "session.correct_answers_to_complete";
    let (code, stdout, _) = run_cli(&dir, &["config", "get", key]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "5");

    let (code, _, _) = run_cli(&dir, &["config", "set", key, "3"]);
    assert_eq!(code, 0, "config set failed");
    let (_, stdout, _) = run_cli(&dir, &["config", "get", key]);
    assert_eq!(stdout.trim(), "3");

    let (code, _, _) = run_cli(&dir, &["config", "get", "nope.missing"]);
    assert_ne!(code, 0);
}
