//! Integration tests for the onetwo binary
//!
//! Each test points ONETWO_CONFIG_DIR at a temporary directory so the
//! user's own configuration never leaks in.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const ONETWO_BINARY: &str = env!("CARGO_BIN_EXE_onetwo");
const SECRET: &str = "JBSWY3DPEHPK3PXP";

fn run_onetwo(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(ONETWO_BINARY)
        .args(args)
        .env("ONETWO_CONFIG_DIR", config_dir)
        .env("NO_COLOR", "1")
        .env_remove("JOURNAL_STREAM")
        .output()
        .expect("Failed to run onetwo")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim_end().to_string()
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["code", "decode", "watch", "config"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}

#[test]
fn test_code_at_fixed_time() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["code", SECRET, "--at", "1234567890"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "742275");
}

#[test]
fn test_code_with_algorithm_and_digits() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &["code", "jbsw-y3dp-ehpk-3pxp", "-a", "sha512", "-d", "8", "--at", "1234567890"],
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "03136418");
}

#[test]
fn test_code_invalid_secret_prints_sentinel() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["code", "NOT-BASE-32!"]);

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_of(&output), "Invalid");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid Base32 secret"));
}

#[test]
fn test_code_unsupported_algorithm_is_rejected() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["code", SECRET, "--algorithm", "md5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported hash algorithm"));
}

#[test]
fn test_code_json_output() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &["code", SECRET, "--at", "1234567890", "--json"],
    );

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(report["code"], "742275");
    assert_eq!(report["valid"], true);
    assert_eq!(report["digits"], 6);
    assert_eq!(report["period"], 30);
    assert_eq!(report["algorithm"], "SHA1");
    assert_eq!(report["generator"], "live");
    assert_eq!(report["remaining_secs"], 30.0);
    assert_eq!(report["expires_at"], "2009-02-13T23:32:00+00:00");
}

#[test]
fn test_fixed_generator_flag() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &["--generator", "fixed", "code", SECRET, "--at", "1234567890"],
    );

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "152263");
}

#[test]
fn test_uitesting_flag_gives_predictable_codes() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let args = ["code", SECRET, "--at", "1234567890", "--uitesting"];

    let first = run_onetwo(temp_dir.path(), &args);
    let second = run_onetwo(temp_dir.path(), &args);

    assert!(first.status.success());
    let code = stdout_of(&first);
    assert_eq!(code, stdout_of(&second));
    assert_eq!(code, "345748");
}

#[test]
fn test_code_timestamp_out_of_range() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &["code", SECRET, "--at", "18446744073709551615"],
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("timestamp out of range"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_configured_generator_and_label() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "generator = \"fixed\"\ninvalid_code_label = \"Error\"\n",
    )
    .expect("Failed to write config file");

    let output = run_onetwo(temp_dir.path(), &["code", SECRET, "--at", "1234567890"]);
    assert_eq!(stdout_of(&output), "152263");

    // Fixed codes ignore the secret, so force a failure through the digit count
    let output = run_onetwo(temp_dir.path(), &["code", SECRET, "--digits", "4"]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_of(&output), "Error");
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("config.toml"), "refresh_interval_secs = 0\n")
        .expect("Failed to write config file");

    let output = run_onetwo(temp_dir.path(), &["code", SECRET]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Refresh interval cannot be zero"));
}

#[test]
fn test_decode_prints_hex() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["decode", "JBSW Y3DP EHPK 3PXP"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "48656c6c6f21deadbeef");
}

#[test]
fn test_decode_rejects_padding() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(temp_dir.path(), &["decode", "JBSWY3DPEE======"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_config_init_and_show() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let output = run_onetwo(temp_dir.path(), &["config", "show"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("not found, showing defaults"));

    let output = run_onetwo(temp_dir.path(), &["config", "init"]);
    assert!(output.status.success());
    assert!(temp_dir.path().join("config.toml").exists());

    let output = run_onetwo(temp_dir.path(), &["config", "show"]);
    let stdout = stdout_of(&output);
    assert!(!stdout.contains("not found"));
    assert!(stdout.contains("generator = \"live\""));

    // A second init leaves the file alone
    fs::write(temp_dir.path().join("config.toml"), "generator = \"fixed\"\n")
        .expect("Failed to write config file");
    let output = run_onetwo(temp_dir.path(), &["config", "init"]);
    assert!(output.status.success());
    let contents = fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert_eq!(contents, "generator = \"fixed\"\n");
}

#[test]
fn test_watch_refreshes_for_tick_limit() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &[
            "--generator",
            "fixed",
            "watch",
            "work=JBSWY3DPEHPK3PXP",
            "--examples",
            "1",
            "--ticks",
            "2",
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.matches("work").count(), 2);
    assert_eq!(stdout.matches("Example Account 2").count(), 2);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("-- ")).count(), 2);
}

#[test]
fn test_watch_shows_sentinel_for_bad_secret() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output = run_onetwo(
        temp_dir.path(),
        &["watch", "broken=NOT-BASE-32!", "--ticks", "1"],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|l| l.starts_with("broken"))
        .expect("account line should be printed");
    assert!(line.contains("Invalid"));
}
