//! Tests that run the built binary.

use std::process::{Command, Output};

use tempfile::TempDir;

use tracker_ops::commands::CommandRegistry;
use tracker_ops::config::CONFIG_ENV_VAR;

fn tracker_ops(args: &[&str], config: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tracker-ops"))
        .args(args)
        .env(CONFIG_ENV_VAR, config)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run tracker-ops")
}

fn help_output() -> String {
    format!("{}\n", CommandRegistry::new().help_text().trim_end())
}

#[test]
fn test_help_ignores_unreadable_config() {
    for argv in [&[][..], &["frobnicate"][..], &["help"][..]] {
        let output = tracker_ops(argv, "/nonexistent/tracker-ops.toml");

        assert_eq!(output.status.code(), Some(0), "argv {:?}", argv);
        assert_eq!(String::from_utf8_lossy(&output.stdout), help_output());
    }
}

#[test]
fn test_help_ignores_invalid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("ops.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let output = tracker_ops(&["restart-all"], &path.display().to_string());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), help_output());
}

#[test]
fn test_command_reports_unreadable_config() {
    let output = tracker_ops(&["status"], "/nonexistent/tracker-ops.toml");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("❌ Configuration error"));
    assert!(stderr.contains("/nonexistent/tracker-ops.toml"));
}
