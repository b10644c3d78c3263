//! Integration tests: run the binary without a terminal.

use std::fs;
use std::process::Command;

#[test]
fn binary_prints_version() {
    // EXPECT: Binary runs and prints version "0.1.0" to stdout
    let output = Command::new(env!("CARGO_BIN_EXE_tracelens"))
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.contains("0.1.0"),
        "Expected output to contain version '0.1.0', but got: {}",
        stdout
    );
}

#[test]
fn dump_prints_annotated_view_as_json() {
    let dir = std::env::temp_dir().join(format!("tracelens-dump-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let transcript = dir.join("trace.txt");
    let config = dir.join("config.toml");
    fs::write(
        &transcript,
        "--- AI Message ---\nhello\n--- Tool Message (call_id: abc) ---\n{}\n--- AI Message ---\nbye",
    )
    .expect("write transcript");
    fs::write(
        &config,
        format!("log_file_path = {:?}\n", dir.join("tracelens.log").display().to_string()),
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_tracelens"))
        .arg("--config")
        .arg(&config)
        .args(["--dump", "--final-only", "ai", "--search", "bye"])
        .arg(&transcript)
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(report["final_only"], "ai");
    assert_eq!(report["blocks"].as_array().map(Vec::len), Some(1));
    assert_eq!(report["blocks"][0]["full_text"], "--- AI Message ---\nbye");
    assert_eq!(report["search"]["matches"][0]["text"], "bye");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_fails_with_message() {
    let output = Command::new(env!("CARGO_BIN_EXE_tracelens"))
        .args(["--dump", "/nonexistent/tracelens/trace.txt"])
        .env("TRACELENS_CONFIG", "/nonexistent/tracelens/config.toml")
        .env("XDG_STATE_HOME", std::env::temp_dir())
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
