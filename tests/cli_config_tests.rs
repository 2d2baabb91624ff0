//! End-to-end tests for `abacus config` commands.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Path to the abacus binary
fn abacus_bin() -> String {
    std::env::var("CARGO_BIN_EXE_abacus").unwrap_or_else(|_| "target/release/abacus".to_string())
}

/// Creates a Command with isolated config directory for testing.
/// Pass in a config directory path to share between multiple commands in the same test.
fn isolated_config_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(abacus_bin());
    cmd.env("ABACUS_CONFIG_DIR", config_dir);
    cmd.args(args);
    cmd
}

fn show_json(config_dir: &Path) -> serde_json::Value {
    let output = isolated_config_command(&["config", "show", "--json"], config_dir)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout))
        .expect("Should parse JSON output")
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "show"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rods: 5"));
    assert!(stdout.contains("Theme Mode: auto"));
}

#[test]
fn test_config_show_json_format() {
    let dir = TempDir::new().unwrap();
    let result = show_json(dir.path());

    assert_eq!(result["abacus"]["rod_count"], 5);
    assert_eq!(result["practice"]["default_target"], 42);
    assert_eq!(result["practice"]["max_random_target"], 99);
    assert_eq!(result["ui"]["theme"], "auto");
    assert!(result["path"].as_str().unwrap().ends_with("config.toml"));
}

#[test]
fn test_config_show_invalid_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[abacus]\nrod_count = 40\n").unwrap();

    let output = isolated_config_command(&["config", "show"], dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid rod count 40"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_rods_persists() {
    let dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "set", "--rods", "7"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(dir.path().join("config.toml").exists());
    assert_eq!(show_json(dir.path())["abacus"]["rod_count"], 7);
}

#[test]
fn test_config_set_theme() {
    let dir = TempDir::new().unwrap();
    for (input, expected) in [("dark", "dark"), ("LIGHT", "light"), ("auto", "auto")] {
        let output = isolated_config_command(&["config", "set", "--theme", input], dir.path())
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(show_json(dir.path())["ui"]["theme"], expected);
    }
}

#[test]
fn test_config_set_keeps_unparseable_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let original = "[abacus]\nrod_count = 7\n\n[practice]\ndefault_target = \"oops\"\n";
    std::fs::write(&config_path, original).unwrap();

    let output = isolated_config_command(&["config", "set", "--theme", "dark"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration"));
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), original);
}

#[test]
fn test_config_set_keeps_invalid_file() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    let original = "[abacus]\nrod_count = 40\n";
    std::fs::write(&config_path, original).unwrap();

    let output = isolated_config_command(&["config", "set", "--rods", "6"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), original);
}

#[test]
fn test_config_set_invalid_theme() {
    let dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "set", "--theme", "sepia"], dir.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid theme mode"));
    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_rods_out_of_range() {
    let dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "set", "--rods", "0"], dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));

    // One rod cannot show the default target of 42
    let output = isolated_config_command(&["config", "set", "--rods", "1"], dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not fit"));
}

#[test]
fn test_config_set_requires_an_option() {
    let dir = TempDir::new().unwrap();
    let output = isolated_config_command(&["config", "set"], dir.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("At least one"));
}

#[cfg(unix)]
#[test]
fn test_config_set_unwritable_dir_is_io_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();

    // The config directory path is a regular file, so creating it fails
    let output = isolated_config_command(&["config", "set", "--rods", "6"], &blocker)
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}
