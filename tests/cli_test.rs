#[path = "common/mod.rs"]
mod common;

use common::DirectoryTest;
use serial_test::serial;

// Nothing listens on the discard port, so fetches fail fast
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api";

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_path_uses_flag() {
    let dir = DirectoryTest::new();

    let output = dir.run_success(&["config", "path"]);
    assert_eq!(output.trim(), dir.config_path().display().to_string());
}

#[test]
fn test_config_show_defaults() {
    let dir = DirectoryTest::new();

    let output = dir.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("http://localhost:3000/api"));
    assert!(output.contains("talent_page_size: 20"));
    assert!(output.contains("project_page_size: 12"));
}

#[test]
fn test_config_show_json_reflects_file_and_flag() {
    let dir = DirectoryTest::new();
    dir.write_config("browse:\n  talent_page_size: 10\n  hidden_cohorts:\n    - Cohort 6\n");

    let output = dir.run_success(&[
        "config",
        "show",
        "--json",
        "--api-url",
        "https://directory.example.com/api",
    ]);
    let json: serde_json::Value = serde_json::from_str(&output).expect("valid JSON");
    assert_eq!(json["api"]["base_url"], "https://directory.example.com/api");
    assert_eq!(json["browse"]["talent_page_size"], 10);
    assert_eq!(json["browse"]["hidden_cohorts"][0], "Cohort 6");
    assert_eq!(json["config_file_exists"], true);
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = DirectoryTest::new();

    dir.run_success(&["config", "init"]);
    assert!(dir.config_path().exists());

    let stderr = dir.run_failure(&["config", "init"]);
    assert!(stderr.contains("already exists"));

    dir.run_success(&["config", "init", "--force"]);
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = DirectoryTest::new();
    dir.write_config("browse:\n  project_page_size: 0\n");

    let stderr = dir.run_failure(&["config", "show"]);
    assert!(stderr.contains("page sizes must be at least 1"));
}

// ============================================================================
// Argument validation
// ============================================================================

#[test]
fn test_invalid_search_field_rejected() {
    let dir = DirectoryTest::new();

    let stderr = dir.run_failure(&["talents", "ls", "--field", "email"]);
    assert!(stderr.contains("Invalid search field"));
}

#[test]
fn test_unknown_project_type_rejected() {
    let dir = DirectoryTest::new();

    let stderr = dir.run_failure(&["projects", "ls", "--type", "SPACE"]);
    assert!(stderr.contains("Invalid project type"));
}

#[test]
fn test_bad_api_url_rejected() {
    let dir = DirectoryTest::new();

    let stderr = dir.run_failure(&["talents", "ls", "--api-url", "not a url"]);
    assert!(stderr.contains("api.base_url"));
}

// ============================================================================
// Fetch failures
// ============================================================================

#[test]
#[serial]
fn test_unreachable_api_fails_with_inline_message() {
    let dir = DirectoryTest::new();

    let stderr = dir.run_failure(&["talents", "ls", "--api-url", UNREACHABLE_API]);
    assert!(stderr.contains("Failed to load talents."));
}

#[test]
#[serial]
fn test_unreachable_api_fails_profile() {
    let dir = DirectoryTest::new();

    let stderr = dir.run_failure(&["talents", "show", "t1", "--api-url", UNREACHABLE_API]);
    assert!(stderr.contains("Failed to load the profile for 't1'"));
}
