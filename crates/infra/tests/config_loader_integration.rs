//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;

use agenda_infra::config;
use tempfile::Builder;

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[api]
base_url = "https://agenda.example/api/v1"
timeout_secs = 15
read_attempts = 3

[cache]
stale_after_secs = 60

[ui]
page_size = 20
dashboard_recent = 8
"#;

    let mut temp_file =
        Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(temp_file.path()).expect("config should load");

    assert_eq!(config.api.base_url, "https://agenda.example/api/v1");
    assert_eq!(config.api.timeout_secs, 15);
    assert_eq!(config.api.read_attempts, 3);
    assert_eq!(config.cache.stale_after_secs, 60);
    assert_eq!(config.cache.max_capacity, 256);
    assert_eq!(config.ui.page_size, 20);
    assert_eq!(config.ui.dashboard_recent, 8);
    assert!(config.auth.token.is_none());
    assert!(config::validate(&config).is_ok());
}

#[test]
fn test_load_config_from_json_file() {
    let json_content = r#"{
        "api": { "base_url": "http://127.0.0.1:3333" },
        "auth": { "token": "abc" }
    }"#;

    let mut temp_file =
        Builder::new().suffix(".json").tempfile().expect("Failed to create temp file");
    temp_file.write_all(json_content.as_bytes()).expect("Failed to write to temp file");

    let config = config::load_from_file(temp_file.path()).expect("config should load");

    assert_eq!(config.api.base_url, "http://127.0.0.1:3333");
    assert_eq!(config.auth.token.as_deref(), Some("abc"));
    assert_eq!(config.api.timeout_secs, 30);
}

#[test]
fn test_invalid_base_url_fails_validation() {
    let mut temp_file =
        Builder::new().suffix(".toml").tempfile().expect("Failed to create temp file");
    temp_file
        .write_all(b"[api]\nbase_url = \"not a url\"\n")
        .expect("Failed to write to temp file");

    let config = config::load_from_file(temp_file.path()).expect("file itself parses");
    assert!(config::validate(&config).is_err());
}
