//! 設定ファイルテスト

use insect_search::config::Config;
use tempfile::tempdir;

#[test]
fn test_missing_file_is_default() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.base_url, "http://localhost:5001");
    assert_eq!(config.timeout_seconds, 30);
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://insects.example.org/").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.base_url, "https://insects.example.org");
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_seconds": 5}"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.timeout_seconds, 5);
    assert_eq!(loaded.base_url, "http://localhost:5001");
}

#[test]
fn test_invalid_base_url() {
    let mut config = Config::default();
    assert!(config.set_base_url("localhost:5001").is_err());
    assert_eq!(config.base_url, "http://localhost:5001");
}

#[test]
fn test_cli_override_wins() {
    let config = Config::default();
    assert_eq!(config.resolve_base_url(Some(" http://10.0.0.2:5001 ")), "http://10.0.0.2:5001");
}
