//! Unit tests for configuration resolution and file helpers
//!
//! Covers:
//! - Config path priority (CLI → ENV → user config dir → none)
//! - Missing config files degrade to defaults instead of failing
//! - Atomic writes leave no temp file behind
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate SEKAI_TEST_CONFIG are marked with #[serial].

use sekai_common::config::{
    load_json_file, load_toml_or_default, write_atomic, ConfigFileResolver,
};
use sekai_common::Error;
use serde::Deserialize;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

const TEST_ENV_VAR: &str = "SEKAI_TEST_CONFIG";

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct SampleConfig {
    name: String,
    page_size: u32,
}

#[test]
#[serial]
fn test_cli_override_beats_environment() {
    env::set_var(TEST_ENV_VAR, "/tmp/from-env.toml");

    let resolver = ConfigFileResolver::new("sample.toml", TEST_ENV_VAR)
        .with_cli_override(Some(PathBuf::from("/tmp/from-cli.toml")));

    assert_eq!(resolver.resolve(), Some(PathBuf::from("/tmp/from-cli.toml")));

    env::remove_var(TEST_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_used_without_cli() {
    env::set_var(TEST_ENV_VAR, "/tmp/from-env.toml");

    let resolver = ConfigFileResolver::new("sample.toml", TEST_ENV_VAR);
    assert_eq!(resolver.resolve(), Some(PathBuf::from("/tmp/from-env.toml")));

    env::remove_var(TEST_ENV_VAR);
}

#[test]
#[serial]
fn test_blank_environment_is_ignored() {
    env::set_var(TEST_ENV_VAR, "   ");

    let resolver = ConfigFileResolver::new("sekai-test-does-not-exist.toml", TEST_ENV_VAR);
    assert_eq!(resolver.resolve(), None);

    env::remove_var(TEST_ENV_VAR);
}

#[test]
fn test_missing_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    let config: SampleConfig = load_toml_or_default(Some(&missing)).unwrap();
    assert_eq!(config, SampleConfig::default());

    let config: SampleConfig = load_toml_or_default(None).unwrap();
    assert_eq!(config, SampleConfig::default());
}

#[test]
fn test_partial_config_fills_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("partial.toml");
    std::fs::write(&path, "name = \"sync\"\n").unwrap();

    let config: SampleConfig = load_toml_or_default(Some(&path)).unwrap();
    assert_eq!(config.name, "sync");
    assert_eq!(config.page_size, 0);
}

#[test]
fn test_malformed_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");
    std::fs::write(&path, "name = [unterminated").unwrap();

    let result: sekai_common::Result<SampleConfig> = load_toml_or_default(Some(&path));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_atomic_write_creates_parents_and_cleans_temp() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("public").join("database.json");

    write_atomic(&target, "[]".as_bytes()).unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "[]");
    assert!(!temp_dir.path().join("public").join("database.json.tmp").exists());
}

#[test]
fn test_atomic_write_replaces_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("out.json");

    write_atomic(&target, b"first").unwrap();
    write_atomic(&target, b"second").unwrap();

    assert_eq!(std::fs::read_to_string(&target).unwrap(), "second");
}

#[test]
fn test_load_json_missing_file_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let result: sekai_common::Result<HashMap<String, String>> =
        load_json_file(&temp_dir.path().join("manual_ids.json"));
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_load_json_reads_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("manual_ids.json");
    std::fs::write(&path, r#"{"セカイ": "セカイ (世界)"}"#).unwrap();

    let table: HashMap<String, String> = load_json_file(&path).unwrap();
    assert_eq!(table.get("セカイ").map(String::as_str), Some("セカイ (世界)"));
}
