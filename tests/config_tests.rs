//! Integration tests for configuration management

use pathway_advisor::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(!config.ai.endpoint.is_empty(), "Default AI endpoint should not be empty");
    assert!(!config.ai.model.is_empty(), "Default AI model should not be empty");
    assert_eq!(config.ai.timeout_secs, 30);
    assert!(config.quiz.pass_threshold.is_none());
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[ai]
endpoint = "http://localhost:9000/v1"
model = "test-model"
api_key = "abc123"
timeout_secs = 5

[quiz]
pass_threshold = 80.0
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.ai.endpoint, "http://localhost:9000/v1");
    assert_eq!(config.ai.model, "test-model");
    assert_eq!(config.ai.api_key, "abc123");
    assert_eq!(config.ai.timeout_secs, 5);
    assert_eq!(config.quiz.pass_threshold, Some(80.0));
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "warn"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "warn");
    assert!(config.logging.file.is_empty());
    assert!(!config.logging.verbose);
    assert!(config.ai.endpoint.is_empty());
    assert_eq!(config.ai.timeout_secs, 0);
    assert!(config.quiz.pass_threshold.is_none());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
level = "info"
file = "$PATHWAY_ADVISOR/logs/test.log"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert!(!config.logging.file.contains("$PATHWAY_ADVISOR"));
    assert!(config.logging.file.ends_with("logs/test.log") || config.logging.file.ends_with("logs\\test.log"));
    assert!(config.logging.file.contains("pathwayadvisor"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level"), Some("debug".to_string()));

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose"), Some("true".to_string()));

    config.set("model", "gemini-test").expect("Failed to set model");
    assert_eq!(config.get("model"), Some("gemini-test".to_string()));

    config.set("timeout-secs", "12").expect("Failed to set timeout");
    assert_eq!(config.ai.timeout_secs, 12);

    config.set("pass_threshold", "82.5").expect("Failed to set pass threshold");
    assert_eq!(config.get("pass_threshold"), Some("82.5".to_string()));

    assert_eq!(config.get("unknown_key"), None);
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_bad_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("verbose", "sometimes").is_err());
    assert!(config.set("timeout_secs", "-1").is_err());
    assert!(config.set("pass_threshold", "150").is_err());
    assert!(config.set("pass_threshold", "lots").is_err());
}

#[test]
fn test_config_api_key_is_masked() {
    let mut config = Config::from_defaults();
    config.set("api_key", "sk-verysecret-9876").expect("Failed to set key");

    assert_eq!(config.ai.api_key, "sk-verysecret-9876");
    assert_eq!(config.get("api_key"), Some("****9876".to_string()));
    assert!(!config.to_string().contains("verysecret"));
}

#[test]
fn test_config_unset() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    config.set("model", "custom").expect("Failed to set model");
    config.set("pass_threshold", "90").expect("Failed to set threshold");

    config.unset("model", &defaults).expect("Failed to unset");
    config.unset("pass_threshold", &defaults).expect("Failed to unset");

    assert_eq!(config.ai.model, defaults.ai.model);
    assert!(config.quiz.pass_threshold.is_none());
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "error").expect("Failed to set level");
    config.set("pass_threshold", "65").expect("Failed to set threshold");
    config.save_to(&config_file).expect("Failed to save config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config file");
    assert!(content.contains("[logging]"));
    assert!(content.contains("[ai]"));

    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "error");
    assert_eq!(loaded.quiz.pass_threshold, Some(65.0));
    assert_eq!(loaded.ai.model, config.ai.model);
}

#[test]
fn test_config_load_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let loaded = Config::load_from(&config_file);

    assert!(config_file.exists(), "first load should write defaults");
    assert_eq!(loaded.ai.endpoint, Config::from_defaults().ai.endpoint);
}

#[test]
fn test_config_load_merges_new_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("has parent")).expect("mkdir");
    fs::write(&config_file, "[logging]\nlevel = \"info\"\n").expect("write");

    let loaded = Config::load_from(&config_file);

    assert_eq!(loaded.logging.level, "info");
    assert!(!loaded.ai.model.is_empty());
    let content = fs::read_to_string(&config_file).expect("read");
    assert!(content.contains("model"), "merged fields should be saved back");
}

#[test]
fn test_config_load_invalid_file_falls_back() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("has parent")).expect("mkdir");
    fs::write(&config_file, "this is = = not toml").expect("write");

    let loaded = Config::load_from(&config_file);

    assert_eq!(loaded.ai.model, Config::from_defaults().ai.model);
    let content = fs::read_to_string(&config_file).expect("read");
    assert_eq!(content, "this is = = not toml", "invalid files are left alone");
}

#[test]
fn test_config_overrides() {
    let mut config = Config::from_defaults();
    let original_model = config.ai.model.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ai_endpoint: Some("http://127.0.0.1:1".to_string()),
        pass_threshold: Some(50.0),
        ..ConfigOverrides::default()
    };
    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.ai.endpoint, "http://127.0.0.1:1");
    assert_eq!(config.ai.model, original_model);
    assert_eq!(config.quiz.pass_threshold, Some(50.0));
}

#[test]
fn test_config_overrides_ignore_bad_pass_threshold() {
    for bad in [150.0, -5.0, f32::NAN] {
        let mut config = Config::from_defaults();
        config.set("pass_threshold", "80").expect("valid");
        config.apply_overrides(&ConfigOverrides {
            pass_threshold: Some(bad),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.quiz.pass_threshold, Some(80.0), "override {bad}");
    }
}

#[test]
fn test_config_bad_pass_threshold_in_file_is_dropped() {
    let config = Config::from_toml("[logging]\nlevel = \"warn\"\n\n[quiz]\npass_threshold = 150.0\n").expect("parse");
    assert_eq!(config.quiz.pass_threshold, None);

    let config = Config::from_toml("[logging]\nlevel = \"warn\"\n\n[quiz]\npass_threshold = 60.0\n").expect("parse");
    assert_eq!(config.quiz.pass_threshold, Some(60.0));

    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().expect("has parent")).expect("mkdir");
    fs::write(&config_file, "[logging]\nlevel = \"warn\"\n\n[quiz]\npass_threshold = -20.0\n").expect("write");
    let loaded = Config::load_from(&config_file);
    assert_eq!(loaded.logging.level, "warn");
    assert_eq!(loaded.quiz.pass_threshold, None);
    assert_eq!(loaded.get("pass_threshold").as_deref(), Some(""));
}

#[test]
fn test_config_display() {
    let config = Config::from_defaults();
    let display = format!("{config}");

    assert!(display.contains("[logging]"));
    assert!(display.contains("[ai]"));
    assert!(display.contains("[quiz]"));
    assert!(display.contains("pass_threshold = (per lesson)"));
}

#[test]
fn test_merge_defaults() {
    let defaults = Config::from_defaults();
    let mut config = Config::from_toml("[logging]\nlevel = \"error\"\n").expect("parse");

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.logging.level, "error", "set values are kept");
    assert_eq!(config.ai.endpoint, defaults.ai.endpoint);
    assert_eq!(config.ai.timeout_secs, defaults.ai.timeout_secs);

    assert!(!config.merge_defaults(&defaults), "second merge changes nothing");
}

#[test]
fn test_config_dir_and_path() {
    let dir = Config::get_app_dir();
    assert!(dir.ends_with("pathwayadvisor"));

    let path = Config::get_config_file_path();
    assert!(path.starts_with(&dir));
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    assert!(name == "config.toml" || name == "dconfig.toml");
}
