//! Configuration module for `pathway_advisor`

use crate::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory inside string values
const DIR_VARIABLE: &str = "$PATHWAY_ADVISOR";

/// Parse a knowledge-check pass mark, accepting 0 through 100 inclusive
///
/// # Errors
/// Returns an error if `value` is not a number or is outside the range.
pub fn parse_pass_threshold(value: &str) -> Result<f32, String> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|t| is_percentage(*t))
        .ok_or_else(|| format!("Invalid percentage for 'pass_threshold': '{value}'"))
}

fn is_percentage(value: f32) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Generative-AI backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    /// API base URL (e.g., `https://generativelanguage.googleapis.com/v1beta`)
    #[serde(default)]
    pub endpoint: String,
    /// Model name
    #[serde(default)]
    pub model: String,
    /// API key; empty means read `GEMINI_API_KEY` from the environment
    #[serde(default)]
    pub api_key: String,
    /// Request timeout in seconds (0 means use the default)
    #[serde(default)]
    pub timeout_secs: u64,
}

/// Knowledge-check configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Pass mark override in percent; unset uses each lesson's own mark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_threshold: Option<f32>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// AI backend settings
    #[serde(default)]
    pub ai: AiConfig,
    /// Knowledge-check settings
    #[serde(default)]
    pub quiz: QuizConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override AI endpoint
    pub ai_endpoint: Option<String>,
    /// Override AI model
    pub ai_model: Option<String>,
    /// Override AI API key
    pub ai_key: Option<String>,
    /// Override knowledge-check pass mark
    pub pass_threshold: Option<f32>,
}

impl Config {
    /// Get the `$PATHWAY_ADVISOR` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/pathwayadvisor`
    /// - macOS: `~/Library/Application Support/pathwayadvisor`
    /// - Windows: `%APPDATA%\pathwayadvisor`
    #[must_use]
    pub fn get_app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pathwayadvisor")
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds so
    /// development runs keep a separate file.
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_app_dir().join(CONFIG_FILE_NAME)
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fills fields that are empty (or zero) here but set in `defaults`, so
    /// config files written by older versions pick up new settings.
    ///
    /// # Returns
    ///
    /// `true` if any field changed
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (field, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.ai.endpoint, &defaults.ai.endpoint),
            (&mut self.ai.model, &defaults.ai.model),
        ] {
            if field.is_empty() && !default.is_empty() {
                field.clone_from(default);
                changed = true;
            }
        }

        if self.ai.timeout_secs == 0 && defaults.ai.timeout_secs != 0 {
            self.ai.timeout_secs = defaults.ai.timeout_secs;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Only `Some` values replace config values; the config file is not
    /// touched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(endpoint) = &overrides.ai_endpoint {
            self.ai.endpoint.clone_from(endpoint);
        }
        if let Some(model) = &overrides.ai_model {
            self.ai.model.clone_from(model);
        }
        if let Some(key) = &overrides.ai_key {
            self.ai.api_key.clone_from(key);
        }
        if let Some(threshold) = overrides.pass_threshold {
            if is_percentage(threshold) {
                self.quiz.pass_threshold = Some(threshold);
            } else {
                warn!("Ignoring pass threshold override {threshold}: must be between 0 and 100");
            }
        }
    }

    /// Expand `$PATHWAY_ADVISOR` to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let app_dir = Self::get_app_dir();
            value.replace(DIR_VARIABLE, app_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults; `$PATHWAY_ADVISOR` is
    /// expanded in the log file path. A `quiz.pass_threshold` outside
    /// 0..=100 is dropped so the lesson's own pass mark applies.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.logging.file = Self::expand_variables(&config.logging.file);
        if let Some(threshold) = config.quiz.pass_threshold.filter(|t| !is_percentage(*t)) {
            warn!("Ignoring quiz.pass_threshold = {threshold}: must be between 0 and 100");
            config.quiz.pass_threshold = None;
        }
        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, creating it from
    /// defaults on first run
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from a specific file
    ///
    /// - existing file: parse, merge missing fields from defaults, save back
    ///   if anything was added
    /// - missing file: write defaults there and return them
    /// - unreadable or invalid file: return defaults without touching it
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(config_file);
                    }
                    return config;
                }
            }
        } else {
            let _ = defaults.save_to(config_file);
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config
    /// cannot be serialized, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `endpoint`, `model`,
    /// `api_key`, `timeout_secs`, `pass_threshold`. The API key is masked.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "endpoint" => Some(self.ai.endpoint.clone()),
            "model" => Some(self.ai.model.clone()),
            "api_key" | "api-key" => Some(mask(&self.ai.api_key)),
            "timeout_secs" | "timeout-secs" => Some(self.ai.timeout_secs.to_string()),
            "pass_threshold" | "pass-threshold" => Some(
                self.quiz
                    .pass_threshold
                    .map_or_else(String::new, |t| t.to_string()),
            ),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error for unknown keys or values that do not parse
    /// (`verbose` must be a boolean, `timeout_secs` an integer,
    /// `pass_threshold` a number between 0 and 100).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "endpoint" => self.ai.endpoint = value.to_string(),
            "model" => self.ai.model = value.to_string(),
            "api_key" | "api-key" => self.ai.api_key = value.to_string(),
            "timeout_secs" | "timeout-secs" => {
                self.ai.timeout_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid integer value for 'timeout_secs': '{value}'"))?;
            }
            "pass_threshold" | "pass-threshold" => {
                let threshold = parse_pass_threshold(value)?;
                self.quiz.pass_threshold = Some(threshold);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "endpoint" => self.ai.endpoint.clone_from(&defaults.ai.endpoint),
            "model" => self.ai.model.clone_from(&defaults.ai.model),
            "api_key" | "api-key" => self.ai.api_key.clone_from(&defaults.ai.api_key),
            "timeout_secs" | "timeout-secs" => self.ai.timeout_secs = defaults.ai.timeout_secs,
            "pass_threshold" | "pass-threshold" => self.quiz.pass_threshold = defaults.quiz.pass_threshold,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// The next [`load()`](Config::load) recreates it. Succeeds if the file
    /// does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        let tail: String = secret
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("****{tail}")
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[ai]")?;
        writeln!(f, "  endpoint = \"{}\"", self.ai.endpoint)?;
        writeln!(f, "  model = \"{}\"", self.ai.model)?;
        writeln!(f, "  api_key = \"{}\"", mask(&self.ai.api_key))?;
        writeln!(f, "  timeout_secs = {}", self.ai.timeout_secs)?;

        writeln!(f, "\n[quiz]")?;
        match self.quiz.pass_threshold {
            Some(t) => writeln!(f, "  pass_threshold = {t}")?,
            None => writeln!(f, "  pass_threshold = (per lesson)")?,
        }

        Ok(())
    }
}
