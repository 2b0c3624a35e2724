// Application configuration
// Loaded from ~/.config/exposure-dash/config.toml (or $EXPOSURE_DASH_CONFIG)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::derive::DEFAULT_TOP_N;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "EXPOSURE_DASH_CONFIG";

/// Answering service settings. The model is fixed here, not chosen per question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnsweringConfig {
    /// Shown in the transcript and in "Error contacting …" answers
    pub service_name: String,

    /// Base URL of an OpenAI-compatible API (`/chat/completions` is appended)
    pub endpoint: String,

    pub model: String,

    /// Name of the environment variable holding the bearer token
    pub api_key_env: String,

    pub timeout_secs: u64,
}

impl Default for AnsweringConfig {
    fn default() -> Self {
        Self {
            service_name: "Grok".to_string(),
            endpoint: "http://localhost:1337/v1".to_string(),
            model: "grok".to_string(),
            api_key_env: "EXPOSURE_DASH_API_KEY".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AnsweringConfig {
    /// The token from `api_key_env`, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Dataset opened at startup when it exists
    pub data_path: PathBuf,

    /// Field separator of the source file
    pub delimiter: char,

    /// Length of the ranking chart
    pub top_n: usize,

    pub answering: AnsweringConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data-x3jzk.csv"),
            delimiter: ',',
            top_n: DEFAULT_TOP_N,
            answering: AnsweringConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("exposure-dash")
            .join("config.toml")
    }

    /// Load the config, falling back to defaults when the file is absent or broken
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e:#}; using default settings");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// The delimiter as a byte; non-ASCII separators fall back to `,`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!("Delimiter {:?} is not ASCII, using ','", self.delimiter);
            b','
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "top_n = 5\n\n[answering]\nmodel = \"grok-2\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.answering.model, "grok-2");
        assert_eq!(config.answering.service_name, "Grok");
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.data_path, PathBuf::from("data-x3jzk.csv"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "top_n = \"ten\"").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_serialized_default_round_trips() {
        let text = toml::to_string(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_delimiter_byte() {
        let mut config = AppConfig {
            delimiter: ';',
            ..Default::default()
        };
        assert_eq!(config.delimiter_byte(), b';');
        config.delimiter = '§';
        assert_eq!(config.delimiter_byte(), b',');
    }

    #[test]
    fn test_api_key_reads_named_variable() {
        let config = AnsweringConfig {
            api_key_env: "EXPOSURE_DASH_TEST_KEY_UNSET_8f3a".into(),
            ..Default::default()
        };
        assert_eq!(config.api_key(), None);
    }
}
