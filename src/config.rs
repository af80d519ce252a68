//! User configuration, persisted as TOML in `$XDG_CONFIG_HOME/lumina/config.toml`.
//!
//! Every field has a default, so a missing file or a partial file both work.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or rendering the configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(lumina::config::read),
        help("Ensure the config file is readable, or remove it to use defaults.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(lumina::config::parse),
        help("Check the TOML syntax. Run `lumina config` to print a valid default config.")
    )]
    Parse { path: String, message: String },

    #[error("failed to serialize config: {message}")]
    #[diagnostic(code(lumina::config::serialize))]
    Serialize { message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Generative-model settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Base URL of the generative-language API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model used for single-document summaries.
    #[serde(default = "default_summary_model")]
    pub summary_model: String,
    /// Higher-tier model used for roadmap synthesis.
    #[serde(default = "default_roadmap_model")]
    pub roadmap_model: String,
    #[serde(default = "default_summary_temperature")]
    pub summary_temperature: f64,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_summary_model() -> String {
    "gemini-3-flash-preview".into()
}
fn default_roadmap_model() -> String {
    "gemini-3-pro-preview".into()
}
fn default_summary_temperature() -> f64 {
    0.7
}
fn default_timeout_secs() -> u64 {
    120
}
fn default_api_key_env() -> String {
    "API_KEY".into()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            summary_model: default_summary_model(),
            roadmap_model: default_roadmap_model(),
            summary_temperature: default_summary_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl AiConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Where documents come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// TOML fixture to load instead of the bundled documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LuminaConfig {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub library: LibraryConfig,
}

impl LuminaConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = LuminaConfig::default();
        assert_eq!(config.ai.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.ai.summary_model, "gemini-3-flash-preview");
        assert_eq!(config.ai.roadmap_model, "gemini-3-pro-preview");
        assert_eq!(config.ai.summary_temperature, 0.7);
        assert_eq!(config.ai.timeout_secs, 120);
        assert_eq!(config.ai.api_key_env, "API_KEY");
        assert!(config.library.documents.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ai]\nroadmap_model = \"gemini-2.5-pro\"\n\n[library]\ndocuments = \"/tmp/docs.toml\"\n",
        )
        .unwrap();
        let config = LuminaConfig::load(&path).unwrap();
        assert_eq!(config.ai.roadmap_model, "gemini-2.5-pro");
        assert_eq!(config.ai.summary_model, "gemini-3-flash-preview");
        assert_eq!(config.library.documents, Some(PathBuf::from("/tmp/docs.toml")));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LuminaConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, LuminaConfig::default());
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ai\n").unwrap();
        assert!(matches!(LuminaConfig::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rendered_toml_round_trips() {
        let config = LuminaConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("summary_model = \"gemini-3-flash-preview\""));
        let parsed: LuminaConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn api_key_reads_named_variable() {
        let config = AiConfig {
            api_key_env: "LUMINA_TEST_KEY_THAT_IS_NEVER_SET".into(),
            ..Default::default()
        };
        assert!(config.api_key().is_none());
    }
}
