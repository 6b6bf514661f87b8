//! Configuration file support for polkaforge
//!
//! Loads config from ~/.polkaforge/config.toml. Values resolve as
//! CLI args > env vars (handled by clap) > config file > defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which responder answers in the chat surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponderKind {
    /// Full assistant: transfers, code review, topic buckets
    #[default]
    Assistant,
    /// Lightweight site-help widget
    Widget,
}

impl ResponderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Widget => "widget",
        }
    }
}

/// A demo account exposed by the in-process wallet extension
#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    pub address: String,
    pub name: Option<String>,
}

/// Configuration for polkaforge
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default responder for `chat`
    pub responder: Option<ResponderKind>,

    /// Lower bound of the simulated thinking delay
    pub thinking_min_ms: Option<u64>,

    /// Upper bound of the simulated thinking delay
    pub thinking_max_ms: Option<u64>,

    /// File remembering the last connected account
    pub account_file: Option<PathBuf>,

    /// REPL history file
    pub history_file: Option<PathBuf>,

    /// Accounts offered by the demo wallet extension
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load config from ~/.polkaforge/config.toml, falling back to defaults
    pub fn load() -> Self {
        let path = config_path();

        if !path.exists() {
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn account_file(&self) -> PathBuf {
        self.account_file
            .clone()
            .unwrap_or_else(|| data_dir().join("account"))
    }

    pub fn history_file(&self) -> PathBuf {
        self.history_file
            .clone()
            .unwrap_or_else(|| data_dir().join("chat_history"))
    }
}

/// Directory holding polkaforge state (~/.polkaforge)
pub fn data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".polkaforge")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.responder.is_none());
        assert!(config.accounts.is_empty());
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".polkaforge"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            responder = "widget"
            thinking_min_ms = 100
            thinking_max_ms = 200

            [[accounts]]
            address = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY"
            name = "alice"
            "#,
        )
        .unwrap();
        assert_eq!(config.responder, Some(ResponderKind::Widget));
        assert_eq!(config.thinking_min_ms, Some(100));
        assert_eq!(config.accounts.len(), 1);
        assert_eq!(config.accounts[0].name.as_deref(), Some("alice"));
    }

    #[test]
    fn test_parse_rejects_unknown_responder() {
        assert!(Config::parse(r#"responder = "oracle""#).is_err());
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "thinking_min_ms = \"soon\"").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_default_files_live_in_data_dir() {
        let config = Config::default();
        assert!(config.account_file().starts_with(data_dir()));
        assert!(config.history_file().ends_with("chat_history"));
    }
}
