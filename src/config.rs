//! Configuration loading and management
//!
//! Handles parsing of `.td.toml` configuration files. A missing or invalid
//! file falls back to defaults; configuration never fails the process at
//! load time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

pub const CONFIG_FILE: &str = ".td.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote service configuration
    #[serde(default)]
    pub api: ApiConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address of the task service, including any route prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Transport-level request timeout (e.g., "30s", "2m")
    #[serde(default = "default_timeout")]
    pub timeout: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/tasks".to_string()
}

fn default_timeout() -> String {
    "30s".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from the current directory, falling back to the
    /// user config dir, then to defaults.
    pub fn load() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        if cwd.join(CONFIG_FILE).exists() {
            return Self::load_from(&cwd);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "td") {
            let dir = dirs.config_dir().to_path_buf();
            if dir.join(CONFIG_FILE).exists() {
                return Self::load_from(&dir);
            }
        }

        Self::default()
    }

    /// Load configuration from `<dir>/.td.toml`, defaulting when the file
    /// is missing or unparseable.
    pub fn load_from(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %config_path.display(), %err, "invalid config, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %config_path.display(), %err, "unreadable config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse the configured request timeout.
    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(&self.api.timeout)
    }
}

/// Parse a short duration string such as "30s", "2m", or "1h".
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    if s.is_empty() {
        return Err(Error::InvalidConfig("timeout cannot be empty".to_string()));
    }

    let (num_str, unit) = if let Some(pos) = s.find(|c: char| !c.is_ascii_digit()) {
        (&s[..pos], &s[pos..])
    } else {
        // Assume seconds if no unit
        (s, "s")
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("invalid timeout number: {}", num_str)))?;

    let secs = match unit.to_lowercase().as_str() {
        "s" | "sec" | "second" | "seconds" => num,
        "m" | "min" | "minute" | "minutes" => num * 60,
        "h" | "hr" | "hour" | "hours" => num * 3600,
        _ => {
            return Err(Error::InvalidConfig(format!(
                "invalid timeout unit '{}'. Expected: s, m, h",
                unit
            )));
        }
    };

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.api.base_url, "http://127.0.0.1:5000/tasks");
        assert_eq!(cfg.api.timeout, "30s");
        assert_eq!(cfg.timeout().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let content = r#"
[api]
base_url = "https://todo.example.net/tasks"
timeout = "2m"
"#;
        fs::write(dir.path().join(CONFIG_FILE), content.trim()).expect("write config");

        let cfg = Config::load_from(dir.path());
        assert_eq!(cfg.api.base_url, "https://todo.example.net/tasks");
        assert_eq!(cfg.timeout().unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn parse_duration_accepts_units() {
        assert_eq!(parse_duration("45").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("3m").unwrap(), Duration::from_secs(180));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert!(parse_duration("").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("abc").is_err());
    }
}
