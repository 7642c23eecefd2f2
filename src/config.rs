//! Portal configuration.
//!
//! Layers, lowest to highest precedence: built-in defaults,
//! `<config_dir>/exam-portal/config.json`, `EXAM_PORTAL_*` environment
//! variables, then CLI flags applied by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::guard::{GuardConfig, DEFAULT_SIGN_IN_PATH};

const APP_NAME: &str = "exam-portal";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortalConfig {
    /// Where unauthenticated viewers are redirected.
    pub sign_in_path: String,
    pub host: String,
    pub port: u16,
    /// JSON array of exams to load into the in-memory catalog.
    pub seed_file: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_file: None,
        }
    }
}

impl PortalConfig {
    /// Load from the user's config directory and the environment.
    /// Falls back to defaults if the file is missing or broken.
    pub fn load() -> Self {
        let base = match get_config_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };

        base.clone()
            .apply_env(|key| std::env::var(key).ok())
            .unwrap_or_else(|e| {
                tracing::warn!("Ignoring environment overrides: {}", e);
                base
            })
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overlay `EXAM_PORTAL_*` variables read through `lookup`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("EXAM_PORTAL_SIGN_IN_PATH") {
            self.sign_in_path = path;
        }
        if let Some(host) = lookup("EXAM_PORTAL_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("EXAM_PORTAL_PORT") {
            self.port = port.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "EXAM_PORTAL_PORT",
                value: port,
            })?;
        }
        if let Some(seed) = lookup("EXAM_PORTAL_SEED") {
            self.seed_file = Some(PathBuf::from(seed));
        }
        Ok(self)
    }

    pub fn guard(&self) -> GuardConfig {
        GuardConfig {
            sign_in_path: self.sign_in_path.clone(),
        }
    }
}

fn get_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig::from_file(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "sign_in_path": "/login" }"#).unwrap();

        let config = PortalConfig::from_file(&path).unwrap();
        assert_eq!(config.sign_in_path, "/login");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn broken_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            PortalConfig::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("EXAM_PORTAL_PORT", "8080"),
            ("EXAM_PORTAL_SIGN_IN_PATH", "/signin"),
        ]
        .into_iter()
        .collect();

        let config = PortalConfig::default()
            .apply_env(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.guard().sign_in_path, "/signin");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let result = PortalConfig::default().apply_env(|k| {
            (k == "EXAM_PORTAL_PORT").then(|| "not-a-port".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
    }
}
