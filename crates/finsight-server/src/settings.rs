//! Server settings
//!
//! Optional TOML file with server defaults. CLI flags take precedence over
//! the file, and `FINSIGHT_ALLOWED_ORIGINS` is merged into the file's origins.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 5000
//! model_path = "/var/lib/finsight/budget_model.json"
//! allowed_origins = ["http://localhost:8080"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use crate::ServerConfig;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "finsight.toml";

/// Comma-separated extra CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "FINSIGHT_ALLOWED_ORIGINS";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    pub allowed_origins: Vec<String>,
}

impl ServerSettings {
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Invalid server settings")
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Append origins from a comma-separated list, skipping duplicates
    pub fn merge_origins(&mut self, input: &str) {
        for origin in parse_origins(input) {
            if !self.allowed_origins.contains(&origin) {
                self.allowed_origins.push(origin);
            }
        }
    }

    /// Merge `FINSIGHT_ALLOWED_ORIGINS` when set
    pub fn merge_env(&mut self) {
        if let Ok(value) = std::env::var(ALLOWED_ORIGINS_ENV) {
            self.merge_origins(&value);
        }
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            allowed_origins: self.allowed_origins.clone(),
        }
    }
}

/// Parse a comma-separated list of CORS origins
///
/// Examples:
/// - "http://localhost:8080"
/// - "https://app.example.com, http://192.168.1.10:8080"
/// - "*" (any origin)
pub fn parse_origins(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test/, ,https://b.test "),
            vec!["http://a.test", "https://b.test"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_from_toml_str() {
        let settings = ServerSettings::from_toml_str(
            r#"
            host = "0.0.0.0"
            port = 5000
            model_path = "models/budget_model.json"
            allowed_origins = ["http://localhost:8080"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(settings.port, Some(5000));
        assert_eq!(
            settings.model_path,
            Some(PathBuf::from("models/budget_model.json"))
        );
        assert_eq!(
            settings.server_config().allowed_origins,
            vec!["http://localhost:8080"]
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(ServerSettings::from_toml_str("prot = 1").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ServerSettings::load(&dir.path().join(SETTINGS_FILE)).unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "port = 8088\n").unwrap();

        let settings = ServerSettings::load(&path).unwrap();
        assert_eq!(settings.port, Some(8088));
        assert!(settings.host.is_none());
    }

    #[test]
    fn test_merge_origins_dedupes() {
        let mut settings = ServerSettings {
            allowed_origins: vec!["http://a.test".to_string()],
            ..Default::default()
        };
        settings.merge_origins("http://a.test,http://b.test");
        assert_eq!(
            settings.allowed_origins,
            vec!["http://a.test", "http://b.test"]
        );
    }
}
