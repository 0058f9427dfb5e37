use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

/// Application settings
///
/// Read from `config.json` in the user's config directory:
/// - Linux: ~/.config/is-console/config.json
/// - macOS: ~/Library/Application Support/is-console/config.json
/// - Windows: %APPDATA%\is-console\config.json
///
/// Every field has a default, so a missing file or a partial file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the index server
    pub api_url: String,
    /// Route shown at startup
    pub start_path: String,
    /// Extra file records merged into the built-in registry
    pub registry_file: Option<PathBuf>,
    pub oauth: OAuthSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OAuthSettings {
    pub client_id: String,
    pub scope: String,
    pub redirect_uri: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:9876".to_string(),
            start_path: "/".to_string(),
            registry_file: None,
            oauth: OAuthSettings::default(),
        }
    }
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            scope: "email profile openid".to_string(),
            redirect_uri: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var_os("IS_CONSOLE_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        info!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Where the config file lives when `IS_CONSOLE_CONFIG` is unset
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("is-console");
        path.push("config.json");
        Some(path)
    }

    /// Override fields from `IS_CONSOLE_*` variables, looked up through `var`.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("IS_CONSOLE_API_URL") {
            self.api_url = url;
        }
        if let Some(client_id) = var("IS_CONSOLE_OAUTH_CLIENT_ID") {
            self.oauth.client_id = client_id;
        }
        if let Some(start) = var("IS_CONSOLE_START_PATH") {
            self.start_path = start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:9876");
        assert_eq!(config.start_path, "/");
        assert_eq!(config.oauth.scope, "email profile openid");
        assert!(config.registry_file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"api_url": "http://index:1234", "oauth": {{"client_id": "abc"}}}}"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.api_url, "http://index:1234");
        assert_eq!(config.oauth.client_id, "abc");
        assert_eq!(config.oauth.scope, "email profile openid");
        assert_eq!(config.start_path, "/");
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "api_url = 3").unwrap();

        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("IS_CONSOLE_API_URL", "http://other:1"),
            ("IS_CONSOLE_START_PATH", "/login"),
        ]);
        let mut config = AppConfig::default();

        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "http://other:1");
        assert_eq!(config.start_path, "/login");
        assert_eq!(config.oauth.client_id, "");
    }
}
