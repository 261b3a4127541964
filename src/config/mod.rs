//! Configuration: WeChat credentials and data paths.
//!
//! Credentials come from the environment exactly once, at client
//! construction, and are passed explicitly to whatever needs them; no
//! code path re-reads the environment per call.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the Official Account AppID.
pub const ENV_APP_ID: &str = "WECHAT_APP_ID";
/// Environment variable holding the Official Account AppSecret.
pub const ENV_APP_SECRET: &str = "WECHAT_APP_SECRET";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable `{0}` is not set")]
    MissingEnv(&'static str),

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),
}

/// WeChat Official Account credentials.
#[derive(Clone)]
pub struct Credentials {
    pub app_id: String,
    pub app_secret: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
        }
    }

    /// Read credentials from `WECHAT_APP_ID` / `WECHAT_APP_SECRET`.
    ///
    /// Unset or empty variables are an error: a client constructed with
    /// blank credentials would fail on every call with an opaque API
    /// error instead.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Testable core of [`Credentials::from_env`].
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingEnv(key))
        };
        Ok(Self {
            app_id: read(ENV_APP_ID)?,
            app_secret: read(ENV_APP_SECRET)?,
        })
    }
}

// The secret stays out of logs and error chains.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"****")
            .finish()
    }
}

/// Toolkit configuration, loadable from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root for generated state: token cache, SVG artifacts.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Ok(toml::from_str(&text)?)
    }

    /// Where the cached access token is persisted.
    pub fn token_cache_path(&self) -> PathBuf {
        self.data_dir.join("app_token.toml")
    }

    /// Where SVG conversion artifacts are written.
    pub fn svg_out_dir(&self) -> PathBuf {
        self.data_dir.join("svg")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.token_cache_path(), PathBuf::from("data/app_token.toml"));
        assert_eq!(config.svg_out_dir(), PathBuf::from("data/svg"));
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wxpub.toml");
        std::fs::write(&path, "data_dir = \"state\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("state"));
        assert_eq!(config.svg_out_dir(), PathBuf::from("state/svg"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = Credentials::from_lookup(|key| match key {
            ENV_APP_ID => Some("wx123".to_string()),
            ENV_APP_SECRET => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.app_id, "wx123");
        assert_eq!(creds.app_secret, "secret");
    }

    #[test]
    fn test_credentials_missing_or_empty_env() {
        let missing = Credentials::from_lookup(|_| None);
        assert!(matches!(missing, Err(ConfigError::MissingEnv(ENV_APP_ID))));

        let empty_secret = Credentials::from_lookup(|key| match key {
            ENV_APP_ID => Some("wx123".to_string()),
            _ => Some(String::new()),
        });
        assert!(matches!(
            empty_secret,
            Err(ConfigError::MissingEnv(ENV_APP_SECRET))
        ));
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("wx123", "topsecret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("wx123"));
        assert!(!debug.contains("topsecret"));
    }
}
