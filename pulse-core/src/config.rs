//! Application configuration.
//!
//! Loaded from a TOML file where every field is optional:
//!
//! ```toml
//! lexicon_path = "lexicon.toml"
//!
//! [reddit]
//! base_url = "https://www.reddit.com"
//! user_agent = "political-pulse/0.1"
//! timeout_secs = 30
//!
//! [feed]
//! channel = "politics"
//! limit = 100
//! ```
//!
//! `REDDIT_CLIENT_ID` and `REDDIT_CLIENT_SECRET` fill the credential fields
//! when set. The public JSON endpoints never send them.

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";
pub const DEFAULT_CHANNEL: &str = "politics";
pub const DEFAULT_LIMIT: u32 = 100;
/// Largest page Reddit serves for a listing.
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub lexicon_path: Option<PathBuf>,
    pub reddit: RedditConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("political-pulse/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            client_id: None,
            client_secret: None,
        }
    }
}

impl RedditConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub channel: String,
    pub limit: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = read_config_file(path)?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Fill credentials from `REDDIT_CLIENT_ID` / `REDDIT_CLIENT_SECRET`.
    pub fn with_env_credentials(mut self) -> Self {
        if let Ok(id) = std::env::var("REDDIT_CLIENT_ID") {
            self.reddit.client_id = Some(id);
        }
        if let Ok(secret) = std::env::var("REDDIT_CLIENT_SECRET") {
            self.reddit.client_secret = Some(secret);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_channel(&self.feed.channel)?;

        if self.feed.limit == 0 || self.feed.limit > MAX_LIMIT {
            return Err(ConfigError::InvalidValue {
                field: "feed.limit".to_string(),
                value: self.feed.limit.to_string(),
            });
        }

        if self.reddit.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "reddit.timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }

        match url::Url::parse(&self.reddit.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: "reddit.base_url".to_string(),
                    value: self.reddit.base_url.clone(),
                })
            }
        }

        if self.reddit.user_agent.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "reddit.user_agent must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Read a configuration file, separating a missing file from other I/O failures.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<String, ConfigError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::Unreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        }
    })
}

/// A channel name is a non-empty run of ASCII letters, digits and underscores.
pub fn validate_channel(channel: &str) -> Result<(), ConfigError> {
    let valid = !channel.is_empty()
        && channel
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: "feed.channel".to_string(),
            value: channel.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feed.channel, "politics");
        assert_eq!(config.feed.limit, 100);
        assert_eq!(config.reddit.base_url, "https://www.reddit.com");
        assert_eq!(config.reddit.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [feed]
            channel = "worldnews"
            "#,
        )
        .unwrap();
        assert_eq!(config.feed.channel, "worldnews");
        assert_eq!(config.feed.limit, 100);
        assert!(config.lexicon_path.is_none());
    }

    #[test]
    fn test_rejects_bad_limit() {
        let err = AppConfig::from_toml_str("[feed]\nlimit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "feed.limit"));

        let err = AppConfig::from_toml_str("[feed]\nlimit = 500\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_bad_channel_and_url() {
        assert!(validate_channel("politics").is_ok());
        assert!(validate_channel("Ask_Politics2").is_ok());
        assert!(validate_channel("").is_err());
        assert!(validate_channel("../etc").is_err());

        let err = AppConfig::from_toml_str("[reddit]\nbase_url = \"ftp://example.com\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "reddit.base_url"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = AppConfig::from_toml_str("[feed\nchannel = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_path("/definitely/not/here/pulse.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_read_config_file_errors() {
        let err = read_config_file("/definitely/not/here/lexicon.toml").unwrap_err();
        assert!(
            matches!(err, ConfigError::FileNotFound { ref path } if path == "/definitely/not/here/lexicon.toml")
        );

        // A directory exists but cannot be read as a file.
        let err = read_config_file(std::env::temp_dir()).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("pulse-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[feed]\nchannel = \"worldnews\"\n").unwrap();
        let config = AppConfig::from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.feed.channel, "worldnews");
    }
}
