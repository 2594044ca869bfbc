//! Configuration file parser for ~/.config/readbot/config.toml.
//!
//! The config file is optional. A missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though we log a warning for each one
//! since they are usually typos.
use chrono::NaiveTime;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::bot::{BotSettings, DEFAULT_SUMMARY_MAX_CHARS};
use crate::feed::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::session::{TopicFeeds, DEFAULT_TOPIC_FEED_BASE};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// A value has the right type but an unusable content.
    #[error("Invalid value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level bot configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `User-Agent` header sent to feed hosts.
    pub user_agent: String,

    /// Per-source fetch timeout in seconds. Must be non-zero.
    pub fetch_timeout_secs: u64,

    /// Local time of the daily article, `HH:MM`.
    pub daily_time: String,

    /// Base URL for topic feeds; the topic slug is appended as a path segment.
    pub topic_feed_base: String,

    /// Maximum summary length in article captions, in characters.
    pub summary_max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            daily_time: "09:00".to_string(),
            topic_feed_base: DEFAULT_TOPIC_FEED_BASE.to_string(),
            summary_max_chars: DEFAULT_SUMMARY_MAX_CHARS,
        }
    }
}

const KNOWN_KEYS: [&str; 5] = [
    "user_agent",
    "fetch_timeout_secs",
    "daily_time",
    "topic_feed_base",
    "summary_max_chars",
];

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → accepted, logged as warning
    /// - Unusable values → `Err(ConfigError::Invalid)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        let config = Self::parse(&content)?;
        tracing::info!(
            path = %path.display(),
            daily_time = %config.daily_time,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "fetch_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        self.daily_time()?;
        self.topic_feeds()?;
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn daily_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.daily_time.trim(), "%H:%M").map_err(|e| {
            ConfigError::Invalid {
                key: "daily_time",
                reason: format!("expected HH:MM, got {:?} ({e})", self.daily_time),
            }
        })
    }

    pub fn topic_feeds(&self) -> Result<TopicFeeds, ConfigError> {
        TopicFeeds::new(&self.topic_feed_base).map_err(|e| ConfigError::Invalid {
            key: "topic_feed_base",
            reason: e.to_string(),
        })
    }

    pub fn bot_settings(&self) -> Result<BotSettings, ConfigError> {
        Ok(BotSettings {
            topic_feeds: self.topic_feeds()?,
            summary_max_chars: self.summary_max_chars,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.user_agent, "Mozilla/5.0 (ReadBot Reader)");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(8));
        assert_eq!(
            config.daily_time().unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(config.summary_max_chars, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_returns_default() {
        let path = Path::new("/tmp/readbot_test_nonexistent_config.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.daily_time, "09:00");
    }

    #[test]
    fn test_empty_file_returns_default() {
        let dir = std::env::temp_dir().join("readbot_config_test_empty");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "   \n  \n  ").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.fetch_timeout_secs, 8);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_full_config() {
        let content = r#"
user_agent = "TestBot/1.0"
fetch_timeout_secs = 3
daily_time = "07:45"
topic_feed_base = "https://example.com/tags/"
summary_max_chars = 200
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.user_agent, "TestBot/1.0");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
        assert_eq!(
            config.daily_time().unwrap(),
            NaiveTime::from_hms_opt(7, 45, 0).unwrap()
        );
        assert_eq!(
            config.topic_feeds().unwrap().feed_url("Rust Lang"),
            "https://example.com/tags/rust-lang"
        );
        assert_eq!(config.bot_settings().unwrap().summary_max_chars, 200);
    }

    #[test]
    fn test_partial_config_uses_defaults_for_missing() {
        let config = Config::parse("daily_time = \"10:30\"\n").unwrap();
        assert_eq!(config.daily_time, "10:30");
        assert_eq!(config.fetch_timeout_secs, 8);
        assert_eq!(config.topic_feed_base, DEFAULT_TOPIC_FEED_BASE);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let err = Config::parse("this is not [valid toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_wrong_type_returns_error() {
        assert!(matches!(
            Config::parse("fetch_timeout_secs = \"slow\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_unknown_keys_accepted() {
        let config = Config::parse("daily_time = \"08:00\"\ntotally_fake_key = 42\n").unwrap();
        assert_eq!(config.daily_time, "08:00");
    }

    #[test]
    fn test_invalid_values_rejected() {
        for (content, key) in [
            ("fetch_timeout_secs = 0\n", "fetch_timeout_secs"),
            ("daily_time = \"9am\"\n", "daily_time"),
            ("daily_time = \"25:00\"\n", "daily_time"),
            ("topic_feed_base = \"not a url\"\n", "topic_feed_base"),
            ("user_agent = \"  \"\n", "user_agent"),
        ] {
            match Config::parse(content) {
                Err(ConfigError::Invalid { key: k, .. }) => assert_eq!(k, key, "{content}"),
                other => panic!("Expected Invalid for {content:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_too_large_file_rejected() {
        let dir = std::env::temp_dir().join("readbot_config_test_too_large");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "a".repeat(1_048_577)).unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TooLarge(_)));
        assert!(err.to_string().contains("too large"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
