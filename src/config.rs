//! Configuration file parser for feedmd.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`,
//! which carries the real feed list the tool was built for. Unknown keys are
//! silently ignored by serde (with `deny_unknown_fields` off), though we log
//! a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

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

    /// A configured feed URL is not a fetchable http(s) URL.
    #[error("Invalid feed URL '{url}': {reason}")]
    InvalidFeedUrl { url: String, reason: String },
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown articles page to update.
    pub document: PathBuf,

    /// How many days back a post still counts as fresh.
    pub lookback_days: u32,

    /// Cap on bullets added per run, newest kept first.
    pub max_new_posts: usize,

    /// User-Agent header sent with every feed request.
    pub user_agent: String,

    /// Feed sources, polled in order. Replacing this list replaces the
    /// defaults entirely.
    pub feeds: Vec<FeedSource>,
}

/// One RSS/Atom source and the attribution its bullets carry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeedSource {
    pub url: String,
    pub attribution: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document: PathBuf::from("content/community/articles.md"),
            lookback_days: 7,
            max_new_posts: 20,
            user_agent: concat!("feedmd/", env!("CARGO_PKG_VERSION"), " (+github-actions)")
                .to_string(),
            feeds: vec![
                FeedSource {
                    url: "https://platformengineering.org/blog/rss.xml".to_string(),
                    attribution: "Platform Engineering".to_string(),
                },
                FeedSource {
                    url: "https://api.feedifyrss.com/weaveintelligence/research/feed.xml"
                        .to_string(),
                    attribution: "Weave Intelligence".to_string(),
                },
            ],
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    /// - Malformed feed URL → `Err(ConfigError::InvalidFeedUrl)`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to avoid slurping something that
        // was clearly never a config file.
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
            Ok(_) => {} // Size is within limits, proceed
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

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        // Parse the TOML content first as a raw table to detect unknown keys
        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = [
                "document",
                "lookback_days",
                "max_new_posts",
                "user_agent",
                "feeds",
            ];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(
            path = %path.display(),
            feeds = config.feeds.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for feed in &self.feeds {
            let parsed = Url::parse(&feed.url).map_err(|e| ConfigError::InvalidFeedUrl {
                url: feed.url.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::InvalidFeedUrl {
                    url: feed.url.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
