//! Configuration file parser for ~/.config/feedlog/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are ignored by serde, though a warning is logged when the
//! file contains potential typos. `FEEDLOG_DB` and `FEEDLOG_TZ` environment
//! variables take precedence over the file.

use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Volume recorded when the caller supplies none, in ounces.
pub const DEFAULT_OUNCES: f64 = 3.0;

/// The reference timezone used when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),

    /// Not a known IANA timezone identifier; fatal at startup.
    #[error("Unknown reference timezone: {0}")]
    Timezone(String),
}

// ============================================================================
// Configuration
// ============================================================================

/// Application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified; missing keys fall back to their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the store's database file. Defaults to `feedlog.db` inside
    /// the config directory when unset.
    pub database_path: Option<String>,

    /// IANA identifier of the reference timezone used for day boundaries
    /// and time rendering.
    pub timezone: String,

    /// Volume substituted when a feeding is recorded without one.
    pub default_ounces: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            default_ounces: DEFAULT_OUNCES,
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
    /// - Unknown keys → accepted, logged as a warning
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

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            let known_keys = ["database_path", "timezone", "default_ounces"];
            for key in raw.keys() {
                if !known_keys.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let mut config: Config = toml::from_str(&content)?;
        if !config.default_ounces.is_finite() || config.default_ounces < 0.0 {
            tracing::warn!(
                default_ounces = config.default_ounces,
                "Configured default volume is not a non-negative number, using {}",
                DEFAULT_OUNCES
            );
            config.default_ounces = DEFAULT_OUNCES;
        }

        tracing::info!(path = %path.display(), timezone = %config.timezone, "Loaded configuration");
        Ok(config)
    }

    /// Apply environment overrides: `FEEDLOG_DB` for the store path and
    /// `FEEDLOG_TZ` for the reference timezone.
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("FEEDLOG_DB") {
            if !path.is_empty() {
                self.database_path = Some(path);
            }
        }
        if let Ok(tz) = std::env::var("FEEDLOG_TZ") {
            if !tz.is_empty() {
                self.timezone = tz;
            }
        }
    }

    /// Resolve the configured timezone identifier.
    ///
    /// Called once at startup; an unknown identifier is a fatal
    /// configuration error, not something handlers recover from.
    pub fn reference_timezone(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| ConfigError::Timezone(self.timezone.clone()))
    }

    /// Where the store lives: the configured path, or `feedlog.db` inside
    /// the config directory.
    pub fn resolve_database_path(&self, config_dir: &Path) -> PathBuf {
        match &self.database_path {
            Some(path) => PathBuf::from(path),
            None => config_dir.join("feedlog.db"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
