//! Per-channel verbosity thresholds.
//!
//! [`ChannelLevels`] maps exact channel names to a threshold [`Level`]. Names that are not
//! configured fall back to the default threshold; there is no prefix or wildcard
//! inheritance, so `x.y.MyClass=DEBUG` does not enable `x.y.MyClass.doSomething`.
//!
//! # Sources
//!
//! - Properties text, one `name=LEVEL` per line:
//!
//! ```
//! use calllog::config::ChannelLevels;
//! use calllog::level::Level;
//!
//! let levels = ChannelLevels::parse_properties(
//!     "# calculator\n\
//!      default=warn\n\
//!      demo.Calculator.add=DEBUG\n\
//!      demo.Calculator.divide.exception=debug\n",
//! )
//! .unwrap();
//!
//! assert!(levels.admits("demo.Calculator.add", Level::Debug));
//! assert!(!levels.admits("demo.Calculator.divide", Level::Debug));
//! assert_eq!(levels.default_level(), Level::Warn);
//! ```
//!
//! - JSON: `{"default": "info", "channels": {"demo.Calculator.add": "debug"}}`
//! - Environment: `CALLLOG_LEVELS` (properties syntax, `;` also separates entries) and
//!   `CALLLOG_DEFAULT_LEVEL`, after loading a `.env` file when one exists.

use crate::error::{CallLogError, Result};
use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable holding channel thresholds in properties syntax.
pub const LEVELS_ENV: &str = "CALLLOG_LEVELS";

/// Environment variable holding the default threshold.
pub const DEFAULT_LEVEL_ENV: &str = "CALLLOG_DEFAULT_LEVEL";

/// Key in properties text that sets the default threshold instead of a channel.
const DEFAULT_KEY: &str = "default";

/// Exact-name map from channel to threshold, with a default for everything else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelLevels {
    #[serde(default)]
    default: Level,
    #[serde(default)]
    channels: HashMap<String, Level>,
}

impl ChannelLevels {
    /// Create an empty configuration with the given default threshold.
    pub fn new(default: Level) -> Self {
        Self {
            default,
            channels: HashMap::new(),
        }
    }

    /// Builder-style variant of [`ChannelLevels::set`].
    pub fn with(mut self, channel: impl Into<String>, level: Level) -> Self {
        self.set(channel, level);
        self
    }

    /// Set the threshold for one channel, replacing any previous value.
    pub fn set(&mut self, channel: impl Into<String>, level: Level) {
        self.channels.insert(channel.into(), level);
    }

    /// Remove a channel's explicit threshold so it falls back to the default.
    pub fn unset(&mut self, channel: &str) -> Option<Level> {
        self.channels.remove(channel)
    }

    pub fn set_default(&mut self, level: Level) {
        self.default = level;
    }

    pub fn default_level(&self) -> Level {
        self.default
    }

    /// Threshold in force for `channel`.
    pub fn threshold(&self, channel: &str) -> Level {
        self.channels.get(channel).copied().unwrap_or(self.default)
    }

    /// Whether `channel` admits a message at `level`.
    pub fn admits(&self, channel: &str, level: Level) -> bool {
        self.threshold(channel).admits(level)
    }

    /// Number of explicitly configured channels.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Parse properties text. Blank lines and lines starting with `#` or `!` are ignored.
    pub fn parse_properties(text: &str) -> Result<Self> {
        let mut levels = Self::default();
        levels.merge_properties(text.lines())?;
        Ok(levels)
    }

    /// Parse a JSON document of the shape `{"default": ..., "channels": {...}}`.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a configuration file. Files ending in `.json` are read as JSON, anything
    /// else as properties text.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::parse_properties(&text),
        }
    }

    /// Build a configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is loaded first when present.
    /// Unset variables leave the defaults in place.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_vars(
            std::env::var(LEVELS_ENV).ok().as_deref(),
            std::env::var(DEFAULT_LEVEL_ENV).ok().as_deref(),
        )
    }

    fn from_vars(levels: Option<&str>, default: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(levels) = levels {
            config.merge_properties(levels.split([';', '\n']))?;
        }
        if let Some(default) = default {
            config.default = default.parse()?;
        }
        Ok(config)
    }

    fn merge_properties<'a>(&mut self, lines: impl Iterator<Item = &'a str>) -> Result<()> {
        for (idx, raw) in lines.enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (name, value) = line.split_once('=').ok_or_else(|| {
                CallLogError::ConfigError(format!(
                    "entry {}: expected name=LEVEL, got '{}'",
                    idx + 1,
                    line
                ))
            })?;
            let name = name.trim();
            if name.is_empty() {
                return Err(CallLogError::ConfigError(format!(
                    "entry {}: empty channel name",
                    idx + 1
                )));
            }

            let level: Level = value.parse()?;
            if name == DEFAULT_KEY {
                self.default = level;
            } else {
                self.set(name, level);
            }
        }
        Ok(())
    }
}
