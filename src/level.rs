//! Verbosity levels and threshold checks.

use crate::error::{CallLogError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A message level, or a channel threshold when used as the minimum admitted level.
///
/// Ordering follows verbosity: `Trace < Debug < Info < Warn < Error < Off`.
/// `Off` as a threshold admits nothing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Level {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl Level {
    /// Whether a channel with this threshold admits a message at `message_level`.
    pub fn admits(self, message_level: Level) -> bool {
        message_level != Level::Off && message_level >= self
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = CallLogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" | "all" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" | "fatal" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            _ => Err(CallLogError::InvalidLevel(s.trim().to_string())),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = CallLogError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_threshold_admits_debug_and_above() {
        assert!(Level::Debug.admits(Level::Debug));
        assert!(Level::Debug.admits(Level::Error));
        assert!(!Level::Debug.admits(Level::Trace));
    }

    #[test]
    fn test_info_threshold_rejects_debug() {
        assert!(!Level::Info.admits(Level::Debug));
        assert!(Level::Info.admits(Level::Warn));
    }

    #[test]
    fn test_off_admits_nothing() {
        assert!(!Level::Off.admits(Level::Error));
        assert!(!Level::Trace.admits(Level::Off));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!(" Warning ".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("off".parse::<Level>().unwrap(), Level::Off);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "LOUD".parse::<Level>().unwrap_err();
        assert!(matches!(err, CallLogError::InvalidLevel(ref s) if s == "LOUD"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"trace\"").unwrap();
        assert_eq!(level, Level::Trace);
    }

    #[test]
    fn test_deserialize_accepts_same_names_as_parse() {
        let levels: Vec<Level> =
            serde_json::from_str(r#"["DEBUG", "Warn", "warning", "fatal", "OFF"]"#).unwrap();
        assert_eq!(
            levels,
            vec![Level::Debug, Level::Warn, Level::Warn, Level::Error, Level::Off]
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<Level>("\"loud\"").unwrap_err();
        assert!(err.to_string().contains("Invalid level: loud"));
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Level::default(), Level::Info);
    }
}
