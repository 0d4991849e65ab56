//! Null facility following the Null Object Pattern
//!
//! Lets an interceptor be constructed unconditionally when call logging is switched off.

use super::LogFacility;
use crate::level::Level;

/// A facility that is never enabled and silently discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFacility;

impl NullFacility {
    pub fn new() -> Self {
        Self
    }
}

impl LogFacility for NullFacility {
    fn is_enabled(&self, _channel: &str, _level: Level) -> bool {
        false
    }

    fn emit(&self, _channel: &str, _level: Level, _message: &str) {
        // Do nothing
    }
}
