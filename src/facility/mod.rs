//! Logging facilities that the interceptor writes through
//!
//! A facility answers two questions for a dotted channel name: "is this level enabled?"
//! and "emit this message". The interceptor always asks the first before it formats
//! anything, so a disabled channel costs a map lookup and nothing more.
//!
//! # Architecture
//!
//! - **LogFacility**: the seam. Implement it to route call logs anywhere.
//! - **ChannelLogger**: a handle bound to one channel, obtained from `facility.logger(name)`
//!   through [`LogFacilityExt`]
//! - **SharedLevels**: runtime-updatable [`ChannelLevels`] shared between facilities
//! - **TracingFacility**: emits through `tracing` under the `calllog` target
//! - **MemoryFacility**: captures messages in memory, with callbacks and queries
//! - **NullFacility**: null object, never enabled
//!
//! # Usage Example
//!
//! ```rust
//! use calllog::config::ChannelLevels;
//! use calllog::facility::{LogFacilityExt, MemoryFacility};
//! use calllog::level::Level;
//!
//! let levels = ChannelLevels::default().with("demo.Calc.add", Level::Debug);
//! let facility = MemoryFacility::new(levels);
//!
//! let logger = facility.logger("demo.Calc.add");
//! if logger.is_debug_enabled() {
//!     logger.debug("Method: demo.Calc#add");
//! }
//!
//! assert_eq!(facility.len(), 1);
//! ```

pub mod memory_facility;
pub mod null_facility;
pub mod tracing_facility;

use crate::config::ChannelLevels;
use crate::level::Level;
use std::sync::{Arc, RwLock};

pub use memory_facility::{CapturedRecord, EmitCallback, MemoryFacility};
pub use null_facility::NullFacility;
pub use tracing_facility::TracingFacility;

/// A logging facility keyed by dotted channel names.
///
/// Implementations must not panic or fail in either method: a facility that cannot
/// deliver a message drops it.
pub trait LogFacility: Send + Sync {
    /// Whether `channel` currently admits messages at `level`.
    fn is_enabled(&self, channel: &str, level: Level) -> bool;

    /// Deliver a message. Callers are expected to have checked `is_enabled` first.
    fn emit(&self, channel: &str, level: Level, message: &str);
}

/// Channel handle lookup, available on every facility including `dyn LogFacility`.
pub trait LogFacilityExt: LogFacility {
    /// Resolve a handle for one channel.
    fn logger<'a>(&'a self, channel: &'a str) -> ChannelLogger<'a, Self> {
        ChannelLogger {
            facility: self,
            channel,
        }
    }
}

impl<F: LogFacility + ?Sized> LogFacilityExt for F {}

impl<F: LogFacility + ?Sized> LogFacility for Arc<F> {
    fn is_enabled(&self, channel: &str, level: Level) -> bool {
        (**self).is_enabled(channel, level)
    }

    fn emit(&self, channel: &str, level: Level, message: &str) {
        (**self).emit(channel, level, message)
    }
}

/// A facility handle bound to one channel name.
pub struct ChannelLogger<'a, F: ?Sized> {
    facility: &'a F,
    channel: &'a str,
}

impl<F: LogFacility + ?Sized> ChannelLogger<'_, F> {
    pub fn name(&self) -> &str {
        self.channel
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        self.facility.is_enabled(self.channel, level)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn log(&self, level: Level, message: &str) {
        self.facility.emit(self.channel, level, message);
    }

    pub fn debug(&self, message: &str) {
        self.log(Level::Debug, message);
    }
}

/// [`ChannelLevels`] behind a shared lock, so thresholds can change while calls are in flight.
///
/// Clones share the same underlying levels. A poisoned lock reads as "nothing enabled".
#[derive(Debug, Clone, Default)]
pub struct SharedLevels {
    inner: Arc<RwLock<ChannelLevels>>,
}

impl SharedLevels {
    pub fn new(levels: ChannelLevels) -> Self {
        Self {
            inner: Arc::new(RwLock::new(levels)),
        }
    }

    pub fn admits(&self, channel: &str, level: Level) -> bool {
        self.inner
            .read()
            .map(|levels| levels.admits(channel, level))
            .unwrap_or(false)
    }

    /// Set one channel's threshold.
    pub fn set(&self, channel: impl Into<String>, level: Level) {
        if let Ok(mut levels) = self.inner.write() {
            levels.set(channel, level);
        }
    }

    /// Replace the whole configuration.
    pub fn replace(&self, levels: ChannelLevels) {
        if let Ok(mut current) = self.inner.write() {
            *current = levels;
        }
    }

    /// Copy of the configuration currently in force.
    pub fn snapshot(&self) -> ChannelLevels {
        self.inner.read().map(|l| l.clone()).unwrap_or_default()
    }
}

impl From<ChannelLevels> for SharedLevels {
    fn from(levels: ChannelLevels) -> Self {
        Self::new(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_logger_reports_name_and_enablement() {
        let facility = MemoryFacility::new(ChannelLevels::default().with("a.b", Level::Debug));

        let enabled = facility.logger("a.b");
        assert_eq!(enabled.name(), "a.b");
        assert!(enabled.is_debug_enabled());

        let disabled = facility.logger("a.c");
        assert!(!disabled.is_debug_enabled());
        assert!(disabled.is_enabled(Level::Info));
    }

    #[test]
    fn test_channel_logger_debug_emits() {
        let facility = MemoryFacility::new(ChannelLevels::new(Level::Trace));
        facility.logger("a.b").debug("hello");

        let records = facility.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel, "a.b");
        assert_eq!(records[0].level, Level::Debug);
        assert_eq!(records[0].message, "hello");
    }

    #[test]
    fn test_arc_dyn_facility_delegates() {
        let memory = MemoryFacility::new(ChannelLevels::new(Level::Debug));
        let facility: Arc<dyn LogFacility> = Arc::new(memory.clone());

        assert!(facility.is_enabled("x", Level::Debug));
        facility.logger("x").debug("via arc");
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_shared_levels_updates_are_visible_to_clones() {
        let levels = SharedLevels::default();
        let clone = levels.clone();

        assert!(!clone.admits("a.b", Level::Debug));
        levels.set("a.b", Level::Debug);
        assert!(clone.admits("a.b", Level::Debug));

        levels.replace(ChannelLevels::new(Level::Off));
        assert!(!clone.admits("a.b", Level::Error));
        assert_eq!(clone.snapshot().default_level(), Level::Off);
    }
}
