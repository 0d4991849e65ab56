//! Facility that emits call logs through `tracing`
//!
//! Channel thresholds decide whether a message is formatted at all. Messages that pass
//! are emitted as `tracing` events with target [`TRACING_TARGET`] and the channel name in
//! a `channel` field, so the installed subscriber still filters and renders them.

use super::{LogFacility, SharedLevels};
use crate::config::ChannelLevels;
use crate::level::Level;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, trace, warn};

/// Target of every event emitted by [`TracingFacility`].
pub const TRACING_TARGET: &str = "calllog";

/// Production facility backed by the `tracing` ecosystem
#[derive(Debug, Clone)]
pub struct TracingFacility {
    levels: SharedLevels,
    enabled: Arc<AtomicBool>,
}

impl TracingFacility {
    pub fn new(levels: impl Into<SharedLevels>) -> Self {
        Self {
            levels: levels.into(),
            enabled: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Thresholds read from `CALLLOG_LEVELS` / `CALLLOG_DEFAULT_LEVEL`
    pub fn from_env() -> crate::Result<Self> {
        Ok(Self::new(ChannelLevels::from_env()?))
    }

    pub fn levels(&self) -> &SharedLevels {
        &self.levels
    }

    pub fn is_active(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Resume call logging after [`TracingFacility::disable`]
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    /// Switch every channel off without touching the configured thresholds
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }
}

impl Default for TracingFacility {
    fn default() -> Self {
        Self::new(ChannelLevels::default())
    }
}

impl LogFacility for TracingFacility {
    fn is_enabled(&self, channel: &str, level: Level) -> bool {
        self.is_active() && self.levels.admits(channel, level)
    }

    fn emit(&self, channel: &str, level: Level, message: &str) {
        match level {
            Level::Trace => trace!(target: TRACING_TARGET, channel, "{}", message),
            Level::Debug => debug!(target: TRACING_TARGET, channel, "{}", message),
            Level::Info => info!(target: TRACING_TARGET, channel, "{}", message),
            Level::Warn => warn!(target: TRACING_TARGET, channel, "{}", message),
            Level::Error => error!(target: TRACING_TARGET, channel, "{}", message),
            Level::Off => {}
        }
    }
}
