//! In-memory facility with callbacks and filtering
//!
//! Captures every emitted message so tests and tools can inspect exactly what the
//! interceptor wrote, without installing a global subscriber.

use super::{LogFacility, SharedLevels};
use crate::config::ChannelLevels;
use crate::level::Level;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

/// Type alias for emit callback functions
pub type EmitCallback = Arc<dyn Fn(&CapturedRecord) + Send + Sync>;

/// One message delivered to a [`MemoryFacility`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedRecord {
    /// Timestamp when the message was emitted (Unix timestamp)
    pub timestamp: f64,
    /// Channel the message was emitted on
    pub channel: String,
    pub level: Level,
    pub message: String,
}

impl CapturedRecord {
    /// Get a formatted string summary of the record
    pub fn printable_summary(&self) -> String {
        let secs = self.timestamp.trunc() as i64;
        let nanos = (self.timestamp.fract() * 1e9) as u32;
        let dt = DateTime::from_timestamp(secs, nanos)
            .unwrap_or_default()
            .with_timezone(&Local);
        let time_str = dt.format("%H:%M:%S%.3f").to_string();

        format!("[{}] {} {}: {}", time_str, self.level, self.channel, self.message)
    }
}

/// Facility that stores messages instead of writing them anywhere
///
/// Clones share the same buffer and levels, so a test can hand one clone to an
/// interceptor and keep another for assertions.
#[derive(Clone)]
pub struct MemoryFacility {
    levels: SharedLevels,
    records: Arc<Mutex<Vec<CapturedRecord>>>,
    on_emit_callback: Option<EmitCallback>,
}

impl MemoryFacility {
    /// Create a memory facility with the given thresholds
    pub fn new(levels: impl Into<SharedLevels>) -> Self {
        Self {
            levels: levels.into(),
            records: Arc::new(Mutex::new(Vec::new())),
            on_emit_callback: None,
        }
    }

    /// Create a memory facility with every channel admitting `level` and above
    pub fn admitting(level: Level) -> Self {
        Self::new(ChannelLevels::new(level))
    }

    /// Attach a callback invoked with each record before it is stored
    pub fn with_callback(mut self, callback: EmitCallback) -> Self {
        self.on_emit_callback = Some(callback);
        self
    }

    /// Thresholds used by this facility; updates are seen immediately
    pub fn levels(&self) -> &SharedLevels {
        &self.levels
    }

    /// All captured records, oldest first
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// Records emitted on one channel
    pub fn records_for(&self, channel: &str) -> Vec<CapturedRecord> {
        self.records
            .lock()
            .map(|r| r.iter().filter(|rec| rec.channel == channel).cloned().collect())
            .unwrap_or_default()
    }

    /// Messages emitted on one channel
    pub fn messages_for(&self, channel: &str) -> Vec<String> {
        self.records_for(channel).into_iter().map(|r| r.message).collect()
    }

    /// Count records matching a predicate
    pub fn count_records<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedRecord) -> bool,
    {
        self.records
            .lock()
            .map(|r| r.iter().filter(|rec| predicate(rec)).count())
            .unwrap_or(0)
    }

    /// Summaries of the last `n` records
    pub fn last_n_summaries(&self, n: usize) -> Vec<String> {
        let records = self.records();
        let start_idx = records.len().saturating_sub(n);
        records[start_idx..].iter().map(|r| r.printable_summary()).collect()
    }

    /// Clear all captured records
    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryFacility {
    fn default() -> Self {
        Self::new(ChannelLevels::default())
    }
}

impl LogFacility for MemoryFacility {
    fn is_enabled(&self, channel: &str, level: Level) -> bool {
        self.levels.admits(channel, level)
    }

    fn emit(&self, channel: &str, level: Level, message: &str) {
        let record = CapturedRecord {
            timestamp: current_timestamp(),
            channel: channel.to_string(),
            level,
            message: message.to_string(),
        };

        if let Some(callback) = &self.on_emit_callback {
            callback(&record);
        }

        if let Ok(mut records) = self.records.lock() {
            records.push(record);
        }
    }
}

fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_emit_stores_record() {
        let facility = MemoryFacility::admitting(Level::Debug);
        facility.emit("a.b", Level::Debug, "hello");

        assert_eq!(facility.len(), 1);
        let record = &facility.records()[0];
        assert_eq!(record.channel, "a.b");
        assert_eq!(record.message, "hello");
        assert!(record.timestamp > 0.0);
    }

    #[test]
    fn test_is_enabled_follows_levels() {
        let facility = MemoryFacility::new(ChannelLevels::default().with("a.b", Level::Debug));
        assert!(facility.is_enabled("a.b", Level::Debug));
        assert!(!facility.is_enabled("a.c", Level::Debug));

        facility.levels().set("a.c", Level::Trace);
        assert!(facility.is_enabled("a.c", Level::Debug));
    }

    #[test]
    fn test_callback_triggered() {
        let callback_count = Arc::new(AtomicUsize::new(0));
        let callback_count_clone = Arc::clone(&callback_count);

        let callback: EmitCallback = Arc::new(move |_record| {
            callback_count_clone.fetch_add(1, Ordering::SeqCst);
        });

        let facility = MemoryFacility::admitting(Level::Debug).with_callback(callback);
        facility.emit("a.b", Level::Debug, "one");
        facility.emit("a.b", Level::Debug, "two");

        assert_eq!(callback_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_records_for_filters_by_channel() {
        let facility = MemoryFacility::admitting(Level::Debug);
        facility.emit("a.b", Level::Debug, "first");
        facility.emit("a.b.exception", Level::Debug, "second");
        facility.emit("a.b", Level::Debug, "third");

        assert_eq!(facility.messages_for("a.b"), vec!["first", "third"]);
        assert_eq!(facility.records_for("a.b.exception").len(), 1);
        assert_eq!(facility.count_records(|r| r.channel.ends_with(".exception")), 1);
    }

    #[test]
    fn test_clones_share_buffer() {
        let facility = MemoryFacility::admitting(Level::Debug);
        let clone = facility.clone();
        clone.emit("a.b", Level::Debug, "shared");

        assert_eq!(facility.len(), 1);
        facility.clear();
        assert!(clone.is_empty());
    }

    #[test]
    fn test_last_n_summaries() {
        let facility = MemoryFacility::admitting(Level::Debug);
        for i in 0..5 {
            facility.emit("a.b", Level::Debug, &format!("msg-{}", i));
        }

        let summaries = facility.last_n_summaries(2);
        assert_eq!(summaries.len(), 2);
        assert!(summaries[0].ends_with("DEBUG a.b: msg-3"));
        assert!(summaries[1].ends_with("DEBUG a.b: msg-4"));

        assert_eq!(facility.last_n_summaries(10).len(), 5);
    }

    #[test]
    fn test_summary_keeps_milliseconds() {
        let record = CapturedRecord {
            timestamp: 1.5,
            channel: "a.b".to_string(),
            level: Level::Debug,
            message: "hello".to_string(),
        };

        let summary = record.printable_summary();
        assert!(summary.contains(":01.500] "), "{}", summary);
        assert!(summary.ends_with("DEBUG a.b: hello"));
    }

    #[test]
    fn test_default_admits_nothing_below_info() {
        let facility = MemoryFacility::default();
        assert!(!facility.is_enabled("anything", Level::Debug));
        assert!(facility.is_enabled("anything", Level::Info));
    }
}
