//! Call-logging interceptor with per-channel verbosity thresholds.
//!
//! Wrap any call in a [`CallLogInterceptor`] and it will write the call's arguments and
//! result (or failure) to a named channel, but only when that channel's threshold admits
//! debug output. The wrapped call's outcome is never changed.

pub mod aspect;
pub mod channel;
pub mod config;
pub mod error;
pub mod facility;
pub mod interceptor;
pub mod level;
pub mod logging;
pub mod record;
pub mod security;

pub use channel::CallSite;
pub use config::ChannelLevels;
pub use error::{CallLogError, Result};
pub use interceptor::{invocation_count, reset_invocation_count, CallLogInterceptor};
pub use level::Level;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::channel::CallSite;
    pub use crate::config::ChannelLevels;
    pub use crate::error::{CallLogError, Result};
    pub use crate::facility::{
        LogFacility, LogFacilityExt, MemoryFacility, NullFacility, TracingFacility,
    };
    pub use crate::interceptor::CallLogInterceptor;
    pub use crate::level::Level;
    pub use crate::record::{JsonFormatter, PlainFormatter, RecordFormatter};
}
