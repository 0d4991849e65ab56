//! Subscriber initialisation for binaries and tests.
//!
//! [`TracingFacility`](crate::facility::TracingFacility) only produces `tracing` events;
//! something still has to print them. [`init`] installs a `fmt` subscriber filtered by
//! `RUST_LOG`, falling back to `calllog=debug` so call logs that pass their channel
//! threshold are visible by default.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "calllog=debug,info";

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops, and an already installed
/// subscriber from elsewhere is left in place.
pub fn init() {
    INIT_ONCE.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
    });
}
