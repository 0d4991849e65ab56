//! The call-logging interceptor.
//!
//! [`CallLogInterceptor`] runs a target operation exactly once on the caller's thread and
//! hands back exactly what the operation produced. Around that it may write one debug
//! message:
//!
//! - after a normal return, on channel `<type>.<operation>`;
//! - after a failure, on channel `<type>.<operation>.exception`.
//!
//! The channel is checked before the record is formatted, so a disabled channel never
//! pays for rendering arguments or results.
//!
//! # Example
//!
//! ```
//! use calllog::channel::CallSite;
//! use calllog::config::ChannelLevels;
//! use calllog::facility::MemoryFacility;
//! use calllog::interceptor::CallLogInterceptor;
//! use calllog::level::Level;
//! use std::sync::Arc;
//!
//! const ADD: CallSite = CallSite::new("demo.Calculator", "add");
//!
//! let levels = ChannelLevels::default().with("demo.Calculator.add", Level::Debug);
//! let facility = MemoryFacility::new(levels);
//! let interceptor = CallLogInterceptor::new(Arc::new(facility.clone()));
//!
//! let (a, b) = (2, 3);
//! let sum = interceptor.invoke_infallible(&ADD, &[&a, &b], || a + b);
//!
//! assert_eq!(sum, 5);
//! let message = &facility.messages_for("demo.Calculator.add")[0];
//! assert!(message.contains("Argument: 2"));
//! assert!(message.contains("Argument: 3"));
//! assert!(message.contains("Result: 5"));
//! ```

use crate::channel::CallSite;
use crate::facility::{LogFacility, LogFacilityExt, NullFacility, TracingFacility};
use crate::record::{InvocationRecord, PlainFormatter, RecordFormatter};
use std::any::Any;
use std::fmt::{Debug, Display};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Failure kind reported for operations that panicked inside
/// [`CallLogInterceptor::invoke_unwinding`].
pub const PANIC_KIND: &str = "panic";

static INVOCATION_COUNT: AtomicU64 = AtomicU64::new(0);

/// Number of calls made through any interceptor in this process since start or the last reset.
pub fn invocation_count() -> u64 {
    INVOCATION_COUNT.load(Ordering::SeqCst)
}

/// Reset the process-wide invocation counter to zero.
pub fn reset_invocation_count() {
    INVOCATION_COUNT.store(0, Ordering::SeqCst);
}

/// Wraps target operations and logs their arguments, results and failures.
///
/// Cloning is cheap; clones share the facility and the formatter.
#[derive(Clone)]
pub struct CallLogInterceptor {
    facility: Arc<dyn LogFacility>,
    formatter: Arc<dyn RecordFormatter>,
}

impl CallLogInterceptor {
    /// Create an interceptor writing plain-text records to `facility`.
    pub fn new(facility: Arc<dyn LogFacility>) -> Self {
        Self::with_formatter(facility, Arc::new(PlainFormatter))
    }

    pub fn with_formatter(
        facility: Arc<dyn LogFacility>,
        formatter: Arc<dyn RecordFormatter>,
    ) -> Self {
        Self { facility, formatter }
    }

    /// Interceptor that never logs. Calls still pass through and are still counted.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullFacility))
    }

    pub fn facility(&self) -> &Arc<dyn LogFacility> {
        &self.facility
    }

    /// Run a fallible operation, logging on the success or the exception channel.
    ///
    /// The operation's `Ok` value and `Err` value are returned untouched. The failure kind
    /// in the log is the error's fully qualified Rust type name, the message its `Display`.
    ///
    /// The type name is that of `E` as written at the call site, not of the value inside it.
    /// An operation returning `Box<dyn Error>` or `anyhow::Error` is logged with the wrapper
    /// as its kind; return a concrete error type when the kind matters in the log.
    pub fn invoke<T, E, F>(&self, site: &CallSite, args: &[&dyn Debug], op: F) -> Result<T, E>
    where
        T: Debug,
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        INVOCATION_COUNT.fetch_add(1, Ordering::SeqCst);

        let outcome = op();
        match &outcome {
            Ok(value) => self.log_success(site, args, value),
            Err(err) => self.log_failure(site, args, std::any::type_name::<E>(), err),
        }
        outcome
    }

    /// Run an operation that cannot fail, logging on the success channel.
    pub fn invoke_infallible<T, F>(&self, site: &CallSite, args: &[&dyn Debug], op: F) -> T
    where
        T: Debug,
        F: FnOnce() -> T,
    {
        INVOCATION_COUNT.fetch_add(1, Ordering::SeqCst);

        let value = op();
        self.log_success(site, args, &value);
        value
    }

    /// Run an operation whose failure mode is a panic.
    ///
    /// A panic is logged on the exception channel with kind [`PANIC_KIND`] and then resumed
    /// with the original payload, so the caller observes the same panic it would without
    /// the interceptor.
    pub fn invoke_unwinding<T, F>(&self, site: &CallSite, args: &[&dyn Debug], op: F) -> T
    where
        T: Debug,
        F: FnOnce() -> T,
    {
        INVOCATION_COUNT.fetch_add(1, Ordering::SeqCst);

        match panic::catch_unwind(AssertUnwindSafe(op)) {
            Ok(value) => {
                self.log_success(site, args, &value);
                value
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                self.log_failure(site, args, PANIC_KIND, &message);
                panic::resume_unwind(payload)
            }
        }
    }

    fn log_success(&self, site: &CallSite, args: &[&dyn Debug], value: &dyn Debug) {
        let channel = site.success_channel();
        let logger = self.facility.logger(&channel);
        if logger.is_debug_enabled() {
            let record = InvocationRecord::returned(site, args, value);
            logger.debug(&self.formatter.format(&record));
        }
    }

    fn log_failure(&self, site: &CallSite, args: &[&dyn Debug], kind: &str, err: &dyn Display) {
        let channel = site.failure_channel();
        let logger = self.facility.logger(&channel);
        if logger.is_debug_enabled() {
            let record = InvocationRecord::failed(site, args, kind, err);
            logger.debug(&self.formatter.format(&record));
        }
    }
}

impl Default for CallLogInterceptor {
    /// Interceptor over a [`TracingFacility`] with default thresholds.
    fn default() -> Self {
        Self::new(Arc::new(TracingFacility::default()))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}

/// Call an operation through an interceptor without spelling out the call site and
/// argument slice.
///
/// ```
/// use calllog::facility::MemoryFacility;
/// use calllog::interceptor::CallLogInterceptor;
/// use calllog::level::Level;
/// use calllog::logged_call;
/// use std::sync::Arc;
///
/// let facility = MemoryFacility::admitting(Level::Debug);
/// let interceptor = CallLogInterceptor::new(Arc::new(facility.clone()));
///
/// let quotient: Result<i32, String> =
///     logged_call!(interceptor, "demo.Calculator", "divide", [6, 3], || Ok(6 / 3));
///
/// assert_eq!(quotient, Ok(2));
/// assert_eq!(facility.messages_for("demo.Calculator.divide").len(), 1);
/// ```
#[macro_export]
macro_rules! logged_call {
    ($interceptor:expr, $type_name:expr, $operation:expr, [$($arg:expr),* $(,)?], $op:expr) => {{
        let __site = $crate::channel::CallSite::new($type_name, $operation);
        $interceptor.invoke(&__site, &[$(&$arg as &dyn ::std::fmt::Debug),*], $op)
    }};
}
