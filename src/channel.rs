//! Call sites and the dotted channel names derived from them.
//!
//! Channel names are matched exactly against external level configuration, so the
//! format is fixed:
//!
//! ```text
//! <declaringTypeName>.<operationName>            success channel
//! <declaringTypeName>.<operationName>.exception  failure channel
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Suffix appended to an operation's channel for failed calls.
pub const EXCEPTION_SUFFIX: &str = "exception";

/// Identity of a target operation: its declaring type and its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub type_name: Cow<'static, str>,
    pub operation: Cow<'static, str>,
}

impl CallSite {
    /// Create a call site from static names. Usable in `const` and `static` items.
    pub const fn new(type_name: &'static str, operation: &'static str) -> Self {
        Self {
            type_name: Cow::Borrowed(type_name),
            operation: Cow::Borrowed(operation),
        }
    }

    /// Create a call site from names computed at runtime.
    pub fn owned(type_name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            type_name: Cow::Owned(type_name.into()),
            operation: Cow::Owned(operation.into()),
        }
    }

    /// Create a call site whose declaring type is the Rust path of `T`.
    pub fn of<T: ?Sized>(operation: &'static str) -> Self {
        Self::new(std::any::type_name::<T>(), operation)
    }

    /// Channel consulted after the operation returns normally.
    pub fn success_channel(&self) -> String {
        format!("{}.{}", self.type_name, self.operation)
    }

    /// Channel consulted after the operation fails.
    pub fn failure_channel(&self) -> String {
        format!("{}.{}.{}", self.type_name, self.operation, EXCEPTION_SUFFIX)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.type_name, self.operation)
    }
}
