//! Invocation records and the formatters that render them.
//!
//! An [`InvocationRecord`] only borrows the call's arguments and outcome, so building one
//! is free. Rendering happens in a [`RecordFormatter`], which the interceptor calls only
//! after the target channel has admitted the message.

use crate::channel::CallSite;
use serde::Serialize;
use std::fmt::{self, Debug, Display, Write};

/// How an intercepted call ended.
pub enum Outcome<'a> {
    /// The operation returned normally with this value.
    Returned(&'a dyn Debug),
    /// The operation failed. `kind` is the failure's fully qualified type name.
    Failed {
        kind: &'a str,
        message: &'a dyn Display,
    },
}

impl Outcome<'_> {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Everything known about one intercepted call.
pub struct InvocationRecord<'a> {
    pub call_site: &'a CallSite,
    pub arguments: &'a [&'a dyn Debug],
    pub outcome: Outcome<'a>,
}

impl<'a> InvocationRecord<'a> {
    pub fn returned(
        call_site: &'a CallSite,
        arguments: &'a [&'a dyn Debug],
        value: &'a dyn Debug,
    ) -> Self {
        Self {
            call_site,
            arguments,
            outcome: Outcome::Returned(value),
        }
    }

    pub fn failed(
        call_site: &'a CallSite,
        arguments: &'a [&'a dyn Debug],
        kind: &'a str,
        message: &'a dyn Display,
    ) -> Self {
        Self {
            call_site,
            arguments,
            outcome: Outcome::Failed { kind, message },
        }
    }
}

impl Debug for InvocationRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationRecord")
            .field("call_site", &self.call_site)
            .field("arguments", &self.arguments)
            .field("failed", &self.outcome.is_failure())
            .finish()
    }
}

/// Renders an invocation record into a log message.
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &InvocationRecord<'_>) -> String;
}

/// Multi-line text layout:
///
/// ```text
/// Method: demo.Calculator#add
///    Argument: 2
///    Argument: 3
///    Result: 5
/// ```
///
/// Failed calls end with `   Failure: <kind> - <message>` instead of the result line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl RecordFormatter for PlainFormatter {
    fn format(&self, record: &InvocationRecord<'_>) -> String {
        let mut out = String::with_capacity(80);
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Method: {}", record.call_site);
        for arg in record.arguments {
            let _ = writeln!(out, "   Argument: {:?}", arg);
        }
        match &record.outcome {
            Outcome::Returned(value) => {
                let _ = write!(out, "   Result: {:?}", value);
            }
            Outcome::Failed { kind, message } => {
                let _ = write!(out, "   Failure: {} - {}", kind, message);
            }
        }
        out
    }
}

/// Single-line JSON layout, for sinks that index structured messages.
///
/// ```json
/// {"type":"demo.Calculator","operation":"add","arguments":["2","3"],"result":"5"}
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonFailure {
    kind: String,
    message: String,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    operation: &'a str,
    arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure: Option<JsonFailure>,
}

impl RecordFormatter for JsonFormatter {
    fn format(&self, record: &InvocationRecord<'_>) -> String {
        let (result, failure) = match &record.outcome {
            Outcome::Returned(value) => (Some(format!("{:?}", value)), None),
            Outcome::Failed { kind, message } => (
                None,
                Some(JsonFailure {
                    kind: kind.to_string(),
                    message: message.to_string(),
                }),
            ),
        };

        let json = JsonRecord {
            type_name: &record.call_site.type_name,
            operation: &record.call_site.operation,
            arguments: record.arguments.iter().map(|a| format!("{:?}", a)).collect(),
            result,
            failure,
        };

        serde_json::to_string(&json).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
    }
}
