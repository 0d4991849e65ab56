//! Calculator demonstration of the call-logging interceptor
//!
//! Runs a handful of calculator operations through a [`CallLogInterceptor`] backed by the
//! tracing facility. Channel thresholds come from the environment, so the same binary
//! shows different output depending on configuration.
//!
//! # Running the demo
//!
//! ```bash
//! CALLLOG_LEVELS="demo.Calculator.add=DEBUG;demo.Calculator.divide.exception=DEBUG" \
//!     cargo run --bin calllog-demo
//! ```
//!
//! When `CALLLOG_LEVELS` names no channels, `DEFAULT_LEVELS` below supplies them. A
//! `CALLLOG_DEFAULT_LEVEL` setting is honored either way.

use anyhow::Context;
use calllog::facility::TracingFacility;
use calllog::{invocation_count, logging, CallLogInterceptor, CallSite, ChannelLevels};
use std::fmt;
use std::sync::Arc;
use tracing::info;

const DEFAULT_LEVELS: &str = "\
demo.Calculator.add=DEBUG
demo.Calculator.divide.exception=DEBUG
";

const ADD: CallSite = CallSite::new("demo.Calculator", "add");
const DIVIDE: CallSite = CallSite::new("demo.Calculator", "divide");

#[derive(Debug)]
struct ArithmeticError(&'static str);

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ArithmeticError {}

struct Calculator {
    interceptor: CallLogInterceptor,
}

impl Calculator {
    fn add(&self, a: i64, b: i64) -> i64 {
        self.interceptor.invoke_infallible(&ADD, &[&a, &b], || a + b)
    }

    fn divide(&self, a: i64, b: i64) -> Result<i64, ArithmeticError> {
        self.interceptor.invoke(&DIVIDE, &[&a, &b], || {
            if b == 0 {
                Err(ArithmeticError("division by zero"))
            } else {
                Ok(a / b)
            }
        })
    }
}

/// Fill in the demo channels when the environment configured none, keeping its default.
fn with_demo_channels(from_env: ChannelLevels) -> anyhow::Result<ChannelLevels> {
    if !from_env.is_empty() {
        return Ok(from_env);
    }
    let mut levels =
        ChannelLevels::parse_properties(DEFAULT_LEVELS).context("parsing default levels")?;
    levels.set_default(from_env.default_level());
    Ok(levels)
}

fn main() -> anyhow::Result<()> {
    logging::init();

    let from_env = ChannelLevels::from_env().context("reading CALLLOG_* variables")?;
    let levels = with_demo_channels(from_env)?;
    info!(
        channels = levels.len(),
        default = %levels.default_level(),
        "Call logging configured"
    );

    let calculator = Calculator {
        interceptor: CallLogInterceptor::new(Arc::new(TracingFacility::new(levels))),
    };

    println!("2 + 3 = {}", calculator.add(2, 3));
    println!("10 / 4 = {}", calculator.divide(10, 4)?);

    match calculator.divide(1, 0) {
        Ok(value) => println!("1 / 0 = {}", value),
        Err(e) => println!("1 / 0 failed: {}", e),
    }

    println!("{} calls intercepted", invocation_count());
    Ok(())
}
