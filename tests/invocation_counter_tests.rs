//! The invocation counter is process-wide, so this binary holds a single test to keep
//! other callers from moving it.

use calllog::config::ChannelLevels;
use calllog::facility::MemoryFacility;
use calllog::level::Level;
use calllog::{invocation_count, reset_invocation_count, CallLogInterceptor, CallSite};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const CALLS_PER_THREAD: usize = 500;

const SQUARE: CallSite = CallSite::new("demo.Calculator", "square");

#[test]
fn test_concurrent_calls_have_no_lost_updates() {
    reset_invocation_count();
    assert_eq!(invocation_count(), 0);

    let levels = ChannelLevels::default().with("demo.Calculator.square", Level::Debug);
    let facility = MemoryFacility::new(levels);
    let interceptor = CallLogInterceptor::new(Arc::new(facility.clone()));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let interceptor = interceptor.clone();
            thread::spawn(move || {
                let mut sum = 0usize;
                for i in 0..CALLS_PER_THREAD {
                    let n = t * CALLS_PER_THREAD + i;
                    sum += interceptor.invoke_infallible(&SQUARE, &[&n], || n * n) % 7;
                }
                sum
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (THREADS * CALLS_PER_THREAD) as u64;
    assert_eq!(invocation_count(), expected);
    assert_eq!(facility.len(), THREADS * CALLS_PER_THREAD);

    reset_invocation_count();
    assert_eq!(invocation_count(), 0);
}
