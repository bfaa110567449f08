//! Shared test utilities for snmp-agent-core integration tests.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;

pub use fixtures::*;

use tracing_subscriber::EnvFilter;

/// Route library logs to the test harness.
///
/// Only errors are shown unless `RUST_LOG` is set, e.g. `RUST_LOG=snmp_agent_core=trace`.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
