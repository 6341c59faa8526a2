//! Test fixtures for warehouse-planner.
//!
//! Provides a small but realistic warehouse:
//! - Four rack rows (AA..AD), three bays each, two levels of two bins
//! - Floor zones (docks, input, quality control) with a nested dock lane
//! - One bin with an unparsable code and one childless level

#![allow(dead_code)]

pub mod sample_warehouse;

pub use sample_warehouse::*;

use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
