//! Integration test suite.
//!
//! 1. Backend conformance against a brute-force model
//! 2. Benchmark pass, degradation and timeouts
//! 3. Aggregation across dataset sizes
//! 4. Configuration loading

pub mod config_tests;
pub mod helpers;
pub mod runner_tests;
