//! Host-side integration test harness.
//!
//! One binary so the mock adapters are shared across suites.

mod mock_hw;

mod cycle_tests;
mod link_tests;
