//! Common utilities for integration tests

#![allow(dead_code)]

pub mod mock_models;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_models::{Draining, ExponentialDecay, Sluggish, Unstable};
pub use test_helpers::{assert_monotone_non_increasing, caliche_config, relative_error};
