//! Helper functions for integration tests

use leach_rs::solver::RunConfiguration;

/// Run configuration of the reference caliche scenario (450 h, dt = 0.5 h, 3 stages)
pub fn caliche_config() -> RunConfiguration {
    RunConfiguration::default()
}

/// Assert that a series never increases
pub fn assert_monotone_non_increasing(values: &[f64], message: &str) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] <= pair[0],
            "{}: value increased at index {} ({} -> {})",
            message,
            i + 1,
            pair[0],
            pair[1]
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
