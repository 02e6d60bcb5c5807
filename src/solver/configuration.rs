//! Run configuration of a cascade simulation
//!
//! Where [`SimulationParameters`](crate::models::SimulationParameters) says
//! WHAT is leached, [`RunConfiguration`] says HOW it is integrated: horizon,
//! step size, number of stages, feed and clamp policy.

use serde::{Deserialize, Serialize};

use crate::error::{LeachError, LeachResult};
use crate::models::ClampPolicy;
use crate::physics::Inlet;

/// Largest number of integration steps a run may request
///
/// Every step stores one state per stage, so the cap also bounds the memory
/// of a [`CascadeResult`](crate::solver::CascadeResult).
pub const MAX_TIME_STEPS: usize = 10_000_000;

/// Configuration of one cascade run
///
/// # Example
///
/// ```rust
/// use leach_rs::solver::RunConfiguration;
///
/// let config = RunConfiguration::default();
/// assert_eq!(config.time_steps(), 900);
///
/// let short = RunConfiguration::default().with_total_time(10.0).with_stages(1);
/// assert!(short.validate().is_ok());
/// assert_eq!(short.time_steps(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfiguration {
    /// Simulated horizon **\[h\]**
    pub total_time: f64,

    /// Fixed integration step **\[h\]**
    pub time_step: f64,

    /// Number of stacked bed sections (stage 0 is the top)
    pub stages: usize,

    /// Concentrations fed to stage 0
    pub feed: Inlet,

    /// Projection applied after every step
    pub clamp: ClampPolicy,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            total_time: 450.0,
            time_step: 0.5,
            stages: 3,
            feed: Inlet::PURE_WATER,
            clamp: ClampPolicy::Saturation,
        }
    }
}

impl RunConfiguration {
    /// Builder pattern: set the simulated horizon
    pub fn with_total_time(mut self, total_time: f64) -> Self {
        self.total_time = total_time;
        self
    }

    /// Builder pattern: set the integration step
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Builder pattern: set the number of stages
    pub fn with_stages(mut self, stages: usize) -> Self {
        self.stages = stages;
        self
    }

    /// Builder pattern: set the feed of stage 0
    pub fn with_feed(mut self, feed: Inlet) -> Self {
        self.feed = feed;
        self
    }

    /// Builder pattern: set the clamp policy
    pub fn with_clamp(mut self, clamp: ClampPolicy) -> Self {
        self.clamp = clamp;
        self
    }

    /// Number of integration steps, `round(total_time / time_step)`
    pub fn time_steps(&self) -> usize {
        ((self.total_time / self.time_step).round() as usize).max(1)
    }

    /// Last simulated time, `time_steps · time_step`
    pub fn final_time(&self) -> f64 {
        self.time_steps() as f64 * self.time_step
    }

    /// Validate configuration
    pub fn validate(&self) -> LeachResult<()> {
        if !self.total_time.is_finite() || self.total_time <= 0.0 {
            return Err(LeachError::configuration(format!(
                "total time must be positive, got {}",
                self.total_time
            )));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(LeachError::configuration(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if self.time_step > self.total_time {
            return Err(LeachError::configuration(format!(
                "time step {} exceeds total time {}",
                self.time_step, self.total_time
            )));
        }
        let ratio = (self.total_time / self.time_step).round();
        if !ratio.is_finite() || ratio > MAX_TIME_STEPS as f64 {
            return Err(LeachError::configuration(format!(
                "total time {} with time step {} needs {} steps, at most {} allowed",
                self.total_time, self.time_step, ratio, MAX_TIME_STEPS
            )));
        }
        if self.stages == 0 {
            return Err(LeachError::configuration("cascade needs at least one stage"));
        }
        for (label, value) in [("A", self.feed.a), ("B", self.feed.b)] {
            if !value.is_finite() || value < 0.0 {
                return Err(LeachError::configuration(format!(
                    "feed concentration of species {label} must be >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run() {
        let config = RunConfiguration::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.time_steps(), 900);
        assert_eq!(config.final_time(), 450.0);
        assert_eq!(config.feed, Inlet::PURE_WATER);
        assert_eq!(config.clamp, ClampPolicy::Saturation);
    }

    #[test]
    fn test_step_count_rounds() {
        let config = RunConfiguration::default().with_total_time(1.0).with_time_step(0.3);
        assert_eq!(config.time_steps(), 3);

        let config = RunConfiguration::default().with_total_time(1.0).with_time_step(0.1);
        assert_eq!(config.time_steps(), 10);
    }

    #[test]
    fn test_invalid_configurations() {
        let cases = [
            RunConfiguration::default().with_total_time(0.0),
            RunConfiguration::default().with_total_time(f64::INFINITY),
            RunConfiguration::default().with_time_step(-0.5),
            RunConfiguration::default().with_time_step(f64::NAN),
            RunConfiguration::default().with_total_time(1.0).with_time_step(2.0),
            RunConfiguration::default().with_stages(0),
            RunConfiguration::default().with_feed(Inlet::new(-1.0, 0.0)),
        ];
        for config in cases {
            assert!(config.validate().unwrap_err().is_configuration(), "{config:?}");
        }
    }

    #[test]
    fn test_step_count_is_bounded() {
        for total_time in [1e30, 1e12, f64::MAX] {
            let config = RunConfiguration::default().with_total_time(total_time);
            let error = config.validate().unwrap_err();
            assert!(error.is_configuration(), "{total_time}");
            assert!(error.to_string().contains("at most"));
        }

        let tiny_step = RunConfiguration::default().with_total_time(1.0).with_time_step(1e-300);
        assert!(tiny_step.validate().is_err());

        let limit = RunConfiguration::default()
            .with_total_time(MAX_TIME_STEPS as f64)
            .with_time_step(1.0);
        assert!(limit.validate().is_ok());
        assert_eq!(limit.time_steps(), MAX_TIME_STEPS);

        let over = limit.with_total_time(MAX_TIME_STEPS as f64 + 1.0);
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = RunConfiguration::default()
            .with_stages(5)
            .with_feed(Inlet::new(250.0, 20.0))
            .with_clamp(ClampPolicy::NonNegative);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: RunConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let partial: RunConfiguration = serde_json::from_str(r#"{ "stages": 1 }"#).unwrap();
        assert_eq!(partial.stages, 1);
        assert_eq!(partial.time_step, 0.5);
    }
}
