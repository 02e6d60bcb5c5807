//! Cascade simulation result
//!
//! A [`CascadeResult`] holds one shared time axis and, for every stage, the
//! full [`StageState`] at each time point. Index 0 is the initial state at
//! `t = 0`; index `n` the state after `n` steps, at `t = n·dt`.
//!
//! ```text
//!                 t₀      t₁      t₂     ...    t_N
//! stage 0       y₀⁽⁰⁾   y₁⁽⁰⁾   y₂⁽⁰⁾   ...   y_N⁽⁰⁾
//! stage 1       y₀⁽¹⁾   y₁⁽¹⁾   y₂⁽¹⁾   ...   y_N⁽¹⁾
//! ...
//! ```
//!
//! The result is append-only while the run is in progress; a run that stops
//! early (divergence, cancellation) hands back whatever was complete.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::physics::{Species, StageState};

/// Time series of every stage of a cascade run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeResult {
    /// Shared time axis **\[h\]**
    pub time_points: Vec<f64>,

    /// `trajectories[stage][n]` is the state of `stage` at `time_points[n]`
    pub trajectories: Vec<Vec<StageState>>,

    /// Run information (solver, time step, counts...)
    pub metadata: BTreeMap<String, String>,
}

impl CascadeResult {
    /// Create an empty result for `stages` stages with room for `points` time points
    pub fn with_capacity(stages: usize, points: usize) -> Self {
        Self {
            time_points: Vec::with_capacity(points),
            trajectories: (0..stages).map(|_| Vec::with_capacity(points)).collect(),
            metadata: BTreeMap::new(),
        }
    }

    /// Append one time point for every stage
    ///
    /// `states` must hold exactly one state per stage.
    pub(crate) fn push(&mut self, time: f64, states: &[StageState]) {
        debug_assert_eq!(states.len(), self.trajectories.len());
        self.time_points.push(time);
        for (trajectory, state) in self.trajectories.iter_mut().zip(states) {
            trajectory.push(*state);
        }
    }

    /// Add metadata
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    /// Get metadata
    pub fn get_metadata(&self, key: &str) -> Option<&String> {
        self.metadata.get(key)
    }

    // ======================================= Shape =======================================

    /// Number of recorded time points
    pub fn len(&self) -> usize {
        self.time_points.len()
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.time_points.is_empty()
    }

    /// Number of stages
    pub fn stage_count(&self) -> usize {
        self.trajectories.len()
    }

    // ======================================= Access =======================================

    /// Full trajectory of a stage, `None` if the stage does not exist
    pub fn trajectory(&self, stage: usize) -> Option<&[StageState]> {
        self.trajectories.get(stage).map(Vec::as_slice)
    }

    /// State of `stage` at time index `index`
    pub fn state_at(&self, stage: usize, index: usize) -> Option<&StageState> {
        self.trajectories.get(stage)?.get(index)
    }

    /// Last recorded state of `stage`
    pub fn final_state(&self, stage: usize) -> Option<&StageState> {
        self.trajectories.get(stage)?.last()
    }

    /// Concentration of `species` in `stage` at every time point
    ///
    /// Empty when the stage does not exist.
    pub fn concentrations(&self, stage: usize, species: Species) -> Vec<f64> {
        self.component(stage, |state| state.concentration(species))
    }

    /// `(time, concentration)` pairs of `species` in `stage`
    pub fn concentration_series(&self, stage: usize, species: Species) -> Vec<(f64, f64)> {
        self.time_points
            .iter()
            .copied()
            .zip(self.concentrations(stage, species))
            .collect()
    }

    /// Bed height of `stage` at every time point
    pub fn heights(&self, stage: usize) -> Vec<f64> {
        self.component(stage, StageState::height)
    }

    /// Particle radius of `species` in `stage` at every time point
    pub fn radii(&self, stage: usize, species: Species) -> Vec<f64> {
        self.component(stage, |state| state.radius(species))
    }

    fn component(&self, stage: usize, extract: impl Fn(&StageState) -> f64) -> Vec<f64> {
        self.trajectories
            .get(stage)
            .map(|trajectory| trajectory.iter().map(extract).collect())
            .unwrap_or_default()
    }

    /// Copy of the first `points` time points (all of them if fewer were recorded)
    pub fn truncated(&self, points: usize) -> Self {
        let points = points.min(self.len());
        Self {
            time_points: self.time_points[..points].to_vec(),
            trajectories: self
                .trajectories
                .iter()
                .map(|trajectory| trajectory[..points].to_vec())
                .collect(),
            metadata: self.metadata.clone(),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CascadeResult {
        let mut result = CascadeResult::with_capacity(2, 3);
        for n in 0..3 {
            let c = 10.0 - n as f64;
            result.push(
                n as f64 * 0.5,
                &[
                    StageState::new(1.0, 0.01, 0.01, c, 1.0),
                    StageState::new(1.0, 0.01, 0.01, 2.0 * c, 2.0),
                ],
            );
        }
        result
    }

    #[test]
    fn test_shape() {
        let result = sample();
        assert_eq!(result.len(), 3);
        assert_eq!(result.stage_count(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.trajectory(1).map(<[_]>::len), Some(3));
        assert!(result.trajectory(2).is_none());
    }

    #[test]
    fn test_series_accessors() {
        let result = sample();
        assert_eq!(result.concentrations(0, Species::A), vec![10.0, 9.0, 8.0]);
        assert_eq!(
            result.concentration_series(1, Species::A),
            vec![(0.0, 20.0), (0.5, 18.0), (1.0, 16.0)]
        );
        assert_eq!(result.concentrations(1, Species::B), vec![2.0; 3]);
        assert_eq!(result.heights(0), vec![1.0; 3]);
        assert_eq!(result.radii(0, Species::B), vec![0.01; 3]);
        assert!(result.concentrations(5, Species::A).is_empty());
    }

    #[test]
    fn test_state_lookup() {
        let result = sample();
        assert_eq!(result.state_at(0, 1).map(|s| s.concentration_a()), Some(9.0));
        assert_eq!(result.final_state(1).map(|s| s.concentration_a()), Some(16.0));
        assert!(result.state_at(0, 3).is_none());
    }

    #[test]
    fn test_truncated_keeps_prefix() {
        let result = sample().truncated(2);
        assert_eq!(result.time_points, vec![0.0, 0.5]);
        assert_eq!(result.final_state(0).map(|s| s.concentration_a()), Some(9.0));
        assert_eq!(sample().truncated(10).len(), 3);
    }

    #[test]
    fn test_metadata() {
        let mut result = sample();
        result.add_metadata("solver", "Runge Kutta (RK4)");
        assert_eq!(result.get_metadata("solver").map(String::as_str), Some("Runge Kutta (RK4)"));
        assert!(result.get_metadata("missing").is_none());
    }

    #[test]
    fn test_metadata_serializes_in_key_order() {
        let mut result = sample();
        for key in ["time steps", "dt", "solver", "model", "stages"] {
            result.add_metadata(key, "x");
        }
        let json = serde_json::to_string(&result.metadata).unwrap();
        assert_eq!(
            json,
            r#"{"dt":"x","model":"x","solver":"x","stages":"x","time steps":"x"}"#
        );
        assert_eq!(serde_json::to_string(&result.clone()).unwrap(), serde_json::to_string(&result).unwrap());
    }
}
