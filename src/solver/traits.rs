//! Time integrator trait
//!
//! # Design Philosophy
//!
//! An integrator advances one fixed-size state vector by one fixed step.
//! It knows nothing about stages, inlets or clamping: the cascade hands it a
//! closure evaluating the right-hand side and post-processes the result.
//!
//! The step is generic over the dimension `D`, so the same integrator drives
//! the 5-component stage state and the 1-component test problems used to
//! measure convergence.

use nalgebra::SVector;

use crate::error::LeachResult;

/// Fixed-step explicit time integrator
///
/// # Contract
///
/// - `step` is a pure function of its inputs: no internal state, no clock
/// - `dt <= 0` or a non-finite `dt` is rejected with
///   [`LeachError::InvalidTimeStep`](crate::error::LeachError::InvalidTimeStep)
/// - any non-finite stage derivative or result is rejected with
///   [`LeachError::NonFiniteDerivative`](crate::error::LeachError::NonFiniteDerivative)
pub trait Integrator: Send + Sync {
    /// Advance `state` by `dt` for `dy/dt = rhs(y)`
    fn step<const D: usize, F>(
        &self,
        state: &SVector<f64, D>,
        dt: f64,
        rhs: F,
    ) -> LeachResult<SVector<f64, D>>
    where
        F: Fn(&SVector<f64, D>) -> SVector<f64, D>;

    /// Display name of the method
    fn name(&self) -> &'static str;

    /// Right-hand side evaluations per step
    fn evaluations_per_step(&self) -> usize;
}
