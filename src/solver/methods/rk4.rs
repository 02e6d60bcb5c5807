//! Runge-Kutta 4 (RK4) time integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method uses a weighted average of
//! four slope estimates:
//!
//! ```text
//! k₁ = f(yₙ)
//! k₂ = f(yₙ + dt/2 · k₁)
//! k₃ = f(yₙ + dt/2 · k₂)
//! k₄ = f(yₙ + dt · k₃)
//!
//! yₙ₊₁ = yₙ + dt/6 · (k₁ + 2k₂ + 2k₃ + k₄)
//! ```
//!
//! The leaching equations are autonomous for a fixed inlet, so the time
//! argument is dropped from `f`.
//!
//! # Characteristics
//!
//! - **Order**: fourth-order accurate (global error ~ O(dt⁴))
//! - **Complexity**: 4 function evaluations per step
//! - **Memory**: k₁..k₄ live on the stack (`SVector` is `Copy`)
//! - **Step size**: fixed; explicit, so stiff right-hand sides need small `dt`
//!   or a projection after each step
//!
//! # Example
//!
//! ```rust
//! use leach_rs::solver::rk4::rk4_step;
//! use nalgebra::Vector1;
//!
//! // dy/dt = -y
//! let y = rk4_step(&Vector1::new(1.0), 0.1, |y| -*y).unwrap();
//! assert!((y[0] - (-0.1_f64).exp()).abs() < 1e-6);
//! ```

use nalgebra::SVector;

use crate::error::{LeachError, LeachResult};
use crate::solver::Integrator;

// =================================================================================================
// RK4 step
// =================================================================================================

/// Index of the first non-finite component, if any
fn first_non_finite<const D: usize>(vector: &SVector<f64, D>) -> Option<usize> {
    vector.iter().position(|x| !x.is_finite())
}

/// Check one stage derivative
fn check_finite<const D: usize>(vector: &SVector<f64, D>) -> LeachResult<()> {
    match first_non_finite(vector) {
        Some(component) => Err(LeachError::NonFiniteDerivative { component }),
        None => Ok(()),
    }
}

/// Advance `state` by one RK4 step of size `dt` for `dy/dt = f(y)`
///
/// # Errors
///
/// - [`LeachError::InvalidTimeStep`] when `dt <= 0` or not finite
/// - [`LeachError::NonFiniteDerivative`] when k₁..k₄ or the result has a
///   NaN/Inf component
///
/// No clamping is applied: projecting the result onto the physical domain is
/// the caller's job.
pub fn rk4_step<const D: usize, F>(
    state: &SVector<f64, D>,
    dt: f64,
    f: F,
) -> LeachResult<SVector<f64, D>>
where
    F: Fn(&SVector<f64, D>) -> SVector<f64, D>,
{
    if !dt.is_finite() || dt <= 0.0 {
        return Err(LeachError::InvalidTimeStep(dt));
    }

    let half = dt / 2.0;

    // Slope at the beginning of the interval
    let k1 = f(state);
    check_finite(&k1)?;

    // Two midpoint slopes
    let k2 = f(&(state + k1 * half));
    check_finite(&k2)?;

    let k3 = f(&(state + k2 * half));
    check_finite(&k3)?;

    // Slope at the end of the interval
    let k4 = f(&(state + k3 * dt));
    check_finite(&k4)?;

    // Simpson weights 1/6, 1/3, 1/3, 1/6
    let next = state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0);
    check_finite(&next)?;

    Ok(next)
}

// =================================================================================================
// RK4 Solver
// =================================================================================================

/// Classical fourth-order Runge-Kutta integrator
///
/// # Stability
///
/// For the linear test problem dy/dt = λy, RK4 is stable when
///
/// ```text
/// |1 + z + z²/2 + z³/6 + z⁴/24| ≤ 1,   z = λ·dt
/// ```
///
/// which on the negative real axis means `dt < 2.785 / |λ|`.
///
/// # Example
///
/// ```rust
/// use leach_rs::solver::{Integrator, RK4Solver};
/// use nalgebra::Vector2;
///
/// let solver = RK4Solver::new();
/// assert_eq!(solver.name(), "Runge Kutta (RK4)");
///
/// // Constant growth is integrated exactly (up to rounding)
/// let y = solver.step(&Vector2::new(0.0, 1.0), 0.5, |_| Vector2::new(2.0, 0.0)).unwrap();
/// assert!((y[0] - 1.0).abs() < 1e-12);
/// assert_eq!(y[1], 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RK4Solver;

impl RK4Solver {
    /// Create a new RK4 solver
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for RK4Solver {
    fn step<const D: usize, F>(
        &self,
        state: &SVector<f64, D>,
        dt: f64,
        rhs: F,
    ) -> LeachResult<SVector<f64, D>>
    where
        F: Fn(&SVector<f64, D>) -> SVector<f64, D>,
    {
        rk4_step(state, dt, rhs)
    }

    fn name(&self) -> &'static str {
        "Runge Kutta (RK4)"
    }

    fn evaluations_per_step(&self) -> usize {
        4
    }
}

// =================================================================================================
// Tests
// =================================================================================================
