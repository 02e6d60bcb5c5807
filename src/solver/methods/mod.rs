//! Numerical methods for time integration
//!
//! This module contains concrete implementations of the
//! [`Integrator`](crate::solver::Integrator) trait.
//!
//! # Architecture
//!
//! The separation between the abstract integrator interface (`solver::traits`)
//! and concrete implementations (`solver::methods`) keeps the cascade
//! independent of the scheme: a new method is a new file here.
//!
//! # Available Methods
//!
//! - **[`RK4Solver`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(dt⁴)
//!   - Cost: 4 function evaluations per step
//!   - Free function form: [`rk4::rk4_step`]
//!
//! Each method is stateless and can be reused for any number of runs.

pub mod rk4;

// Re-exports for convenience
pub use rk4::RK4Solver;
