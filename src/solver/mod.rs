//! Numerical solvers
//!
//! This module integrates the stage equations provided by a physical model
//! over time, for a cascade of stacked stages.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! The solver architecture separates concerns into three layers:
//!
//! 1. **Model** ([`PhysicalModel`](crate::physics::PhysicalModel)) - WHAT to solve
//!    - Right-hand side of one stage
//!    - Initial state and physical clamping
//!
//! 2. **Configuration** ([`RunConfiguration`]) - HOW LONG and HOW FINE
//!    - Horizon, fixed time step, number of stages
//!    - Feed of the top stage, clamp policy
//!
//! 3. **Integrator** ([`Integrator`] trait) - The numerical method
//!    - Advances one state vector by one step
//!    - Independent of physics and of the cascade
//!
//! [`CascadeSimulator`] wires the three together and produces a
//! [`CascadeResult`].
//!
//! # Module Organization
//!
//! - **`traits`**: the [`Integrator`] trait
//! - **`methods`**: integrator implementations ([`RK4Solver`], [`rk4::rk4_step`])
//! - **`configuration`**: [`RunConfiguration`]
//! - **`result`**: [`CascadeResult`]
//! - **`cascade`**: [`CascadeSimulator`] and its threaded [`SimulationHandle`]
//!
//! # Quick Start Example
//!
//! ```rust
//! use leach_rs::models::SimulationParameters;
//! use leach_rs::physics::Species;
//! use leach_rs::solver::{CascadeSimulator, RunConfiguration};
//!
//! let params = SimulationParameters::default();
//! let config = RunConfiguration::default().with_total_time(10.0).with_stages(2);
//!
//! let result = CascadeSimulator::new(params, config)?.run()?;
//!
//! let outlet = result.concentrations(1, Species::B);
//! assert_eq!(outlet.len(), 21);
//! # Ok::<(), leach_rs::error::LeachError>(())
//! ```
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────┐
//! │ SimulationParameters │      │ RunConfiguration │
//! └──────────┬───────────┘      └────────┬─────────┘
//!            │ validate + calibrate      │ validate
//!   ┌────────▼────────┐                  │
//!   │ LeachingModel   │                  │
//!   └────────┬────────┘                  │
//!            └───────────┬───────────────┘
//!               ┌────────▼─────────┐
//!               │ CascadeSimulator │ ← RK4 per stage, per step
//!               └────────┬─────────┘
//!               ┌────────▼─────────┐
//!               │  CascadeResult   │ ← time axis + trajectories
//!               └──────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Every fallible operation returns [`LeachResult`](crate::error::LeachResult).
//! Invalid inputs fail before the first step; a diverging stage stops the run
//! and surfaces the completed time steps:
//!
//! ```rust,ignore
//! match simulator.run() {
//!     Ok(result) => println!("{} time points", result.len()),
//!     Err(error) => {
//!         if let Some(partial) = error.partial_result() {
//!             println!("stopped after {} time points: {error}", partial.len());
//!         }
//!     }
//! }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

mod cascade;
mod configuration;
mod methods;
mod result;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use cascade::{CascadeSimulator, SimulationHandle};
pub use configuration::{RunConfiguration, MAX_TIME_STEPS};
pub use methods::{rk4, RK4Solver};
pub use result::CascadeResult;
pub use traits::Integrator;
