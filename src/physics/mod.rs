//! Physical models
//!
//! This module provides the state representation and the model trait for
//! one bed section of the leaching heap.
//!
//! # Core Concepts
//!
//! - **Stage State**: the 5-component vector `(h, r_A, r_B, c_A, c_B)`
//! - **Inlet**: concentrations entering a stage
//! - **Physical Model**: computes `d(state)/dt` for a state and an inlet
//!
//! # Architecture
//!
//! Physical models are **separate from numerical integrators**:
//! - The model provides the **equations** (physics)
//! - The integrator provides the **method** to step them (numerics)
//!
//! # Example
//!
//! ```rust
//! use leach_rs::physics::{PhysicalModel, StageState, Inlet};
//!
//! struct Inert;
//!
//! impl PhysicalModel for Inert {
//!     fn compute_physics(&self, _state: &StageState, _inlet: &Inlet) -> StageState {
//!         StageState::zeros()
//!     }
//!     fn setup_initial_state(&self) -> StageState {
//!         StageState::new(1.0, 0.01, 0.01, 0.0, 0.0)
//!     }
//!     fn name(&self) -> &str { "Inert" }
//! }
//!
//! let model = Inert;
//! let rate = model.compute_physics(&model.setup_initial_state(), &Inlet::PURE_WATER);
//! assert_eq!(rate, StageState::zeros());
//! ```
//!
//! # Available Models
//!
//! - [`LeachingModel`](crate::models::LeachingModel): shrinking-core
//!   dissolution of two solutes in a draining bed section

// module declaration
pub mod state;
pub mod traits;

// re-export commonly used types for convenience
pub use state::{Inlet, StageState, STATE_DIM};
pub use traits::{PhysicalModel, Species};
