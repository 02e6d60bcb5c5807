//! Physical models for heap leaching simulation
//!
//! All models implement the [`PhysicalModel`](crate::physics::PhysicalModel) trait.
//! The cascade calls `compute_physics` for every RK4 stage evaluation; models
//! are responsible for the physics (dissolution, bed settling, advection),
//! the integrator for the time stepping.
//!
//! # Building blocks
//!
//! - [`species`]: shrinking-core kinetics of a single solute and its
//!   [`SpeciesParameters`]
//! - [`parameters`]: the [`SimulationParameters`] record of one run
//! - [`calibration`]: one-time mass balance giving the [`ParticleCounts`]
//! - [`leaching`]: the [`LeachingModel`] derivative of one bed section
//!
//! # Example
//!
//! ```
//! use leach_rs::models::{LeachingModel, SimulationParameters};
//! use leach_rs::physics::PhysicalModel;
//!
//! let params = SimulationParameters::default().with_rate_constants(0.3, 0.02);
//! let model = LeachingModel::calibrated(params).unwrap();
//! assert_eq!(model.setup_initial_state().height(), 0.91);
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod calibration;
pub mod leaching;
pub mod parameters;
pub mod species;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use calibration::ParticleCounts;
pub use leaching::{ClampPolicy, LeachingModel};
pub use parameters::SimulationParameters;
pub use species::SpeciesParameters;
