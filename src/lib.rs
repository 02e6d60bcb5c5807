//! leach-rs: Heap Leaching Simulation Framework
//!
//! Simulates the irrigation of a caliche heap split into stacked stages. Each
//! stage holds spherical particles of two soluble species that dissolve with
//! shrinking-core kinetics while the percolating solution carries the
//! dissolved salts down to the next stage.
//!
//! # Architecture
//!
//! leach-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physical models define the stage equations (what to solve)
//!    - Integrators provide the time stepping (how to solve)
//!
//! 2. **Validated inputs, typed failures**
//!    - Parameters are checked before a run starts
//!    - Every failure is a [`LeachError`](error::LeachError) variant
//!
//! # Quick Start
//!
//! ```rust
//! use leach_rs::prelude::*;
//!
//! # fn main() -> LeachResult<()> {
//! // 1. Physical and operating parameters (caliche defaults)
//! let params = SimulationParameters::default();
//!
//! // 2. Run configuration: 24 h, dt = 0.5 h, three stages fed with water
//! let config = RunConfiguration::default().with_total_time(24.0);
//!
//! // 3. Calibrate particle counts and integrate
//! let result = CascadeSimulator::new(params, config)?.run()?;
//!
//! // 4. Access results
//! let bottom = result.final_state(2).expect("three stages");
//! assert!(bottom.concentration(Species::A) <= 250.0);
//! assert_eq!(result.len(), 49);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error type and result alias
//! - [`physics`]: Stage state, feed and the [`PhysicalModel`](physics::PhysicalModel) trait
//! - [`models`]: Parameters, particle calibration and the shrinking-core model
//! - [`solver`]: RK4 integrator and the cascade simulator
//! - [`output`]: Plots and CSV/JSON export

pub mod error;
pub mod models;
pub mod output;
pub mod physics;
pub mod solver;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use leach_rs::prelude::*;
    //! ```
    pub use crate::error::{LeachError, LeachResult};
    pub use crate::models::{
        ClampPolicy, LeachingModel, ParticleCounts, SimulationParameters, SpeciesParameters,
    };
    pub use crate::physics::{Inlet, PhysicalModel, Species, StageState};
    pub use crate::solver::{
        CascadeResult, CascadeSimulator, Integrator, RK4Solver, RunConfiguration,
        SimulationHandle,
    };
}
