//! Particle-count calibration
//!
//! Before integration starts, the number of soluble particles of each species
//! is derived from a mass balance over the packed bed:
//!
//! ```text
//! V_solid  = A · H · (1 - ξ)
//! m_solid  = V_solid / (w_A/ρ_A + w_B/ρ_B + (1 - w_A - w_B)/ρ_insoluble)
//! V_p      = 4/3 · π · R₀³
//! N        = m_solid · w / (V_p · ρ)
//! ```
//!
//! The counts are computed once per run and stay fixed afterwards.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{LeachError, LeachResult};
use crate::models::parameters::SimulationParameters;
use crate::physics::Species;

/// Number of soluble particles of each species in one bed section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleCounts {
    /// Particles of species A
    pub a: f64,
    /// Particles of species B
    pub b: f64,
}

impl ParticleCounts {
    /// Calibrate particle counts from the bed geometry and ore composition
    ///
    /// # Errors
    ///
    /// Returns [`LeachError::Configuration`] when the parameters are invalid,
    /// in particular when the two mass fractions sum to 1 or more (there
    /// would be no insoluble residue left to carry the bed).
    ///
    /// # Example
    ///
    /// ```
    /// use leach_rs::models::{ParticleCounts, SimulationParameters};
    ///
    /// let counts = ParticleCounts::calibrate(&SimulationParameters::default()).unwrap();
    /// assert!((counts.a - 2491.5).abs() < 0.1);
    /// assert!(counts.b < counts.a);
    /// ```
    pub fn calibrate(params: &SimulationParameters) -> LeachResult<Self> {
        params.validate()?;

        let mass = solid_mass(params)?;
        let particle_volume = particle_volume(params.particle_radius);

        let count = |species: Species| {
            let sp = params.species(species);
            mass * sp.mass_fraction / (particle_volume * sp.density)
        };
        let counts = Self {
            a: count(Species::A),
            b: count(Species::B),
        };

        if !counts.a.is_finite() || !counts.b.is_finite() {
            return Err(LeachError::configuration(format!(
                "particle calibration produced non-finite counts ({}, {})",
                counts.a, counts.b
            )));
        }

        log::debug!(
            "Calibrated particle counts: {} = {:.3}, {} = {:.3} (solid mass {:.3} kg)",
            params.species_a.name,
            counts.a,
            params.species_b.name,
            counts.b,
            mass
        );

        Ok(counts)
    }

    /// Particle count of the given species
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::A => self.a,
            Species::B => self.b,
        }
    }
}

/// Solid volume of the bed $A·H·(1-ξ)$ **\[m³\]**
pub fn solid_volume(params: &SimulationParameters) -> f64 {
    params.area() * params.initial_height * (1.0 - params.void_fraction)
}

/// Total solid mass of the bed **\[kg\]**
///
/// # Errors
///
/// Fails when $w_A + w_B \geq 1$ or a mass fraction is negative.
pub fn solid_mass(params: &SimulationParameters) -> LeachResult<f64> {
    let (a, b) = (&params.species_a, &params.species_b);
    if a.mass_fraction < 0.0 || b.mass_fraction < 0.0 {
        return Err(LeachError::configuration("mass fractions must be >= 0"));
    }
    let insoluble = 1.0 - a.mass_fraction - b.mass_fraction;
    if insoluble <= 0.0 {
        return Err(LeachError::configuration(format!(
            "mass fractions sum to {}, must be < 1",
            a.mass_fraction + b.mass_fraction
        )));
    }

    let specific_volume = a.mass_fraction / a.density
        + b.mass_fraction / b.density
        + insoluble / params.insoluble_density;

    Ok(solid_volume(params) / specific_volume)
}

/// Volume of a sphere of radius `radius`
#[inline]
fn particle_volume(radius: f64) -> f64 {
    4.0 / 3.0 * PI * radius.powi(3)
}

// =================================================================================================
// Tests
// =================================================================================================
