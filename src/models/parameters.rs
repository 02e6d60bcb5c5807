//! Simulation parameters of a leaching column
//!
//! [`SimulationParameters`] is set once at run start and never mutated during
//! integration. Five fields are the user knobs of the original tool (flow
//! rate, initial bed height, particle radius and the two rate constants);
//! everything else defaults to the caliche column constants.
//!
//! # Loading from JSON
//!
//! Every field is optional in the file; missing fields take the default
//! value:
//!
//! ```
//! use leach_rs::models::SimulationParameters;
//!
//! let params = SimulationParameters::from_json_str(r#"{ "flow_rate": 0.0002 }"#).unwrap();
//! assert_eq!(params.flow_rate, 0.0002);
//! assert_eq!(params.void_fraction, 0.2);
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

use crate::error::{LeachError, LeachResult};
use crate::models::species::SpeciesParameters;
use crate::physics::Species;

/// Inner diameter of the reference column \[m\]
pub const DEFAULT_COLUMN_DIAMETER: f64 = 0.2;

/// Parameters of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Irrigation flow rate $q$ **\[m³/h\]**
    pub flow_rate: f64,

    /// Initial bed height $H$ **\[m\]**
    pub initial_height: f64,

    /// Initial particle radius $R_0$ **\[m\]**, shared by both species
    pub particle_radius: f64,

    /// Column inner diameter **\[m\]**; the cross-section area is derived from it
    pub column_diameter: f64,

    /// Void fraction $ξ$ ∈ (0, 1)
    pub void_fraction: f64,

    /// Empirical reaction order $n > 0$, shared by both species
    pub reaction_order: f64,

    /// Density of the insoluble residue **\[kg/m³\]**
    pub insoluble_density: f64,

    /// Fast solute
    pub species_a: SpeciesParameters,

    /// Slow solute
    pub species_b: SpeciesParameters,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            flow_rate: 0.000154,
            initial_height: 0.91,
            particle_radius: 0.00635,
            column_diameter: DEFAULT_COLUMN_DIAMETER,
            void_fraction: 0.2,
            reaction_order: 0.6,
            insoluble_density: 2650.0,
            species_a: SpeciesParameters::nitrate(),
            species_b: SpeciesParameters::magnesium(),
        }
    }
}

impl SimulationParameters {
    // ======================================= Builders =======================================

    /// Builder pattern: set the flow rate $q$
    pub fn with_flow_rate(mut self, flow_rate: f64) -> Self {
        self.flow_rate = flow_rate;
        self
    }

    /// Builder pattern: set the initial bed height $H$
    pub fn with_initial_height(mut self, height: f64) -> Self {
        self.initial_height = height;
        self
    }

    /// Builder pattern: set the initial particle radius $R_0$
    pub fn with_particle_radius(mut self, radius: f64) -> Self {
        self.particle_radius = radius;
        self
    }

    /// Builder pattern: set both dissolution rate constants
    pub fn with_rate_constants(mut self, k_a: f64, k_b: f64) -> Self {
        self.species_a.rate_constant = k_a;
        self.species_b.rate_constant = k_b;
        self
    }

    // ======================================= Queries =======================================

    /// Column cross-section area $A = π (d/2)²$ **\[m²\]**
    pub fn area(&self) -> f64 {
        PI * (self.column_diameter / 2.0).powi(2)
    }

    /// Parameters of the given species
    pub fn species(&self, species: Species) -> &SpeciesParameters {
        match species {
            Species::A => &self.species_a,
            Species::B => &self.species_b,
        }
    }

    // ====================================== Validation ======================================

    /// Validate that parameters are physically meaningful
    ///
    /// Checks every scalar for sign and finiteness, each species, and that
    /// the two soluble mass fractions leave room for an insoluble residue
    /// ($w_A + w_B < 1$).
    pub fn validate(&self) -> LeachResult<()> {
        let positive = [
            ("flow rate", self.flow_rate),
            ("initial bed height", self.initial_height),
            ("particle radius", self.particle_radius),
            ("column diameter", self.column_diameter),
            ("reaction order", self.reaction_order),
            ("insoluble density", self.insoluble_density),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(LeachError::configuration(format!(
                    "{name} must be > 0, got {value}"
                )));
            }
        }

        if !(self.void_fraction > 0.0 && self.void_fraction < 1.0) {
            return Err(LeachError::configuration(format!(
                "void fraction must be in ]0, 1[, got {}",
                self.void_fraction
            )));
        }

        self.species_a.validate()?;
        self.species_b.validate()?;

        let soluble = self.species_a.mass_fraction + self.species_b.mass_fraction;
        if soluble >= 1.0 {
            return Err(LeachError::configuration(format!(
                "mass fractions of '{}' and '{}' sum to {soluble}, must be < 1",
                self.species_a.name, self.species_b.name
            )));
        }

        Ok(())
    }

    // ======================================= JSON I/O =======================================

    /// Parse parameters from a JSON document and validate them
    pub fn from_json_str(json: &str) -> LeachResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read parameters from a JSON file and validate them
    pub fn from_json_file(path: impl AsRef<Path>) -> LeachResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded simulation parameters from {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    /// Serialise to pretty JSON
    pub fn to_json(&self) -> LeachResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
