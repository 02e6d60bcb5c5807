//! Shrinking-core dissolution kinetics of a single solute
//!
//! # Mathematical Background
//!
//! A soluble particle of radius $r$ shrinks while the surrounding liquor is
//! below saturation:
//!
//! ```text
//! F      = max(0, C_s - c)^n                 (driving force)
//! dr/dt  = -(k / ρ) · F                      (radius shrinkage)
//! R      = 4π · N · k · r² · F               (mass released into the liquor)
//! ```
//!
//! The driving force is clamped at zero: once the liquor reaches saturation
//! dissolution stops and nothing re-precipitates. The order $n$ is an
//! empirical, usually sub-linear exponent; a zero base always yields zero,
//! whatever $n$.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::error::{LeachError, LeachResult};

// =================================================================================================
// Kinetic functions
// =================================================================================================

/// Driving force $\max(0, C_s - c)^n$
///
/// # Example
///
/// ```
/// use leach_rs::models::species::driving_force;
///
/// assert_eq!(driving_force(250.0, 250.0, 0.6), 0.0);
/// assert_eq!(driving_force(250.0, 300.0, 0.6), 0.0);
/// assert!((driving_force(20.0, 12.0, 0.5) - 8.0_f64.sqrt()).abs() < 1e-12);
/// ```
#[inline]
pub fn driving_force(saturation: f64, concentration: f64, order: f64) -> f64 {
    let deficit = saturation - concentration;
    if deficit > 0.0 {
        deficit.powf(order)
    } else {
        0.0
    }
}

/// Radius shrinkage rate $dr/dt = -(k/ρ)·F$ **\[m/h\]**, never positive
#[inline]
pub fn shrinkage_rate(rate_constant: f64, density: f64, driving: f64) -> f64 {
    -(rate_constant / density) * driving
}

/// Source term $4π·N·k·r²·F$ released into the liquor by `particles` particles
#[inline]
pub fn reaction_rate(particles: f64, rate_constant: f64, radius: f64, driving: f64) -> f64 {
    4.0 * PI * particles * rate_constant * radius * radius * driving
}

// =================================================================================================
// SpeciesParameters
// =================================================================================================

/// Physical parameters of a dissolving solute
///
/// # Example
///
/// ```
/// use leach_rs::models::SpeciesParameters;
///
/// let nitrate = SpeciesParameters::new("NO3", 0.2, 250.0, 2260.0, 0.1015);
/// assert!(nitrate.validate().is_ok());
///
/// let bad = SpeciesParameters::new("Bad", 0.2, 250.0, 0.0, 0.1);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParameters {
    /// Species name (used for plot legends and CSV headers)
    pub name: String,

    /// Dissolution rate constant $k$, must be $\geq 0$
    pub rate_constant: f64,

    /// Saturation concentration $C_s$ **\[g/L\]**, must be $\geq 0$
    pub saturation: f64,

    /// Solid density $ρ$ **\[kg/m³\]**, must be $> 0$
    pub density: f64,

    /// Initial mass fraction $w_0$ in the ore, in $[0, 1)$
    pub mass_fraction: f64,
}

impl SpeciesParameters {
    /// Creates a new species parameter set
    ///
    /// This constructor does not validate. Call [`validate`](Self::validate)
    /// before handing the parameters to a simulation.
    pub fn new(
        name: impl Into<String>,
        rate_constant: f64,
        saturation: f64,
        density: f64,
        mass_fraction: f64,
    ) -> Self {
        Self {
            name: name.into(),
            rate_constant,
            saturation,
            density,
            mass_fraction,
        }
    }

    /// Nitrate in caliche ore (fast solute)
    pub fn nitrate() -> Self {
        Self::new("NO3", 0.2, 250.0, 2260.0, 0.1015)
    }

    /// Magnesium in caliche ore (slow solute)
    pub fn magnesium() -> Self {
        Self::new("Mg", 0.01, 20.0, 2320.0, 0.0078)
    }

    /// Builder pattern: set the rate constant
    pub fn with_rate_constant(mut self, rate_constant: f64) -> Self {
        self.rate_constant = rate_constant;
        self
    }

    /// Validates the physical constraints of the parameters
    ///
    /// # Rules
    ///
    /// - $k \geq 0$: a zero rate models an inert solute
    /// - $C_s \geq 0$
    /// - $ρ > 0$: the density divides the shrinkage rate
    /// - $0 \leq w_0 < 1$
    pub fn validate(&self) -> LeachResult<()> {
        if !self.rate_constant.is_finite() || self.rate_constant < 0.0 {
            return Err(LeachError::configuration(format!(
                "species '{}': rate constant must be >= 0, got {}",
                self.name, self.rate_constant
            )));
        }
        if !self.saturation.is_finite() || self.saturation < 0.0 {
            return Err(LeachError::configuration(format!(
                "species '{}': saturation concentration must be >= 0, got {}",
                self.name, self.saturation
            )));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(LeachError::configuration(format!(
                "species '{}': density must be > 0, got {}",
                self.name, self.density
            )));
        }
        if !self.mass_fraction.is_finite() || !(0.0..1.0).contains(&self.mass_fraction) {
            return Err(LeachError::configuration(format!(
                "species '{}': mass fraction must be in [0, 1), got {}",
                self.name, self.mass_fraction
            )));
        }
        Ok(())
    }

    /// Driving force at bulk concentration `concentration`
    #[inline]
    pub fn driving_force(&self, order: f64, concentration: f64) -> f64 {
        driving_force(self.saturation, concentration, order)
    }

    /// $dr/dt$ at bulk concentration `concentration`
    #[inline]
    pub fn shrinkage_rate(&self, order: f64, concentration: f64) -> f64 {
        shrinkage_rate(
            self.rate_constant,
            self.density,
            self.driving_force(order, concentration),
        )
    }

    /// Mass source term of `particles` particles of radius `radius`
    #[inline]
    pub fn reaction_rate(&self, order: f64, particles: f64, radius: f64, concentration: f64) -> f64 {
        reaction_rate(
            particles,
            self.rate_constant,
            radius,
            self.driving_force(order, concentration),
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_driving_force_zero_at_and_above_saturation() {
        for order in [0.3, 0.6, 1.0, 2.0] {
            assert_eq!(driving_force(250.0, 250.0, order), 0.0);
            assert_eq!(driving_force(250.0, 251.0, order), 0.0);
        }
    }

    #[test]
    fn test_driving_force_sub_linear_order() {
        assert_relative_eq!(driving_force(250.0, 218.0, 0.6), 32.0_f64.powf(0.6), epsilon = 1e-12);
        assert_relative_eq!(driving_force(1.0, 0.0, 0.6), 1.0);
    }

    #[test]
    fn test_zero_base_is_zero_even_for_tiny_order() {
        assert_eq!(driving_force(0.0, 0.0, 1e-9), 0.0);
    }

    #[test]
    fn test_shrinkage_never_positive() {
        let nitrate = SpeciesParameters::nitrate();
        for c in [0.0, 100.0, 249.9, 250.0, 400.0] {
            assert!(nitrate.shrinkage_rate(0.6, c) <= 0.0);
        }
        assert_relative_eq!(
            nitrate.shrinkage_rate(0.6, 0.0),
            -(0.2 / 2260.0) * 250.0_f64.powf(0.6),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_reaction_rate_scales_with_surface() {
        let magnesium = SpeciesParameters::magnesium();
        let small = magnesium.reaction_rate(0.6, 100.0, 0.001, 10.0);
        let large = magnesium.reaction_rate(0.6, 100.0, 0.002, 10.0);
        assert_relative_eq!(large / small, 4.0, epsilon = 1e-12);
        assert_eq!(magnesium.reaction_rate(0.6, 100.0, 0.002, 20.0), 0.0);
    }

    #[test]
    fn test_zero_rate_constant_is_inert() {
        let inert = SpeciesParameters::nitrate().with_rate_constant(0.0);
        assert!(inert.validate().is_ok());
        assert_eq!(inert.shrinkage_rate(0.6, 0.0), 0.0);
        assert_eq!(inert.reaction_rate(0.6, 1e3, 0.01, 0.0), 0.0);
    }

    #[test]
    fn test_validation_rules() {
        assert!(SpeciesParameters::nitrate().validate().is_ok());
        assert!(SpeciesParameters::magnesium().validate().is_ok());
        assert!(SpeciesParameters::new("k", -0.1, 250.0, 2260.0, 0.1).validate().is_err());
        assert!(SpeciesParameters::new("cs", 0.1, -1.0, 2260.0, 0.1).validate().is_err());
        assert!(SpeciesParameters::new("rho", 0.1, 250.0, 0.0, 0.1).validate().is_err());
        assert!(SpeciesParameters::new("w", 0.1, 250.0, 2260.0, 1.0).validate().is_err());
        assert!(SpeciesParameters::new("w", 0.1, 250.0, 2260.0, -0.1).validate().is_err());
        assert!(SpeciesParameters::new("nan", f64::NAN, 250.0, 2260.0, 0.1).validate().is_err());
    }
}
