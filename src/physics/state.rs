//! Stage state vector and inlet concentrations
//!
//! The ODE state of one bed section is a fixed-size `Vector5<f64>`:
//!
//! ```text
//! index   quantity                 unit
//!   0     bed height h             m
//!   1     particle radius r_A      m
//!   2     particle radius r_B      m
//!   3     concentration c_A        g/L
//!   4     concentration c_B        g/L
//! ```
//!
//! Componentwise arithmetic (`+`, `* f64`) is what the integrator needs to
//! combine stage derivatives; it never goes through a dynamically sized
//! container, so dimension mismatches cannot happen.

use nalgebra::Vector5;
use serde::{Deserialize, Serialize};

use crate::physics::traits::Species;

/// Dimension of the stage state vector
pub const STATE_DIM: usize = 5;

/// State of one cascade stage at a given time
///
/// # Example
///
/// ```
/// use leach_rs::physics::{StageState, Species};
///
/// let state = StageState::new(0.91, 0.00635, 0.00635, 250.0, 20.0);
/// assert_eq!(state.height(), 0.91);
/// assert_eq!(state.concentration(Species::B), 20.0);
///
/// let doubled = state * 2.0;
/// assert_eq!(doubled.concentration_a(), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageState(Vector5<f64>);

impl StageState {
    /// Index of the bed height
    pub const HEIGHT: usize = 0;
    /// Index of the species A particle radius
    pub const RADIUS_A: usize = 1;
    /// Index of the species B particle radius
    pub const RADIUS_B: usize = 2;
    /// Index of the species A bulk concentration
    pub const CONCENTRATION_A: usize = 3;
    /// Index of the species B bulk concentration
    pub const CONCENTRATION_B: usize = 4;

    /// Create a state from its five components
    pub fn new(height: f64, radius_a: f64, radius_b: f64, concentration_a: f64, concentration_b: f64) -> Self {
        Self(Vector5::new(height, radius_a, radius_b, concentration_a, concentration_b))
    }

    /// All-zero state (also the derivative of a frozen stage)
    pub fn zeros() -> Self {
        Self(Vector5::zeros())
    }

    /// Wrap a raw vector
    pub fn from_vector(vector: Vector5<f64>) -> Self {
        Self(vector)
    }

    /// Borrow the raw vector
    pub fn as_vector(&self) -> &Vector5<f64> {
        &self.0
    }

    /// Unwrap the raw vector
    pub fn into_vector(self) -> Vector5<f64> {
        self.0
    }

    // ====================================== Accessors ======================================

    /// Bed height h \[m\]
    pub fn height(&self) -> f64 {
        self.0[Self::HEIGHT]
    }

    /// Particle radius of species A \[m\]
    pub fn radius_a(&self) -> f64 {
        self.0[Self::RADIUS_A]
    }

    /// Particle radius of species B \[m\]
    pub fn radius_b(&self) -> f64 {
        self.0[Self::RADIUS_B]
    }

    /// Bulk concentration of species A \[g/L\]
    pub fn concentration_a(&self) -> f64 {
        self.0[Self::CONCENTRATION_A]
    }

    /// Bulk concentration of species B \[g/L\]
    pub fn concentration_b(&self) -> f64 {
        self.0[Self::CONCENTRATION_B]
    }

    /// Particle radius of the given species
    pub fn radius(&self, species: Species) -> f64 {
        match species {
            Species::A => self.radius_a(),
            Species::B => self.radius_b(),
        }
    }

    /// Bulk concentration of the given species
    pub fn concentration(&self, species: Species) -> f64 {
        match species {
            Species::A => self.concentration_a(),
            Species::B => self.concentration_b(),
        }
    }

    /// Set the bulk concentration of the given species
    pub fn set_concentration(&mut self, species: Species, value: f64) {
        let index = match species {
            Species::A => Self::CONCENTRATION_A,
            Species::B => Self::CONCENTRATION_B,
        };
        self.0[index] = value;
    }

    /// Concentrations leaving this stage, i.e. the inlet of the next one
    pub fn outlet(&self) -> Inlet {
        Inlet::new(self.concentration_a(), self.concentration_b())
    }

    // ====================================== Checks ======================================

    /// Clamp every component to a minimum of zero
    ///
    /// Height, radii and concentrations are all physically non-negative.
    pub fn clamp_non_negative(self) -> Self {
        Self(self.0.map(|x| x.max(0.0)))
    }

    /// True when no component is NaN or infinite
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// Index of the first NaN/Inf component, if any
    pub fn first_non_finite(&self) -> Option<usize> {
        self.0.iter().position(|x| !x.is_finite())
    }

    /// Human readable name of a component index
    pub fn quantity_name(index: usize) -> &'static str {
        match index {
            Self::HEIGHT => "bed height",
            Self::RADIUS_A => "radius A",
            Self::RADIUS_B => "radius B",
            Self::CONCENTRATION_A => "concentration A",
            Self::CONCENTRATION_B => "concentration B",
            _ => "unknown",
        }
    }
}

impl From<Vector5<f64>> for StageState {
    fn from(vector: Vector5<f64>) -> Self {
        Self(vector)
    }
}

impl std::ops::Index<usize> for StageState {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

// Operator overloading for the integrator stage combinations

impl std::ops::Add for StageState {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Mul<f64> for StageState {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self(self.0 * scalar)
    }
}

// =================================================================================================
// Inlet
// =================================================================================================

/// Concentrations entering a stage \[g/L\]
///
/// Stage 0 receives the feed (fresh irrigation water by default); every
/// following stage receives the outlet of the stage above it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Inlet {
    /// Species A inlet concentration
    pub a: f64,
    /// Species B inlet concentration
    pub b: f64,
}

impl Inlet {
    /// Carrier fluid without solute
    pub const PURE_WATER: Inlet = Inlet { a: 0.0, b: 0.0 };

    /// Create an inlet pair
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Inlet concentration of the given species
    pub fn get(&self, species: Species) -> f64 {
        match species {
            Species::A => self.a,
            Species::B => self.b,
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StageState {
        StageState::new(0.91, 0.006, 0.005, 250.0, 20.0)
    }

    #[test]
    fn test_accessors_follow_layout() {
        let state = sample();
        assert_eq!(state[StageState::HEIGHT], 0.91);
        assert_eq!(state.radius(Species::A), 0.006);
        assert_eq!(state.radius(Species::B), 0.005);
        assert_eq!(state.concentration(Species::A), 250.0);
        assert_eq!(state.concentration(Species::B), 20.0);
    }

    #[test]
    fn test_addition_and_scaling() {
        let sum = sample() + sample() * 0.5;
        assert_eq!(sum.height(), 0.91 * 1.5);
        assert_eq!(sum.concentration_b(), 30.0);
    }

    #[test]
    fn test_clamp_non_negative() {
        let state = StageState::new(-0.1, 0.002, -1e-9, -3.0, 4.0).clamp_non_negative();
        assert_eq!(state, StageState::new(0.0, 0.002, 0.0, 0.0, 4.0));
    }

    #[test]
    fn test_first_non_finite() {
        assert_eq!(sample().first_non_finite(), None);
        assert!(sample().is_finite());

        let broken = StageState::new(1.0, 1.0, 1.0, f64::NAN, f64::INFINITY);
        assert!(!broken.is_finite());
        assert_eq!(broken.first_non_finite(), Some(StageState::CONCENTRATION_A));
        assert_eq!(StageState::quantity_name(3), "concentration A");
    }

    #[test]
    fn test_outlet_becomes_inlet() {
        let mut state = sample();
        state.set_concentration(Species::B, 12.5);
        let inlet = state.outlet();
        assert_eq!(inlet, Inlet::new(250.0, 12.5));
        assert_eq!(inlet.get(Species::B), 12.5);
        assert_eq!(Inlet::default(), Inlet::PURE_WATER);
    }
}
