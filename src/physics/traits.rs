//! Physical model traits and types
//!
//! This module defines the core API for physical models:
//! - `PhysicalModel`: trait for all stage models
//! - `Species`: type-safe identifier of the two tracked solutes

use crate::physics::state::{Inlet, StageState};

// =================================================================================================
// Species (Type-safe Identifiers)
// =================================================================================================

/// Tracked solute
///
/// The model follows exactly two dissolving species. In the caliche use case
/// `A` is nitrate (fast) and `B` is magnesium (slow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Species {
    /// Fast-dissolving solute (NO3 in caliche)
    A,
    /// Slow-dissolving solute (Mg in caliche)
    B,
}

impl Species {
    /// Both species, in state order
    pub const ALL: [Species; 2] = [Species::A, Species::B];

    /// Short label used in column headers
    pub fn label(&self) -> &'static str {
        match self {
            Species::A => "A",
            Species::B => "B",
        }
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "species {}", self.label())
    }
}

// ==================================================================================================
// Physical Model Trait
// =================================================================================================

/// Trait for stage models
///
/// # Responsibility
/// Computes the right-hand side f(y, c_in) of dy/dt = f(y, c_in) for one bed
/// section. Does NOT integrate it (that's the integrator's job).
///
/// The model provides the "physics" (equations), the integrator provides
/// the "numerics" (method to step them), and the cascade wires stages together.
///
/// # Clamping
/// Physical bounds are enforced by [`constrain`](Self::constrain), which the
/// cascade calls on every stepped state. Keeping it out of the integrator
/// lets the same RK4 step serve any state vector.
pub trait PhysicalModel: Send + Sync {
    /// Right-hand side for the current state and inlet concentrations
    fn compute_physics(&self, state: &StageState, inlet: &Inlet) -> StageState;

    /// Initial state of every stage
    fn setup_initial_state(&self) -> StageState;

    /// Project a freshly stepped state back onto the physical domain
    ///
    /// `previous` is the state before the step, `inlet` the concentrations
    /// the step was computed with. Default: clamp every component at zero.
    fn constrain(&self, previous: &StageState, stepped: StageState, inlet: &Inlet) -> StageState {
        let _ = (previous, inlet);
        stepped.clamp_non_negative()
    }

    /// Whether the stage can no longer evolve (its derivative is identically zero)
    fn is_frozen(&self, state: &StageState) -> bool {
        let _ = state;
        false
    }

    /// Name of the model (used for display and logging)
    fn name(&self) -> &str;

    /// Description of the model (optional)
    fn description(&self) -> Option<&str> {
        None
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Washout;

    impl PhysicalModel for Washout {
        fn compute_physics(&self, state: &StageState, inlet: &Inlet) -> StageState {
            StageState::new(
                0.0,
                0.0,
                0.0,
                inlet.a - state.concentration_a(),
                inlet.b - state.concentration_b(),
            )
        }

        fn setup_initial_state(&self) -> StageState {
            StageState::new(1.0, 0.0, 0.0, 10.0, 1.0)
        }

        fn name(&self) -> &str {
            "Washout"
        }
    }

    #[test]
    fn test_default_constrain_clamps_at_zero() {
        let model = Washout;
        let initial = model.setup_initial_state();
        let stepped = StageState::new(1.0, 0.0, 0.0, -2.0, 0.5);
        let constrained = model.constrain(&initial, stepped, &Inlet::PURE_WATER);
        assert_eq!(constrained.concentration_a(), 0.0);
        assert_eq!(constrained.concentration_b(), 0.5);
    }

    #[test]
    fn test_default_hooks() {
        let model = Washout;
        assert!(!model.is_frozen(&StageState::zeros()));
        assert!(model.description().is_none());
        assert_eq!(model.name(), "Washout");
    }

    #[test]
    fn test_species_labels() {
        assert_eq!(Species::ALL, [Species::A, Species::B]);
        assert_eq!(Species::B.to_string(), "species B");
    }
}
