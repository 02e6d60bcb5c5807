//! Mock stage models for testing
//!
//! Each model has a trivially predictable behaviour, which makes it easy to
//! check the cascade plumbing independently of the leaching kinetics.

use std::time::Duration;

use leach_rs::physics::{Inlet, PhysicalModel, StageState};

// =================================================================================================
// Exponential Decay: dy/dt = -k*y
// =================================================================================================

/// Every component decays as dy/dt = -k*y, the inlet is ignored
///
/// Analytical solution: y(t) = y₀ * exp(-k*t)
pub struct ExponentialDecay {
    pub decay_rate: f64,
}

impl ExponentialDecay {
    pub fn new(decay_rate: f64) -> Self {
        Self { decay_rate }
    }

    /// Compute analytical solution at time t
    pub fn analytical_solution(&self, t: f64, y0: f64) -> f64 {
        y0 * (-self.decay_rate * t).exp()
    }
}

impl PhysicalModel for ExponentialDecay {
    fn compute_physics(&self, state: &StageState, _inlet: &Inlet) -> StageState {
        *state * -self.decay_rate
    }

    fn setup_initial_state(&self) -> StageState {
        StageState::new(1.0, 1.0, 1.0, 1.0, 1.0)
    }

    fn name(&self) -> &str {
        "Exponential Decay"
    }
}

// =================================================================================================
// Unstable: blows up once c_A drops below a threshold
// =================================================================================================

/// c_A falls at 1 per hour; the derivative turns NaN below `threshold`
pub struct Unstable {
    pub threshold: f64,
}

impl PhysicalModel for Unstable {
    fn compute_physics(&self, state: &StageState, _inlet: &Inlet) -> StageState {
        if state.concentration_a() < self.threshold {
            StageState::new(0.0, 0.0, 0.0, f64::NAN, 0.0)
        } else {
            StageState::new(0.0, 0.0, 0.0, -1.0, 0.0)
        }
    }

    fn setup_initial_state(&self) -> StageState {
        StageState::new(1.0, 0.01, 0.01, 10.0, 0.0)
    }

    fn name(&self) -> &str {
        "Unstable"
    }
}

// =================================================================================================
// Sluggish: constant state, slow evaluation
// =================================================================================================

/// Zero derivative that takes `delay` to compute, for cancellation tests
pub struct Sluggish {
    pub delay: Duration,
}

impl PhysicalModel for Sluggish {
    fn compute_physics(&self, _state: &StageState, _inlet: &Inlet) -> StageState {
        std::thread::sleep(self.delay);
        StageState::zeros()
    }

    fn setup_initial_state(&self) -> StageState {
        StageState::new(1.0, 0.01, 0.01, 5.0, 5.0)
    }

    fn name(&self) -> &str {
        "Sluggish"
    }
}

// =================================================================================================
// Draining: a stage whose bed collapses
// =================================================================================================

/// c_A relaxes towards the inlet at rate 1
///
/// The height drops at 1.2 per hour while the inlet carries species B, and
/// the stage is frozen once the height reaches 0.
pub struct Draining;

impl PhysicalModel for Draining {
    fn compute_physics(&self, state: &StageState, inlet: &Inlet) -> StageState {
        let dh = if inlet.b > 0.0 { -1.2 } else { 0.0 };
        StageState::new(dh, 0.0, 0.0, inlet.a - state.concentration_a(), 0.0)
    }

    fn setup_initial_state(&self) -> StageState {
        StageState::new(1.0, 0.01, 0.01, 0.0, 0.0)
    }

    fn is_frozen(&self, state: &StageState) -> bool {
        state.height() <= 0.0
    }

    fn name(&self) -> &str {
        "Draining"
    }
}
