//! Error types for the simulation core
//!
//! Provides the [`LeachError`] enum and the [`LeachResult`] alias used by
//! every fallible operation of the parameter, calibration and solver layers.
//!
//! # Taxonomy
//!
//! | Variant                  | Raised by                     | Fatal for the run |
//! |--------------------------|-------------------------------|-------------------|
//! | `Configuration`          | parameter / run validation    | yes (never starts)|
//! | `InvalidTimeStep`        | integrator step               | yes               |
//! | `NonFiniteDerivative`    | integrator step               | yes               |
//! | `NumericalDivergence`    | cascade loop                  | yes               |
//! | `Cancelled`              | cooperative cancellation      | caller decision   |
//! | `Io` / `Parse`           | JSON parameter files          | yes (never starts)|
//!
//! A stage whose solution volume collapses is **not** an error: the model
//! freezes its derivative at zero and the cascade keeps going.
//!
//! The output layer (CSV, JSON, plots) keeps returning `Box<dyn Error>`.
//!
//! # Example
//!
//! ```
//! use leach_rs::error::{LeachError, LeachResult};
//!
//! fn check_height(h: f64) -> LeachResult<()> {
//!     if h <= 0.0 {
//!         return Err(LeachError::configuration(format!("bed height must be > 0, got {h}")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_height(-1.0).is_err());
//! ```

use thiserror::Error;

use crate::solver::CascadeResult;

/// Result alias for the simulation core
pub type LeachResult<T> = Result<T, LeachError>;

/// Simulation core error type
#[derive(Error, Debug)]
pub enum LeachError {
    /// Invalid simulation parameters or run configuration
    ///
    /// Detected before integration begins; the run must not start.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The integrator was asked to step with `dt <= 0` or a non-finite `dt`
    #[error("invalid time step: dt = {0} (must be positive and finite)")]
    InvalidTimeStep(f64),

    /// A stage derivative (k1..k4) or the stepped state has a NaN/Inf component
    #[error("non-finite value in state component {component} during integration step")]
    NonFiniteDerivative {
        /// Index of the offending component
        component: usize,
    },

    /// A stage produced a non-finite state during the cascade run
    ///
    /// `partial` only holds time points strictly before `time`.
    #[error("numerical divergence in stage {stage} at t = {time} (step {step}): {reason}")]
    NumericalDivergence {
        /// Stage index (0 = top of the heap)
        stage: usize,
        /// Time step index that failed
        step: usize,
        /// Simulated time the step was heading to
        time: f64,
        /// Underlying integrator message
        reason: String,
        /// Results of all completed time steps, for diagnostics
        partial: Box<CascadeResult>,
    },

    /// The caller asked the run to stop between two time steps
    #[error("simulation cancelled at t = {time} after {step} steps")]
    Cancelled {
        /// Number of completed time steps
        step: usize,
        /// Last simulated time
        time: f64,
        /// Results of all completed time steps
        partial: Box<CascadeResult>,
    },

    /// Reading a parameter file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter file is not valid JSON for the expected structure
    #[error("parameter parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LeachError {
    /// Shorthand for [`LeachError::Configuration`]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether the error was raised before any integration happened
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Io(_) | Self::Parse(_))
    }

    /// Results surfaced with a divergence or cancellation, if any
    pub fn partial_result(&self) -> Option<&CascadeResult> {
        match self {
            Self::NumericalDivergence { partial, .. } | Self::Cancelled { partial, .. } => {
                Some(partial)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let error = LeachError::configuration("mass fractions sum to 1.2");
        assert_eq!(error.to_string(), "invalid configuration: mass fractions sum to 1.2");
        assert!(error.is_configuration());
        assert!(error.partial_result().is_none());
    }

    #[test]
    fn test_time_step_message() {
        let error = LeachError::InvalidTimeStep(-0.5);
        assert!(error.to_string().contains("dt = -0.5"));
        assert!(!error.is_configuration());
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse: Result<f64, _> = serde_json::from_str::<f64>("not json");
        let error: LeachError = parse.unwrap_err().into();
        assert!(matches!(error, LeachError::Parse(_)));
        assert!(error.is_configuration());
    }
}
