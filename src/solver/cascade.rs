//! Multi-stage cascade simulator
//!
//! The heap is modelled as `S` stacked bed sections. Liquor leaving stage
//! `i-1` is the inlet of stage `i`; stage 0 receives the feed.
//!
//! # Algorithm
//!
//! ```text
//! record y⁽ⁱ⁾(0) for every stage
//! for n = 1..=N:
//!     inlet ← feed
//!     for i = 0..S:                       (strict order, never parallel)
//!         y⁽ⁱ⁾ ← constrain(RK4(y⁽ⁱ⁾, dt, f(·, inlet)))
//!         inlet ← (c_A⁽ⁱ⁾, c_B⁽ⁱ⁾)         (freshly stepped outlet)
//!     record y⁽ⁱ⁾(n·dt) for every stage
//! ```
//!
//! Within one time step a stage always sees the outlet its upstream
//! neighbour produced during that same step.
//!
//! # Example
//!
//! ```rust
//! use leach_rs::models::SimulationParameters;
//! use leach_rs::physics::Species;
//! use leach_rs::solver::{CascadeSimulator, RunConfiguration};
//!
//! let config = RunConfiguration::default().with_total_time(5.0);
//! let simulator = CascadeSimulator::new(SimulationParameters::default(), config).unwrap();
//! let result = simulator.run().unwrap();
//!
//! assert_eq!(result.len(), 11);
//! assert_eq!(result.stage_count(), 3);
//! assert_eq!(result.concentrations(0, Species::A)[0], 250.0);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use crate::error::{LeachError, LeachResult};
use crate::models::{LeachingModel, SimulationParameters};
use crate::physics::{PhysicalModel, StageState};
use crate::solver::{CascadeResult, Integrator, RK4Solver, RunConfiguration};

// =================================================================================================
// Cascade Simulator
// =================================================================================================

/// Drives a cascade of stages through time
///
/// Owns its model and configuration; each call to [`run`](Self::run) builds
/// a fresh result, so a simulator can be run any number of times with
/// bit-identical output.
pub struct CascadeSimulator<I: Integrator = RK4Solver> {
    model: Box<dyn PhysicalModel>,
    config: RunConfiguration,
    integrator: I,
}

impl CascadeSimulator<RK4Solver> {
    /// Validate the inputs, calibrate particle counts once and build the simulator
    ///
    /// # Errors
    ///
    /// [`LeachError::Configuration`] when the parameters or the run
    /// configuration are invalid (including mass fractions summing to 1 or
    /// more). No integration happens in that case.
    pub fn new(params: SimulationParameters, config: RunConfiguration) -> LeachResult<Self> {
        config.validate()?;
        let model = LeachingModel::calibrated(params)?.with_clamp(config.clamp);
        Self::with_model(Box::new(model), config)
    }

    /// Build a simulator around any stage model
    pub fn with_model(model: Box<dyn PhysicalModel>, config: RunConfiguration) -> LeachResult<Self> {
        Self::with_integrator(model, config, RK4Solver::new())
    }
}

impl<I: Integrator> CascadeSimulator<I> {
    /// Build a simulator with an explicit integrator
    pub fn with_integrator(
        model: Box<dyn PhysicalModel>,
        config: RunConfiguration,
        integrator: I,
    ) -> LeachResult<Self> {
        config.validate()?;
        Ok(Self {
            model,
            config,
            integrator,
        })
    }

    /// Run configuration
    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// Stage model
    pub fn model(&self) -> &dyn PhysicalModel {
        self.model.as_ref()
    }

    /// Run the whole horizon
    ///
    /// # Errors
    ///
    /// [`LeachError::NumericalDivergence`] when a stage produces a non-finite
    /// state; the error carries every time point completed before the
    /// failing step.
    pub fn run(&self) -> LeachResult<CascadeResult> {
        self.run_with_cancel(&AtomicBool::new(false))
    }

    /// Run the whole horizon, checking `cancel` between time steps
    ///
    /// # Errors
    ///
    /// Besides divergence, [`LeachError::Cancelled`] when `cancel` was set;
    /// the error carries every completed time step.
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> LeachResult<CascadeResult> {
        let steps = self.config.time_steps();
        let dt = self.config.time_step;
        let stages = self.config.stages;

        log::info!(
            "Starting cascade run: model '{}', {} stage(s), {} steps of {} h ({})",
            self.model.name(),
            stages,
            steps,
            dt,
            self.integrator.name()
        );

        let mut states = vec![self.model.setup_initial_state(); stages];
        let mut frozen = vec![false; stages];
        let mut evaluations = 0usize;

        let points = steps
            .checked_add(1)
            .ok_or_else(|| LeachError::configuration(format!("{steps} time steps overflow the result")))?;
        let mut result = CascadeResult::with_capacity(stages, points);
        result.push(0.0, &states);

        for step in 1..=steps {
            if cancel.load(Ordering::SeqCst) {
                let time = (step - 1) as f64 * dt;
                log::warn!("Cascade run cancelled at t = {time} after {} steps", step - 1);
                self.annotate(&mut result, step - 1, evaluations);
                return Err(LeachError::Cancelled {
                    step: step - 1,
                    time,
                    partial: Box::new(result),
                });
            }

            // Computed from the index to avoid accumulating rounding errors
            let time = step as f64 * dt;
            let mut inlet = self.config.feed;

            for (stage, state) in states.iter_mut().enumerate() {
                if self.model.is_frozen(state) {
                    if !frozen[stage] {
                        log::warn!("Stage {stage} has no liquor volume left at t = {time}, freezing it");
                        frozen[stage] = true;
                    }
                } else {
                    let stepped = self.integrator.step(state.as_vector(), dt, |y| {
                        self.model
                            .compute_physics(&StageState::from_vector(*y), &inlet)
                            .into_vector()
                    });
                    evaluations += self.integrator.evaluations_per_step();

                    let next = match stepped {
                        Ok(vector) => self.model.constrain(state, StageState::from(vector), &inlet),
                        Err(error) => {
                            return Err(self.diverged(stage, step, time, error.to_string(), result, evaluations));
                        }
                    };

                    if let Some(component) = next.first_non_finite() {
                        let reason = format!(
                            "non-finite {} after clamping",
                            StageState::quantity_name(component)
                        );
                        return Err(self.diverged(stage, step, time, reason, result, evaluations));
                    }

                    *state = next;
                }

                inlet = state.outlet();
            }

            result.push(time, &states);
        }

        self.annotate(&mut result, steps, evaluations);

        log::info!(
            "Cascade run finished: {} time points, {} function evaluations",
            result.len(),
            evaluations
        );

        Ok(result)
    }

    /// Run on a dedicated worker thread
    ///
    /// The complete result is handed back in one piece through
    /// [`SimulationHandle::join`].
    pub fn spawn(self) -> SimulationHandle
    where
        I: 'static,
    {
        let cancel_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel_flag);
        let handle = std::thread::spawn(move || self.run_with_cancel(&flag));

        SimulationHandle {
            cancel_flag,
            handle,
        }
    }

    fn annotate(&self, result: &mut CascadeResult, steps: usize, evaluations: usize) {
        result.add_metadata("model", self.model.name());
        result.add_metadata("solver", self.integrator.name());
        result.add_metadata("dt", &self.config.time_step.to_string());
        result.add_metadata("time steps", &steps.to_string());
        result.add_metadata("total time", &(steps as f64 * self.config.time_step).to_string());
        result.add_metadata("stages", &self.config.stages.to_string());
        result.add_metadata("function evaluations", &evaluations.to_string());
    }

    fn diverged(
        &self,
        stage: usize,
        step: usize,
        time: f64,
        reason: String,
        mut partial: CascadeResult,
        evaluations: usize,
    ) -> LeachError {
        log::warn!("Stage {stage} diverged at t = {time} (step {step}): {reason}");
        self.annotate(&mut partial, step - 1, evaluations);
        LeachError::NumericalDivergence {
            stage,
            step,
            time,
            reason,
            partial: Box::new(partial),
        }
    }
}

// =================================================================================================
// Simulation Handle
// =================================================================================================

/// Handle on a cascade running on a worker thread
pub struct SimulationHandle {
    cancel_flag: Arc<AtomicBool>,
    handle: JoinHandle<LeachResult<CascadeResult>>,
}

impl SimulationHandle {
    /// Ask the run to stop before its next time step
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::SeqCst)
    }

    /// Whether the worker has finished
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the run and take its result
    ///
    /// A panic on the worker thread is resumed on the caller.
    pub fn join(self) -> LeachResult<CascadeResult> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => std::panic::resume_unwind(payload),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Inlet, Species};
    use approx::assert_relative_eq;

    /// Liquor flushed by the inlet: dc/dt = c_in - c
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
            StageState::new(1.0, 0.01, 0.01, 0.0, 0.0)
        }

        fn name(&self) -> &str {
            "Washout"
        }
    }

    fn short_run() -> RunConfiguration {
        RunConfiguration::default().with_total_time(2.0).with_time_step(0.5)
    }

    #[test]
    fn test_time_axis_and_shape() {
        let simulator = CascadeSimulator::new(SimulationParameters::default(), short_run()).unwrap();
        let result = simulator.run().unwrap();

        assert_eq!(result.time_points, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(result.stage_count(), 3);
        assert_eq!(result.get_metadata("time steps").map(String::as_str), Some("4"));
        assert_eq!(result.get_metadata("function evaluations").map(String::as_str), Some("48"));
    }

    #[test]
    fn test_downstream_stage_sees_fresh_outlet() {
        let config = short_run().with_stages(2).with_feed(Inlet::new(1.0, 0.0));
        let simulator = CascadeSimulator::with_model(Box::new(Washout), config).unwrap();
        let result = simulator.run().unwrap();

        // One step of dc/dt = 1 - c from 0 with RK4
        let stage0 = rk4_washout(0.0, 1.0, 0.5);
        assert_relative_eq!(result.concentrations(0, Species::A)[1], stage0, epsilon = 1e-15);

        // Stage 1 is driven by the stage 0 value of the same step
        let stage1 = rk4_washout(0.0, stage0, 0.5);
        assert_relative_eq!(result.concentrations(1, Species::A)[1], stage1, epsilon = 1e-15);
    }

    fn rk4_washout(c: f64, inlet: f64, dt: f64) -> f64 {
        let f = |c: f64| inlet - c;
        let k1 = f(c);
        let k2 = f(c + dt / 2.0 * k1);
        let k3 = f(c + dt / 2.0 * k2);
        let k4 = f(c + dt * k3);
        c + dt / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }

    #[test]
    fn test_invalid_inputs_never_start() {
        let mut params = SimulationParameters::default();
        params.species_a.mass_fraction = 0.9;
        params.species_b.mass_fraction = 0.2;
        let error = CascadeSimulator::new(params, short_run()).err().unwrap();
        assert!(error.is_configuration());

        let error = CascadeSimulator::new(SimulationParameters::default(), short_run().with_stages(0))
            .err()
            .unwrap();
        assert!(error.is_configuration());

        let error = CascadeSimulator::new(SimulationParameters::default(), short_run().with_total_time(1e30))
            .err()
            .unwrap();
        assert!(error.is_configuration());
    }

    #[test]
    fn test_pre_cancelled_run_returns_initial_state() {
        let simulator = CascadeSimulator::new(SimulationParameters::default(), short_run()).unwrap();
        let error = simulator.run_with_cancel(&AtomicBool::new(true)).unwrap_err();

        match error {
            LeachError::Cancelled { step, partial, .. } => {
                assert_eq!(step, 0);
                assert_eq!(partial.len(), 1);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_spawn_hands_back_full_result() {
        let simulator = CascadeSimulator::new(SimulationParameters::default(), short_run()).unwrap();
        let handle = simulator.spawn();
        assert!(!handle.is_cancelled());
        let result = handle.join().unwrap();
        assert_eq!(result.len(), 5);
    }
}
