//! Simulation engine: body collection, lifecycle and time-scale control
//!
//! The engine knows nothing about wall-clock time. An external scheduler
//! (see [`crate::Ticker`]) calls [`Engine::tick`] at its own cadence;
//! each tick while running advances one step of `dt_base * time_scale`.

use std::fmt;

use log::{debug, info, warn};

use super::error::SimError;
use super::forces::{AccelSet, NewtonianGravity};
use super::integrator::velocity_verlet;
use super::params::Parameters;
use super::states::Body;
use super::time_scale::{validate_scale, TimeScaleMapping};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// Passed to step observers once per completed step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub step: u64, // 1-based index of the step just taken
    pub sim_time: f64, // simulated seconds since the first step
    pub dt: f64, // effective step used
}

type StepObserver = Box<dyn FnMut(&StepReport)>;

pub struct Engine {
    bodies: Vec<Body>,
    params: Parameters,
    forces: AccelSet,
    mapping: TimeScaleMapping,
    time_scale: f64,
    speed_input: Option<u32>,
    state: RunState,
    started: bool, // set on the first start/play or step
    steps: u64,
    sim_time: f64,
    observers: Vec<StepObserver>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("bodies", &self.bodies.len())
            .field("params", &self.params)
            .field("mapping", &self.mapping)
            .field("time_scale", &self.time_scale)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .field("sim_time", &self.sim_time)
            .finish()
    }
}

impl Engine {
    /// Build an empty, stopped engine with direct Newtonian gravity and a
    /// time scale of 1
    pub fn new(params: Parameters, mapping: TimeScaleMapping) -> Result<Self, SimError> {
        params.validate()?;
        let forces = AccelSet::new().with(NewtonianGravity { G: params.G });

        Ok(Self {
            bodies: Vec::new(),
            params,
            forces,
            mapping,
            time_scale: 1.0,
            speed_input: None,
            state: RunState::Stopped,
            started: false,
            steps: 0,
            sim_time: 0.0,
            observers: Vec::new(),
        })
    }

    /// Append a body and return its index.
    ///
    /// The engine's history settings are applied to the body. Only allowed
    /// before the simulation first runs.
    pub fn add_body(&mut self, body: Body) -> Result<usize, SimError> {
        if self.started {
            return Err(SimError::AlreadyStarted);
        }
        let body = body
            .with_history_len(self.params.history_len)?
            .with_full_trace(self.params.full_trace);

        debug!("adding body `{}` (m = {:e} kg)", body.name(), body.mass());
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    /// Ordered read-only view of all bodies
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    // lifecycle ==============================================================================

    pub fn start(&mut self) {
        self.transition(RunState::Running, "start");
    }

    pub fn stop(&mut self) {
        self.transition(RunState::Stopped, "stop");
    }

    pub fn play(&mut self) {
        self.transition(RunState::Running, "play");
    }

    pub fn pause(&mut self) {
        self.transition(RunState::Paused, "pause");
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    fn transition(&mut self, to: RunState, op: &str) {
        if to == RunState::Running {
            self.started = true;
        }
        if self.state != to {
            info!("{op}: {:?} -> {:?}", self.state, to);
            self.state = to;
        }
    }

    // time scale =============================================================================

    /// Set the time scale from a speed input in `0..=100` using this
    /// engine's mapping. Returns the new scale.
    pub fn set_time_scale(&mut self, input: u32) -> Result<f64, SimError> {
        let scale = self.mapping.scale_for(input)?;
        self.time_scale = scale;
        self.speed_input = Some(input);
        debug!("speed {input} -> time scale {scale}x (dt = {} s)", self.dt_effective());
        Ok(scale)
    }

    /// Set the time scale directly, bypassing the speed mapping
    pub fn set_time_scale_factor(&mut self, scale: f64) -> Result<(), SimError> {
        self.time_scale = validate_scale(scale)?;
        self.speed_input = None;
        debug!("time scale set to {scale}x");
        Ok(())
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Last speed input applied, if the scale came from the mapping
    pub fn speed_input(&self) -> Option<u32> {
        self.speed_input
    }

    pub fn mapping(&self) -> TimeScaleMapping {
        self.mapping
    }

    /// Simulated seconds advanced by one step
    pub fn dt_effective(&self) -> f64 {
        self.params.dt_base * self.time_scale
    }

    // stepping ===============================================================================

    /// Register a callback fired once after every completed step
    pub fn on_step(&mut self, observer: impl FnMut(&StepReport) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Scheduler entry point: steps once if running.
    /// Returns whether a step was taken.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        if !self.is_running() {
            return Ok(false);
        }
        self.step()?;
        Ok(true)
    }

    /// Advance all bodies by one effective step regardless of run state.
    ///
    /// If any body ends up with a non-finite position or velocity the engine
    /// is paused, observers are not notified and the error names the body.
    pub fn step(&mut self) -> Result<StepReport, SimError> {
        self.started = true;
        let dt = self.dt_effective();

        velocity_verlet(&mut self.bodies, &self.forces, dt);
        self.steps += 1;
        self.sim_time += dt;

        if let Some(bad) = self.bodies.iter().find(|b| !b.has_finite_state()) {
            let err = SimError::NonFiniteState {
                name: bad.name().to_string(),
                step: self.steps,
            };
            warn!("{err}; pausing");
            self.state = RunState::Paused;
            return Err(err);
        }

        let report = StepReport {
            step: self.steps,
            sim_time: self.sim_time,
            dt,
        };
        for observer in self.observers.iter_mut() {
            observer(&report);
        }
        Ok(report)
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Simulated seconds elapsed
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{NVec3, Rgb};
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine() -> Engine {
        Engine::new(Parameters::default(), TimeScaleMapping::Piecewise).unwrap()
    }

    fn rock(name: &str, x: f64) -> Body {
        Body::new(1.0e20, NVec3::new(x, 0.0, 0.0), NVec3::zeros(), 1.0, name, Rgb::WHITE).unwrap()
    }

    #[test]
    fn lifecycle_transitions() {
        let mut e = engine();
        assert_eq!(e.state(), RunState::Stopped);
        e.start();
        assert_eq!(e.state(), RunState::Running);
        e.pause();
        assert_eq!(e.state(), RunState::Paused);
        e.play();
        assert!(e.is_running());
        e.stop();
        assert_eq!(e.state(), RunState::Stopped);
    }

    #[test]
    fn tick_only_steps_while_running() {
        let mut e = engine();
        e.add_body(rock("a", 0.0)).unwrap();
        e.add_body(rock("b", 1.0e9)).unwrap();

        assert!(!e.tick().unwrap());
        assert_eq!(e.step_count(), 0);

        e.start();
        assert!(e.tick().unwrap());
        e.pause();
        assert!(!e.tick().unwrap());
        assert_eq!(e.step_count(), 1);
    }

    #[test]
    fn add_body_rejected_after_start() {
        let mut e = engine();
        assert_eq!(e.add_body(rock("a", 0.0)).unwrap(), 0);
        assert_eq!(e.add_body(rock("b", 1.0)).unwrap(), 1);
        e.start();
        e.stop();
        assert_eq!(e.add_body(rock("c", 2.0)), Err(SimError::AlreadyStarted));
        assert_eq!(e.bodies().len(), 2);
    }

    #[test]
    fn add_body_rejected_after_manual_step() {
        let mut e = engine();
        e.add_body(rock("a", 0.0)).unwrap();
        e.step().unwrap();
        assert_eq!(e.add_body(rock("b", 1.0)), Err(SimError::AlreadyStarted));
    }

    #[test]
    fn observers_fire_once_per_step() {
        let mut e = engine();
        e.add_body(rock("a", 0.0)).unwrap();
        e.add_body(rock("b", 1.0e9)).unwrap();

        let count = Rc::new(Cell::new(0u64));
        let seen = count.clone();
        e.on_step(move |r| {
            seen.set(seen.get() + 1);
            assert_eq!(r.step, seen.get());
        });

        for _ in 0..3 {
            e.step().unwrap();
        }
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn time_scale_sets_effective_step() {
        let mut e = engine();
        assert_eq!(e.dt_effective(), 3600.0);
        assert_eq!(e.set_time_scale(10).unwrap(), 1.0);
        assert_eq!(e.speed_input(), Some(10));
        assert_eq!(e.set_time_scale(30).unwrap(), 100.0);
        assert_eq!(e.dt_effective(), 360_000.0);

        let report = {
            e.add_body(rock("a", 0.0)).unwrap();
            e.step().unwrap()
        };
        assert_eq!(report.dt, 360_000.0);
        assert_eq!(e.sim_time(), 360_000.0);
    }

    #[test]
    fn bad_time_scale_keeps_previous_value() {
        let mut e = engine();
        e.set_time_scale_factor(2.0).unwrap();
        assert!(e.set_time_scale(200).is_err());
        assert!(e.set_time_scale_factor(0.0).is_err());
        assert!(e.set_time_scale_factor(-1.0).is_err());
        assert_eq!(e.time_scale(), 2.0);
    }

    #[test]
    fn engine_applies_history_settings() {
        let params = Parameters { history_len: 4, full_trace: false, ..Default::default() };
        let mut e = Engine::new(params, TimeScaleMapping::Exponential).unwrap();
        e.add_body(rock("a", 0.0)).unwrap();
        assert_eq!(e.bodies()[0].history_len(), 4);
        assert!(e.bodies()[0].full_trace().is_none());
    }

    #[test]
    fn non_finite_state_pauses_and_reports() {
        // Overflowing masses drive the velocity to infinity in one step
        let mut e = engine();
        e.add_body(Body::new(f64::MAX, NVec3::zeros(), NVec3::zeros(), 0.0, "heavy", Rgb::WHITE).unwrap())
            .unwrap();
        e.add_body(Body::new(f64::MAX, NVec3::new(1.0, 0.0, 0.0), NVec3::zeros(), 0.0, "heavier", Rgb::WHITE).unwrap())
            .unwrap();

        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        e.on_step(move |_| flag.set(true));

        e.start();
        let err = e.tick().unwrap_err();
        assert!(matches!(err, SimError::NonFiniteState { step: 1, .. }));
        assert_eq!(e.state(), RunState::Paused);
        assert!(!fired.get());
    }
}
