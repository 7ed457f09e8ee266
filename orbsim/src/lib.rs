pub mod simulation;
pub mod configuration;
pub mod runner;
pub mod benchmark;

pub use simulation::states::{Body, NVec3, Rgb};
pub use simulation::error::SimError;
pub use simulation::params::Parameters;
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, pair_force};
pub use simulation::integrator::velocity_verlet;
pub use simulation::time_scale::TimeScaleMapping;
pub use simulation::engine::{Engine, RunState, StepReport};
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use runner::ticker::Ticker;

pub use benchmark::benchmark::{bench_gravity, bench_verlet};
