//! Error type for the simulation engine
//!
//! Everything that can be detected is rejected at the boundary (body
//! construction, `add_body`, time-scale changes). The only error raised
//! by stepping itself is a non-finite state after the step completes

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("body `{name}` has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass { name: String, mass: f64 },

    #[error("body `{name}` has invalid radius {radius} (must be finite and >= 0)")]
    InvalidRadius { name: String, radius: f64 },

    #[error("body `{name}` has a non-finite initial {field}")]
    NonFiniteInitialState { name: String, field: &'static str },

    #[error("invalid base time step {0} s (must be finite and > 0)")]
    InvalidTimeStep(f64),

    #[error("invalid gravitational constant {0} (must be finite and > 0)")]
    InvalidGravitationalConstant(f64),

    #[error("history length must be at least 1")]
    InvalidHistoryLength,

    #[error("speed input {0} is outside 0..=100")]
    SpeedInputOutOfRange(u32),

    #[error("invalid time scale {0} (must be finite and > 0)")]
    InvalidTimeScale(f64),

    #[error("bodies cannot be added once the simulation has started")]
    AlreadyStarted,

    #[error("state of body `{name}` became non-finite at step {step}")]
    NonFiniteState { name: String, step: u64 },
}
