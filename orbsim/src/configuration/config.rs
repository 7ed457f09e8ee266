//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – speed control mapping, initial speed, tick cadence
//! - [`ParametersConfig`] – physical constant, base step and history settings
//! - [`BodyConfig`]       – initial state and display attributes for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every field with a default may be omitted:
//!
//! ```yaml
//! engine:
//!   time_scale_mapping: "piecewise"  # or "exponential"
//!   initial_speed: 10                # speed input 0..=100, omit for 1x
//!   tick_interval_ms: 16             # wall-clock time between ticks
//!
//! parameters:
//!   G: 6.67430e-11                   # gravitational constant
//!   dt_base: 3600.0                  # simulated seconds per tick at 1x
//!   history_len: 500                 # recent positions kept per body
//!   full_trace: true                 # keep the whole orbit as well
//!
//! bodies:
//!   - name: "Sol"
//!     m: 1.989e30                    # kg
//!     x: [0.0, 0.0, 0.0]             # m
//!     v: [0.0, 0.0, 0.0]             # m/s
//!     radius: 6.96e8                 # m
//!     color: [255, 255, 0]
//! ```
//!
//! Nothing is validated here; [`crate::Scenario::build`] rejects bad values
//! when mapping the configuration into a runtime engine.

use serde::Deserialize;

use crate::simulation::params::{DEFAULT_DT_BASE, G_SI};
use crate::simulation::states::{Rgb, DEFAULT_HISTORY_LEN};
use crate::simulation::time_scale::TimeScaleMapping;

/// Default wall-clock tick interval (~60 Hz)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// High-level engine configuration
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub time_scale_mapping: TimeScaleMapping, // speed input -> time scale curve
    #[serde(default)]
    pub initial_speed: Option<u32>, // speed input applied before the run, None = 1x
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64, // cadence of the external ticker
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_scale_mapping: TimeScaleMapping::default(),
            initial_speed: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ParametersConfig {
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default = "default_dt_base")]
    pub dt_base: f64, // time step size at 1x
    #[serde(default = "default_history_len")]
    pub history_len: usize, // bounded trail length
    #[serde(default = "default_full_trace")]
    pub full_trace: bool, // unbounded orbit trace on/off
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: G_SI,
            dt_base: DEFAULT_DT_BASE,
            history_len: DEFAULT_HISTORY_LEN,
            full_trace: true,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BodyConfig {
    pub name: String,
    pub m: f64,      // Mass of the body (kg)
    pub x: [f64; 3], // Initial position (m)
    pub v: [f64; 3], // Initial velocity (m/s)
    #[serde(default)]
    pub radius: f64, // Physical radius (m), only used for display
    #[serde(default = "default_color")]
    pub color: Rgb,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>, // Initial system, in index order
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}

fn default_g() -> f64 {
    G_SI
}

fn default_dt_base() -> f64 {
    DEFAULT_DT_BASE
}

fn default_history_len() -> usize {
    DEFAULT_HISTORY_LEN
}

fn default_full_trace() -> bool {
    true
}

fn default_color() -> Rgb {
    Rgb::WHITE
}
