//! Build a ready-to-run simulation from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a `Scenario` holding
//! the runtime `Engine` (validated parameters, bodies in file order, initial
//! time scale) plus the tick cadence the external scheduler should use.

use std::time::Duration;

use log::info;

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::simulation::engine::Engine;
use crate::simulation::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

#[derive(Debug)]
pub struct Scenario {
    pub engine: Engine,
    pub tick_interval: Duration,
}

impl Scenario {
    /// Validate `cfg` and build the engine. Any invalid body, parameter or
    /// initial speed rejects the whole scenario.
    pub fn build(cfg: ScenarioConfig) -> Result<Self, SimError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            dt_base: p_cfg.dt_base,
            history_len: p_cfg.history_len,
            full_trace: p_cfg.full_trace,
        };

        let mut engine = Engine::new(parameters, cfg.engine.time_scale_mapping)?;

        // Bodies: map `BodyConfig` -> runtime `Body`, keeping file order
        for bc in &cfg.bodies {
            engine.add_body(body_from_config(bc)?)?;
        }

        if let Some(speed) = cfg.engine.initial_speed {
            engine.set_time_scale(speed)?;
        }

        info!(
            "scenario: {} bodies, {:?} mapping, {}x, dt = {} s",
            engine.bodies().len(),
            engine.mapping(),
            engine.time_scale(),
            engine.dt_effective()
        );

        Ok(Self {
            engine,
            tick_interval: Duration::from_millis(cfg.engine.tick_interval_ms),
        })
    }
}

fn body_from_config(bc: &BodyConfig) -> Result<Body, SimError> {
    Body::new(
        bc.m,
        NVec3::from(bc.x),
        NVec3::from(bc.v),
        bc.radius,
        bc.name.clone(),
        bc.color,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::config::{EngineConfig, ParametersConfig};
    use crate::simulation::states::Rgb;
    use crate::simulation::time_scale::TimeScaleMapping;

    fn body_cfg(name: &str, m: f64, x: [f64; 3]) -> BodyConfig {
        BodyConfig {
            name: name.into(),
            m,
            x,
            v: [0.0; 3],
            radius: 1.0,
            color: Rgb::WHITE,
        }
    }

    #[test]
    fn builds_engine_in_file_order() {
        let cfg = ScenarioConfig {
            engine: EngineConfig {
                time_scale_mapping: TimeScaleMapping::Piecewise,
                initial_speed: Some(30),
                tick_interval_ms: 20,
            },
            parameters: ParametersConfig::default(),
            bodies: vec![body_cfg("first", 1.0, [0.0; 3]), body_cfg("second", 2.0, [1.0, 0.0, 0.0])],
        };

        let scenario = Scenario::build(cfg).unwrap();
        let names: Vec<&str> = scenario.engine.bodies().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(scenario.engine.time_scale(), 100.0);
        assert_eq!(scenario.tick_interval, Duration::from_millis(20));
    }

    #[test]
    fn invalid_body_rejects_scenario() {
        let cfg = ScenarioConfig {
            engine: EngineConfig::default(),
            parameters: ParametersConfig::default(),
            bodies: vec![body_cfg("ok", 1.0, [0.0; 3]), body_cfg("ghost", 0.0, [1.0, 0.0, 0.0])],
        };
        let err = Scenario::build(cfg).unwrap_err();
        assert_eq!(err, SimError::InvalidMass { name: "ghost".into(), mass: 0.0 });
    }

    #[test]
    fn invalid_parameters_reject_scenario() {
        let cfg = ScenarioConfig {
            engine: EngineConfig::default(),
            parameters: ParametersConfig { dt_base: -1.0, ..Default::default() },
            bodies: vec![],
        };
        assert_eq!(Scenario::build(cfg).unwrap_err(), SimError::InvalidTimeStep(-1.0));
    }

    #[test]
    fn out_of_range_initial_speed_rejects_scenario() {
        let cfg = ScenarioConfig {
            engine: EngineConfig { initial_speed: Some(101), ..Default::default() },
            parameters: ParametersConfig::default(),
            bodies: vec![],
        };
        assert_eq!(Scenario::build(cfg).unwrap_err(), SimError::SpeedInputOutOfRange(101));
    }
}
