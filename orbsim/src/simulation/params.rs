//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant `G`,
//! - base step `dt_base` (simulated seconds per tick at 1x),
//! - history bound per body and whether full traces are kept

use super::error::SimError;
use super::states::DEFAULT_HISTORY_LEN;

/// CODATA 2018 gravitational constant (m^3 kg^-1 s^-2)
pub const G_SI: f64 = 6.67430e-11;

/// One hour of simulated time per tick at 1x
pub const DEFAULT_DT_BASE: f64 = 3600.0;

#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub dt_base: f64, // step size at time scale 1
    pub history_len: usize, // H_max
    pub full_trace: bool, // keep unbounded orbit traces
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G: G_SI,
            dt_base: DEFAULT_DT_BASE,
            history_len: DEFAULT_HISTORY_LEN,
            full_trace: true,
        }
    }
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.G.is_finite() || self.G <= 0.0 {
            return Err(SimError::InvalidGravitationalConstant(self.G));
        }
        if !self.dt_base.is_finite() || self.dt_base <= 0.0 {
            return Err(SimError::InvalidTimeStep(self.dt_base));
        }
        if self.history_len == 0 {
            return Err(SimError::InvalidHistoryLength);
        }
        Ok(())
    }
}
