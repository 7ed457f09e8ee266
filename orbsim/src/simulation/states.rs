//! Core state types for the N-body simulation.
//!
//! - `NVec3`: 3d vector in SI units (nalgebra, `Copy`, no aliasing)
//! - `Rgb`: display colour, carried for the renderer only
//! - `Body`: point mass with position/velocity and its motion history
//!
//! The engine owns all bodies; position and velocity are only written by
//! the integrator.

use std::collections::VecDeque;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::error::SimError;

pub type NVec3 = Vector3<f64>;

/// Default number of recent positions kept per body
pub const DEFAULT_HISTORY_LEN: usize = 500;

/// 8-bit RGB display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

#[derive(Debug, Clone)]
pub struct Body {
    mass: f64,        // kg, fixed after construction
    x: NVec3,         // position (m)
    v: NVec3,         // velocity (m/s)
    radius: f64,      // physical radius (m), display only
    name: String,
    color: Rgb,
    history: VecDeque<NVec3>, // recent positions, oldest first
    history_len: usize,       // H_max
    trace: Option<Vec<NVec3>>, // full orbit trace, unbounded
}

impl Body {
    /// Create a body and seed its history (and full trace) with `position`.
    ///
    /// Rejects non-positive or non-finite mass, negative radius and
    /// non-finite position/velocity so NaN never reaches the force sums.
    pub fn new(
        mass: f64,
        position: NVec3,
        velocity: NVec3,
        radius: f64,
        name: impl Into<String>,
        color: Rgb,
    ) -> Result<Self, SimError> {
        let name = name.into();

        if !mass.is_finite() || mass <= 0.0 {
            return Err(SimError::InvalidMass { name, mass });
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SimError::InvalidRadius { name, radius });
        }
        if !is_finite(&position) {
            return Err(SimError::NonFiniteInitialState { name, field: "position" });
        }
        if !is_finite(&velocity) {
            return Err(SimError::NonFiniteInitialState { name, field: "velocity" });
        }

        let mut body = Self {
            mass,
            x: position,
            v: velocity,
            radius,
            name,
            color,
            history: VecDeque::with_capacity(DEFAULT_HISTORY_LEN),
            history_len: DEFAULT_HISTORY_LEN,
            trace: Some(Vec::new()),
        };
        body.record_position(position);
        Ok(body)
    }

    /// Change the history bound `H_max`, dropping the oldest entries if the
    /// current history is longer than the new bound
    pub fn with_history_len(mut self, history_len: usize) -> Result<Self, SimError> {
        if history_len == 0 {
            return Err(SimError::InvalidHistoryLength);
        }
        self.history_len = history_len;
        while self.history.len() > history_len {
            self.history.pop_front();
        }
        Ok(self)
    }

    /// Turn the unbounded full-orbit trace on or off.
    /// Switching it on starts a fresh trace at the current position.
    pub fn with_full_trace(mut self, enabled: bool) -> Self {
        self.trace = match (enabled, self.trace.take()) {
            (true, Some(trace)) => Some(trace),
            (true, None) => Some(vec![self.x]),
            (false, _) => None,
        };
        self
    }

    /// Append `p` to the bounded history (evicting the oldest entry past
    /// `H_max`) and to the full trace when enabled
    pub fn record_position(&mut self, p: NVec3) {
        self.history.push_back(p);
        if self.history.len() > self.history_len {
            self.history.pop_front();
        }

        if let Some(trace) = self.trace.as_mut() {
            trace.push(p);
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn position(&self) -> NVec3 {
        self.x
    }

    pub fn velocity(&self) -> NVec3 {
        self.v
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Recent positions, oldest first
    pub fn history(&self) -> &VecDeque<NVec3> {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history_len
    }

    /// Full orbit trace since creation, if enabled
    pub fn full_trace(&self) -> Option<&[NVec3]> {
        self.trace.as_deref()
    }

    pub fn momentum(&self) -> NVec3 {
        self.mass * self.v
    }

    pub(crate) fn set_position(&mut self, x: NVec3) {
        self.x = x;
    }

    pub(crate) fn set_velocity(&mut self, v: NVec3) {
        self.v = v;
    }

    pub(crate) fn has_finite_state(&self) -> bool {
        is_finite(&self.x) && is_finite(&self.v)
    }
}

fn is_finite(v: &NVec3) -> bool {
    v.iter().all(|c| c.is_finite())
}
