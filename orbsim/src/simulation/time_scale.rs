//! Mapping from a normalized speed control (0..=100) to a time scale
//!
//! A scenario picks one mapping and keeps it; the two curves give different
//! scales for the same input and are not interchangeable.

use serde::Deserialize;

use super::error::SimError;

/// Largest accepted speed input
pub const MAX_SPEED_INPUT: u32 = 100;

/// Speed-input anchors for the piecewise mapping: (input, time scale)
pub const PIECEWISE_ANCHORS: [(u32, f64); 6] = [
    (0, 0.1),
    (10, 1.0),
    (30, 100.0),
    (60, 5_000.0),
    (85, 50_000.0),
    (100, 500_000.0),
];

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeScaleMapping {
    /// `10^((input/100)*6 - 1)`: 0.1x at 0 up to 1e5x at 100
    #[serde(rename = "exponential")]
    Exponential,

    /// Linear segments between [`PIECEWISE_ANCHORS`], 0.1x up to 5e5x.
    /// More resolution in the low range where inner planets are watchable
    #[default]
    #[serde(rename = "piecewise")]
    Piecewise,
}

impl TimeScaleMapping {
    /// Map a speed input in `0..=100` to a strictly positive time scale
    pub fn scale_for(self, input: u32) -> Result<f64, SimError> {
        if input > MAX_SPEED_INPUT {
            return Err(SimError::SpeedInputOutOfRange(input));
        }

        let scale = match self {
            TimeScaleMapping::Exponential => exponential(input),
            TimeScaleMapping::Piecewise => piecewise(input),
        };

        validate_scale(scale)
    }
}

/// Reject zero, negative and non-finite scales
pub fn validate_scale(scale: f64) -> Result<f64, SimError> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(SimError::InvalidTimeScale(scale))
    }
}

fn exponential(input: u32) -> f64 {
    if input == 0 {
        return 0.1;
    }
    let power = (input as f64 / 100.0) * 6.0 - 1.0;
    10f64.powf(power)
}

fn piecewise(input: u32) -> f64 {
    for w in PIECEWISE_ANCHORS.windows(2) {
        let (x0, s0) = w[0];
        let (x1, s1) = w[1];
        // the last segment is closed on the right so 100 lands in it
        if input < x1 || x1 == MAX_SPEED_INPUT {
            let t = (input - x0) as f64 / (x1 - x0) as f64;
            return s0 + t * (s1 - s0);
        }
    }
    PIECEWISE_ANCHORS[PIECEWISE_ANCHORS.len() - 1].1
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn exponential_boundaries() {
        let m = TimeScaleMapping::Exponential;
        assert_eq!(m.scale_for(0).unwrap(), 0.1);
        assert_relative_eq!(m.scale_for(50).unwrap(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(m.scale_for(100).unwrap(), 1.0e5, max_relative = 1e-12);
    }

    #[test]
    fn piecewise_hits_every_anchor() {
        let m = TimeScaleMapping::Piecewise;
        for (input, expected) in PIECEWISE_ANCHORS {
            assert_eq!(m.scale_for(input).unwrap(), expected, "input {input}");
        }
    }

    #[test]
    fn piecewise_interpolates_linearly() {
        let m = TimeScaleMapping::Piecewise;
        assert_relative_eq!(m.scale_for(5).unwrap(), 0.55, max_relative = 1e-12);
        assert_relative_eq!(m.scale_for(20).unwrap(), 50.5, max_relative = 1e-12);
        assert_relative_eq!(m.scale_for(45).unwrap(), 2550.0, max_relative = 1e-12);
    }

    #[test]
    fn both_mappings_are_monotonic_and_positive() {
        for m in [TimeScaleMapping::Exponential, TimeScaleMapping::Piecewise] {
            let mut prev = 0.0;
            for input in 0..=MAX_SPEED_INPUT {
                let s = m.scale_for(input).unwrap();
                assert!(s > prev, "{m:?} not increasing at {input}");
                prev = s;
            }
        }
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        assert_eq!(
            TimeScaleMapping::Piecewise.scale_for(101),
            Err(SimError::SpeedInputOutOfRange(101))
        );
    }

    #[test]
    fn validate_scale_rejects_non_positive() {
        assert!(validate_scale(0.0).is_err());
        assert!(validate_scale(-2.0).is_err());
        assert!(validate_scale(f64::NAN).is_err());
        assert_eq!(validate_scale(3.0), Ok(3.0));
    }
}
