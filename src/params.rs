//! Parameter mapping from normalized genome values to physical ranges.
//!
//! Genomes store every parameter as a nominal [0,1] scalar; the range table
//! here rescales them into physically meaningful units at construction time.
//! Values outside [0,1] extrapolate linearly on purpose: evolutionary search
//! hosts exploit the headroom, so no clamping is performed.

use crate::error::CtrnnError;
use serde::{Deserialize, Serialize};

/// A linear map from [0,1] onto [min, max].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Rescale a normalized value into this range. No clamping.
    #[inline]
    pub fn map(&self, normalized: f64) -> f64 {
        normalized * (self.max - self.min) + self.min
    }
}

/// The full range table for one network.
///
/// Passed explicitly to construction rather than living in a global, so
/// networks with different range tables can coexist in one process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRanges {
    pub gain: ParamRange,
    pub bias: ParamRange,
    pub weight: ParamRange,
    pub time_constant: ParamRange,
    pub sine_coefficient: ParamRange,
    pub frequency_multiplier: ParamRange,
}

impl Default for ParamRanges {
    fn default() -> Self {
        Self {
            gain: ParamRange::new(0.0, 3.0),
            bias: ParamRange::new(-4.0, 4.0),
            weight: ParamRange::new(-10.0, 10.0),
            time_constant: ParamRange::new(0.1, 3.0),
            sine_coefficient: ParamRange::new(0.0, 1.0),
            frequency_multiplier: ParamRange::new(0.0, 10.0),
        }
    }
}

impl ParamRanges {
    /// Check that every pair satisfies `max >= min`.
    pub fn validate(&self) -> Result<(), CtrnnError> {
        let pairs = [
            ("gain", self.gain),
            ("bias", self.bias),
            ("weight", self.weight),
            ("time_constant", self.time_constant),
            ("sine_coefficient", self.sine_coefficient),
            ("frequency_multiplier", self.frequency_multiplier),
        ];
        for (name, range) in pairs {
            if range.max < range.min {
                return Err(CtrnnError::InvalidRange {
                    parameter: name,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn map_gain(&self, normalized: f64) -> f64 {
        self.gain.map(normalized)
    }

    #[inline]
    pub fn map_bias(&self, normalized: f64) -> f64 {
        self.bias.map(normalized)
    }

    #[inline]
    pub fn map_weight(&self, normalized: f64) -> f64 {
        self.weight.map(normalized)
    }

    #[inline]
    pub fn map_time_constant(&self, normalized: f64) -> f64 {
        self.time_constant.map(normalized)
    }

    #[inline]
    pub fn map_sine_coefficient(&self, normalized: f64) -> f64 {
        self.sine_coefficient.map(normalized)
    }

    #[inline]
    pub fn map_frequency_multiplier(&self, normalized: f64) -> f64 {
        self.frequency_multiplier.map(normalized)
    }
}

/// Blended tanh/sine transfer function.
///
/// A sine coefficient of 0 gives a pure sigmoid, 1 gives a pure oscillator,
/// values in between blend both. Extreme activations may saturate; whatever
/// the underlying `tanh`/`sin` return is propagated as-is.
#[inline]
pub fn transfer(activation: f64, sine_coefficient: f64, frequency_multiplier: f64) -> f64 {
    (1.0 - sine_coefficient) * activation.tanh()
        + sine_coefficient * (frequency_multiplier * activation).sin()
}
