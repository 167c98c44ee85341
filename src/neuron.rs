//! Leaky integrator neuron.
//!
//! Each neuron integrates a weighted input sum through an explicit Euler step
//! and pushes the result through the blended tanh/sine transfer function.
//! Output updates are two-phase: `compute_next` produces a pending value,
//! `commit` makes it visible. The network relies on that split to keep every
//! neuron in a tick reading the same snapshot of the previous tick.

use crate::params::transfer;
use ndarray::Array1;

/// A single leaky-integrator neuron with already-mapped physical parameters.
#[derive(Debug, Clone)]
pub struct LeakyIntegrator {
    // Fixed at construction, already mapped to physical ranges.
    gain: f64,
    bias: f64,
    time_constant: f64,
    sine_coefficient: f64,
    frequency_multiplier: f64,
    weights: Array1<f64>,

    // Host-adjustable integration step.
    time_step: f64,

    // Overwritten by the owning network before each compute phase.
    inputs: Array1<f64>,

    // Time-varying state.
    state: f64,
    pending: f64,
    output: f64,
}

impl LeakyIntegrator {
    /// Create a neuron. `weights` fixes the input count for its lifetime.
    pub fn new(
        weights: Array1<f64>,
        time_step: f64,
        time_constant: f64,
        gain: f64,
        bias: f64,
        sine_coefficient: f64,
        frequency_multiplier: f64,
    ) -> Self {
        let input_count = weights.len();
        Self {
            gain,
            bias,
            time_constant,
            sine_coefficient,
            frequency_multiplier,
            weights,
            time_step,
            inputs: Array1::zeros(input_count),
            state: 0.0,
            pending: 0.0,
            output: 0.0,
        }
    }

    #[inline]
    pub fn input_count(&self) -> usize {
        self.weights.len()
    }

    /// Write one input slot. The owning network controls all writes.
    #[inline]
    pub fn set_input(&mut self, index: usize, value: f64) {
        self.inputs[index] = value;
    }

    /// Compute phase: advance the membrane state by one Euler step and stage
    /// the new output. Does not touch the committed output.
    pub fn compute_next(&mut self) {
        let drive = self.weights.dot(&self.inputs) - self.state;
        self.state += drive / self.time_constant * self.time_step;
        self.pending = transfer(
            self.gain * (self.state - self.bias),
            self.sine_coefficient,
            self.frequency_multiplier,
        );
    }

    /// Commit phase: make the staged output visible.
    #[inline]
    pub fn commit(&mut self) {
        self.output = self.pending;
    }

    /// The committed output, as visible to the rest of the network.
    #[inline]
    pub fn output(&self) -> f64 {
        self.output
    }

    /// The membrane potential.
    #[inline]
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Zero all time-varying state. Parameters, weights, and the timestep
    /// are untouched.
    pub fn reset(&mut self) {
        self.state = 0.0;
        self.pending = 0.0;
        self.output = 0.0;
    }

    /// Takes effect on the next `compute_next`.
    #[inline]
    pub fn set_time_step(&mut self, dt: f64) {
        self.time_step = dt;
    }
}
