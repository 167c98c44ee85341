//! CTRNN topology and the synchronous two-phase update.
//!
//! The network owns one layer of input neurons (one external input slot each)
//! and one fully recurrent layer of hidden neurons: every hidden neuron is
//! fed every input neuron's output and every hidden neuron's output,
//! including its own.

use crate::config::{CtrnnConfig, NodeConfig};
use crate::error::CtrnnError;
use crate::neuron::LeakyIntegrator;
use crate::params::ParamRanges;
use ndarray::Array1;

/// A continuous-time recurrent neural network, configured from a genome.
///
/// Drive it once per control tick: `feed_inputs`, `step`, `read_outputs`.
/// Single-threaded by design; independent instances share nothing.
#[derive(Debug, Clone)]
pub struct Ctrnn {
    input_nodes: Vec<LeakyIntegrator>,
    hidden_nodes: Vec<LeakyIntegrator>,
    // Committed-output snapshot reused every tick.
    snapshot: Vec<f64>,
}

impl Ctrnn {
    /// Build a network from a genome, mapping every normalized field through
    /// the config's parameter ranges. Fails fast on a malformed genome; no
    /// instance is produced on error.
    pub fn new(time_step: f64, config: &CtrnnConfig) -> Result<Self, CtrnnError> {
        config.validate()?;
        let ranges = config.ranges;

        let input_nodes = config
            .input_nodes
            .iter()
            .map(|node| build_neuron(node, &ranges, time_step))
            .collect::<Vec<_>>();

        let hidden_nodes = config
            .hidden_nodes
            .iter()
            .map(|node| build_neuron(node, &ranges, time_step))
            .collect::<Vec<_>>();

        let num_nodes = input_nodes.len() + hidden_nodes.len();
        Ok(Self {
            input_nodes,
            hidden_nodes,
            snapshot: vec![0.0; num_nodes],
        })
    }

    #[inline]
    pub fn num_input_nodes(&self) -> usize {
        self.input_nodes.len()
    }

    #[inline]
    pub fn num_hidden_nodes(&self) -> usize {
        self.hidden_nodes.len()
    }

    /// Write the external input values, one per input node. The arity must
    /// match exactly; nothing is truncated or padded.
    pub fn feed_inputs(&mut self, values: &[f64]) -> Result<(), CtrnnError> {
        if values.len() != self.input_nodes.len() {
            return Err(CtrnnError::InputArityMismatch {
                expected: self.input_nodes.len(),
                actual: values.len(),
            });
        }
        for (node, &value) in self.input_nodes.iter_mut().zip(values) {
            node.set_input(0, value);
        }
        Ok(())
    }

    /// Advance the whole network by one timestep.
    ///
    /// Every neuron evolves from the same snapshot of committed outputs from
    /// the previous tick, so the result is independent of iteration order.
    /// Compute and commit must stay separate phases; fusing them would let a
    /// hidden neuron read a sibling's mid-tick output.
    pub fn step(&mut self) {
        let num_inputs = self.input_nodes.len();

        // Phase 1: integrate input nodes against the just-fed external values.
        for node in &mut self.input_nodes {
            node.compute_next();
        }

        // Phase 2: hidden nodes read the previous tick's committed outputs.
        for (i, node) in self.input_nodes.iter().enumerate() {
            self.snapshot[i] = node.output();
        }
        for (i, node) in self.hidden_nodes.iter().enumerate() {
            self.snapshot[num_inputs + i] = node.output();
        }
        for node in &mut self.hidden_nodes {
            for (slot, &value) in self.snapshot.iter().enumerate() {
                node.set_input(slot, value);
            }
            node.compute_next();
        }

        // Phases 3 and 4: make this tick's outputs visible.
        for node in &mut self.input_nodes {
            node.commit();
        }
        for node in &mut self.hidden_nodes {
            node.commit();
        }
    }

    /// Read the committed outputs of the first `n` hidden nodes.
    ///
    /// Positions past the hidden-node count are zero-filled rather than an
    /// error; hosts rely on the padding, so it is kept as-is.
    pub fn read_outputs(&self, n: usize) -> Vec<f64> {
        let mut outputs = vec![0.0; n];
        for (out, node) in outputs.iter_mut().zip(&self.hidden_nodes) {
            *out = node.output();
        }
        outputs
    }

    /// Return every neuron's time-varying state to zero. Weights, topology,
    /// and mapped parameters are untouched.
    pub fn reset(&mut self) {
        for node in &mut self.input_nodes {
            node.reset();
        }
        for node in &mut self.hidden_nodes {
            node.reset();
        }
    }

    /// Propagate a new timestep to every neuron; effective from the next
    /// `step`.
    pub fn set_time_step(&mut self, dt: f64) {
        for node in &mut self.input_nodes {
            node.set_time_step(dt);
        }
        for node in &mut self.hidden_nodes {
            node.set_time_step(dt);
        }
    }

    #[cfg(test)]
    pub(crate) fn input_node(&self, index: usize) -> &LeakyIntegrator {
        &self.input_nodes[index]
    }
}

fn build_neuron(node: &NodeConfig, ranges: &ParamRanges, time_step: f64) -> LeakyIntegrator {
    let weights = Array1::from_iter(node.weights.iter().map(|&w| ranges.map_weight(w)));
    LeakyIntegrator::new(
        weights,
        time_step,
        ranges.map_time_constant(node.t),
        ranges.map_gain(node.gain),
        ranges.map_bias(node.bias),
        ranges.map_sine_coefficient(node.sine_coefficient),
        ranges.map_frequency_multiplier(node.frequency_multiplier),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CtrnnConfig;
    use crate::params::transfer;

    fn uniform_config(inputs: usize, hidden: usize, value: f64) -> CtrnnConfig {
        CtrnnConfig::uniform(inputs, hidden, value)
    }

    #[test]
    fn test_topology_dimensions() {
        let config = uniform_config(2, 1, 0.5);
        assert_eq!(config.input_nodes[0].weights.len(), 1);
        // One hidden node sees both inputs plus itself.
        assert_eq!(config.hidden_nodes[0].weights.len(), 3);

        let net = Ctrnn::new(0.01, &config).unwrap();
        assert_eq!(net.num_input_nodes(), 2);
        assert_eq!(net.num_hidden_nodes(), 1);
    }

    #[test]
    fn test_hidden_input_slot_order() {
        // Wire a 2+1 net where the hidden node's weights pick out exactly one
        // slot at a time; the surviving signal identifies the slot order as
        // [input0, input1, hidden0].
        let mut config = uniform_config(2, 1, 0.5);
        // weight 0.55 maps to +1.0, 0.5 maps to 0.0 under the default ranges
        config.input_nodes[0].weights[0] = 0.55;
        config.input_nodes[1].weights[0] = 0.55;
        config.hidden_nodes[0].weights = vec![0.55, 0.5, 0.5];
        // pure tanh, unit-ish dynamics, zero bias
        for node in config
            .input_nodes
            .iter_mut()
            .chain(config.hidden_nodes.iter_mut())
        {
            node.sine_coefficient = 0.0;
            node.bias = 0.5;
        }

        let mut net = Ctrnn::new(0.01, &config).unwrap();
        // Excite only input 1: with the hidden weight on slot 0, nothing
        // should reach the hidden state.
        net.feed_inputs(&[0.0, 1.0]).unwrap();
        for _ in 0..10 {
            net.step();
        }
        let silent = net.read_outputs(1)[0];
        assert_eq!(silent, 0.0);

        // Excite input 0 instead: the hidden node now responds.
        net.reset();
        net.feed_inputs(&[1.0, 0.0]).unwrap();
        for _ in 0..10 {
            net.step();
        }
        assert!(net.read_outputs(1)[0] != 0.0);
    }

    #[test]
    fn test_first_step_scenario() {
        // 2 inputs, 2 hidden, every normalized parameter and weight at 0.5,
        // dt = 0.01. Mapped under default ranges: gain 1.5, bias 0.0,
        // weight 0.0, tc 1.55, sine 0.5, freq 5.0.
        let config = uniform_config(2, 2, 0.5);
        let mut net = Ctrnn::new(0.01, &config).unwrap();
        net.feed_inputs(&[1.0, 0.0]).unwrap();
        net.step();

        // Input-node state moved by (mapped_weight * input) / tc * dt.
        let mapped_weight = 0.0;
        let expected_state = mapped_weight * 1.0 / 1.55 * 0.01;
        assert!((net.input_node(0).state() - expected_state).abs() < 1e-15);

        // Hidden nodes saw the all-zero committed snapshot, so their state
        // stayed 0 and their output is the closed-form transfer of the bias
        // term alone, independent of any weight.
        let expected_hidden = transfer(1.5 * (0.0 - 0.0), 0.5, 5.0);
        for out in net.read_outputs(2) {
            assert_eq!(out, expected_hidden);
        }
    }

    #[test]
    fn test_first_step_hidden_independent_of_weights() {
        // Same snapshot invariant with non-degenerate weights: whatever the
        // weights, the first tick's hidden outputs only reflect gain and bias
        // because all prior committed outputs are zero.
        let mut config = uniform_config(2, 2, 0.5);
        config.hidden_nodes[0].weights = vec![0.9, 0.1, 0.8, 0.2];
        config.hidden_nodes[1].weights = vec![0.3, 0.7, 0.4, 0.6];
        let mut net = Ctrnn::new(0.01, &config).unwrap();
        net.feed_inputs(&[1.0, -1.0]).unwrap();
        net.step();

        let expected = transfer(1.5 * (0.0 - 0.0), 0.5, 5.0);
        let outputs = net.read_outputs(2);
        assert_eq!(outputs[0], expected);
        assert_eq!(outputs[1], expected);
    }

    #[test]
    fn test_second_step_sees_committed_inputs() {
        // With nonzero mapped weights the hidden layer reacts one tick after
        // the input layer commits.
        let mut config = uniform_config(1, 1, 0.5);
        config.input_nodes[0].weights[0] = 0.75; // maps to +5.0
        config.hidden_nodes[0].weights = vec![0.75, 0.5]; // input slot live, self slot 0
        let mut net = Ctrnn::new(0.01, &config).unwrap();

        net.feed_inputs(&[1.0]).unwrap();
        net.step();
        let after_first = net.read_outputs(1)[0];
        assert_eq!(after_first, transfer(0.0, 0.5, 5.0));

        net.feed_inputs(&[1.0]).unwrap();
        net.step();
        let ranges = crate::params::ParamRanges::default();
        let tc = ranges.map_time_constant(0.5);
        // Input node's tick-1 output: one Euler step of the +5.0 weight,
        // through the transfer with gain 1.5.
        let input_state_1 = 5.0 / tc * 0.01;
        let input_out_1 = transfer(1.5 * input_state_1, 0.5, 5.0);
        // Hidden tick 2: drive = 5.0 * input_out_1 - 0
        let hidden_state_2 = 5.0 * input_out_1 / tc * 0.01;
        let expected = transfer(1.5 * hidden_state_2, 0.5, 5.0);
        assert!((net.read_outputs(1)[0] - expected).abs() < 1e-15);
    }

    #[test]
    fn test_read_outputs_zero_pads_past_capacity() {
        let mut config = uniform_config(2, 2, 0.5);
        for node in &mut config.hidden_nodes {
            node.bias = 0.25; // mapped bias -2, nonzero outputs from tick 1
        }
        let mut net = Ctrnn::new(0.01, &config).unwrap();
        net.feed_inputs(&[1.0, 0.0]).unwrap();
        net.step();

        let outputs = net.read_outputs(5);
        assert_eq!(outputs.len(), 5);
        let committed = net.read_outputs(2);
        assert!(committed[0] != 0.0);
        assert_eq!(&outputs[..2], &committed[..]);
        assert_eq!(&outputs[2..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_feed_inputs_arity_checked() {
        let config = uniform_config(2, 2, 0.5);
        let mut net = Ctrnn::new(0.01, &config).unwrap();
        assert!(matches!(
            net.feed_inputs(&[1.0]),
            Err(CtrnnError::InputArityMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            net.feed_inputs(&[1.0, 2.0, 3.0]),
            Err(CtrnnError::InputArityMismatch { .. })
        ));
        assert!(net.feed_inputs(&[1.0, 2.0]).is_ok());
    }

    #[test]
    fn test_reset_idempotent_and_zeroing() {
        let mut config = uniform_config(2, 3, 0.6);
        config.hidden_nodes[1].bias = 0.1;
        let mut net = Ctrnn::new(0.05, &config).unwrap();
        net.feed_inputs(&[1.0, -0.5]).unwrap();
        for _ in 0..20 {
            net.step();
        }
        assert!(net.read_outputs(3).iter().any(|&o| o != 0.0));

        net.reset();
        assert_eq!(net.read_outputs(3), vec![0.0; 3]);
        net.reset();
        assert_eq!(net.read_outputs(3), vec![0.0; 3]);
        assert_eq!(net.read_outputs(1), vec![0.0]);
    }

    #[test]
    fn test_determinism_across_instances() {
        let config = uniform_config(3, 4, 0.37);
        let mut a = Ctrnn::new(0.01, &config).unwrap();
        let mut b = Ctrnn::new(0.01, &config).unwrap();

        for tick in 0..200 {
            let phase = tick as f64 * 0.05;
            let inputs = [phase.sin(), phase.cos(), 1.0];
            a.feed_inputs(&inputs).unwrap();
            b.feed_inputs(&inputs).unwrap();
            a.step();
            b.step();
            assert_eq!(a.read_outputs(4), b.read_outputs(4));
        }
    }

    #[test]
    fn test_set_time_step_changes_dynamics() {
        let mut config = uniform_config(1, 1, 0.5);
        config.input_nodes[0].weights[0] = 0.75;
        let mut coarse = Ctrnn::new(0.01, &config).unwrap();
        let mut fine = Ctrnn::new(0.01, &config).unwrap();
        fine.set_time_step(0.001);

        coarse.feed_inputs(&[1.0]).unwrap();
        fine.feed_inputs(&[1.0]).unwrap();
        coarse.step();
        fine.step();
        let c = coarse.input_node(0).state();
        let f = fine.input_node(0).state();
        assert!((c - 10.0 * f).abs() < 1e-15);
    }
}
