//! # ctrnn
//!
//! Genome-configurable continuous-time recurrent neural network (CTRNN)
//! built from leaky-integrator neurons with a blended tanh/sine transfer
//! function, intended to be sampled every control tick by an audio-rate or
//! control-rate host.
//!
//! ## Quick Start
//!
//! ```rust
//! use ctrnn::{Ctrnn, CtrnnConfig};
//!
//! // Build a network from the built-in default genome.
//! let config = CtrnnConfig::default();
//! let mut net = Ctrnn::new(0.01, &config).unwrap();
//!
//! // Drive it once per control tick.
//! net.feed_inputs(&[1.0, 0.0]).unwrap();
//! net.step();
//! let outputs = net.read_outputs(3);
//! assert_eq!(outputs.len(), 3);
//! ```
//!
//! ## Genomes
//!
//! Every parameter arrives normalized to [0,1] (typically from an
//! evolutionary search) and is mapped to its physical range at construction:
//!
//! ```rust
//! use ctrnn::{Ctrnn, CtrnnConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let genome = CtrnnConfig::random(2, 4, &mut rng);
//! let net = Ctrnn::new(0.001, &genome).unwrap();
//! assert_eq!(net.num_hidden_nodes(), 4);
//! ```

pub mod config;
pub mod error;
pub mod network;
pub mod neuron;
pub mod params;

// Re-export main types
pub use config::{CtrnnConfig, NodeConfig};
pub use error::CtrnnError;
pub use network::Ctrnn;
pub use neuron::LeakyIntegrator;
pub use params::{transfer, ParamRange, ParamRanges};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick step-rate benchmark against a uniform genome.
pub fn benchmark(ticks: u64, num_input_nodes: usize, num_hidden_nodes: usize) -> BenchmarkResult {
    use std::time::Instant;

    let config = CtrnnConfig::uniform(num_input_nodes, num_hidden_nodes, 0.5);
    let mut net = Ctrnn::new(0.01, &config).expect("uniform genome is always valid");
    let inputs = vec![1.0; num_input_nodes];

    let start = Instant::now();
    for _ in 0..ticks {
        net.feed_inputs(&inputs).expect("arity fixed above");
        net.step();
    }
    let elapsed = start.elapsed();

    BenchmarkResult {
        ticks,
        num_input_nodes,
        num_hidden_nodes,
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub num_input_nodes: usize,
    pub num_hidden_nodes: usize,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(
            f,
            "Network: {} input / {} hidden nodes",
            self.num_input_nodes, self.num_hidden_nodes
        )?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}
