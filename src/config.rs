//! Genome configuration: loading, validation, and generation.
//!
//! Field names on the wire match the JSON genome schema used by existing
//! hosts (`iNs`, `hNs`, `w`, ...), so evolved genomes load unchanged. YAML
//! is accepted as well for hand-edited configs.

use crate::error::CtrnnError;
use crate::params::ParamRanges;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One node's normalized genome entry. Every scalar is nominally in [0,1];
/// out-of-range values are passed through and extrapolated by the mapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Normalized time constant.
    pub t: f64,
    pub gain: f64,
    pub bias: f64,
    #[serde(rename = "sineCoefficient")]
    pub sine_coefficient: f64,
    #[serde(rename = "frequencyMultiplier")]
    pub frequency_multiplier: f64,
    /// Normalized weights, one per input slot.
    #[serde(rename = "w")]
    pub weights: Vec<f64>,
}

impl NodeConfig {
    fn uniform(value: f64, num_weights: usize) -> Self {
        Self {
            t: value,
            gain: value,
            bias: value,
            sine_coefficient: value,
            frequency_multiplier: value,
            weights: vec![value; num_weights],
        }
    }

    fn random<R: Rng>(rng: &mut R, num_weights: usize) -> Self {
        Self {
            t: rng.gen(),
            gain: rng.gen(),
            bias: rng.gen(),
            sine_coefficient: rng.gen(),
            frequency_multiplier: rng.gen(),
            weights: (0..num_weights).map(|_| rng.gen()).collect(),
        }
    }
}

/// A complete genome: node counts, per-node parameters, and the parameter
/// range table used to map them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtrnnConfig {
    #[serde(rename = "iNs")]
    pub num_input_nodes: usize,
    #[serde(rename = "hNs")]
    pub num_hidden_nodes: usize,
    #[serde(rename = "inputNodes")]
    pub input_nodes: Vec<NodeConfig>,
    #[serde(rename = "hiddenNodes")]
    pub hidden_nodes: Vec<NodeConfig>,
    /// Range table override; defaults to the standard table when absent.
    #[serde(default)]
    pub ranges: ParamRanges,
}

impl Default for CtrnnConfig {
    /// The built-in fallback genome: two input nodes, three hidden nodes,
    /// every normalized field at 0.5.
    fn default() -> Self {
        Self::uniform(2, 3, 0.5)
    }
}

impl CtrnnConfig {
    /// A genome with every normalized field set to `value`. Input nodes get
    /// one weight each, hidden nodes one per network node (full recurrence).
    pub fn uniform(num_input_nodes: usize, num_hidden_nodes: usize, value: f64) -> Self {
        let num_nodes = num_input_nodes + num_hidden_nodes;
        Self {
            num_input_nodes,
            num_hidden_nodes,
            input_nodes: (0..num_input_nodes)
                .map(|_| NodeConfig::uniform(value, 1))
                .collect(),
            hidden_nodes: (0..num_hidden_nodes)
                .map(|_| NodeConfig::uniform(value, num_nodes))
                .collect(),
            ranges: ParamRanges::default(),
        }
    }

    /// A uniformly random genome, every field drawn from [0,1). Seed the RNG
    /// for reproducible genomes.
    pub fn random<R: Rng>(num_input_nodes: usize, num_hidden_nodes: usize, rng: &mut R) -> Self {
        let num_nodes = num_input_nodes + num_hidden_nodes;
        Self {
            num_input_nodes,
            num_hidden_nodes,
            input_nodes: (0..num_input_nodes)
                .map(|_| NodeConfig::random(rng, 1))
                .collect(),
            hidden_nodes: (0..num_hidden_nodes)
                .map(|_| NodeConfig::random(rng, num_nodes))
                .collect(),
            ranges: ParamRanges::default(),
        }
    }

    /// Load a genome from a file. `.json` files parse as JSON, anything else
    /// as YAML. The genome is validated before being returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CtrnnError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)?
        } else {
            serde_yaml::from_str(&contents)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a genome from a JSON string, for hosts that hand genomes over
    /// directly rather than through files.
    pub fn from_json_str(json: &str) -> Result<Self, CtrnnError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the genome to a file, format chosen by extension as in
    /// [`CtrnnConfig::from_file`].
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CtrnnError> {
        let path = path.as_ref();
        let contents = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Check structural consistency: declared counts match the node lists,
    /// every weight list has the length its layer requires, and the range
    /// table is well formed.
    pub fn validate(&self) -> Result<(), CtrnnError> {
        self.ranges.validate()?;

        if self.input_nodes.len() != self.num_input_nodes {
            return Err(CtrnnError::NodeCountMismatch {
                layer: "input",
                declared: self.num_input_nodes,
                actual: self.input_nodes.len(),
            });
        }
        if self.hidden_nodes.len() != self.num_hidden_nodes {
            return Err(CtrnnError::NodeCountMismatch {
                layer: "hidden",
                declared: self.num_hidden_nodes,
                actual: self.hidden_nodes.len(),
            });
        }

        for (index, node) in self.input_nodes.iter().enumerate() {
            if node.weights.len() != 1 {
                return Err(CtrnnError::WeightCountMismatch {
                    layer: "input",
                    index,
                    expected: 1,
                    actual: node.weights.len(),
                });
            }
        }
        let hidden_inputs = self.num_input_nodes + self.num_hidden_nodes;
        for (index, node) in self.hidden_nodes.iter().enumerate() {
            if node.weights.len() != hidden_inputs {
                return Err(CtrnnError::WeightCountMismatch {
                    layer: "hidden",
                    index,
                    expected: hidden_inputs,
                    actual: node.weights.len(),
                });
            }
        }
        Ok(())
    }
}
