//! Error types for network construction and runtime feeding.

use thiserror::Error;

/// Errors produced by genome loading, validation, and input feeding.
///
/// Construction either yields a fully valid network or fails here; there are
/// no partially constructed instances and no retryable failures.
#[derive(Debug, Error)]
pub enum CtrnnError {
    #[error("declared {declared} {layer} nodes but configuration lists {actual}")]
    NodeCountMismatch {
        layer: &'static str,
        declared: usize,
        actual: usize,
    },

    #[error("{layer} node {index} has {actual} weights, expected {expected}")]
    WeightCountMismatch {
        layer: &'static str,
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("parameter range for {parameter} is inverted: min {min} > max {max}")]
    InvalidRange {
        parameter: &'static str,
        min: f64,
        max: f64,
    },

    #[error("fed {actual} inputs but network has {expected} input nodes")]
    InputArityMismatch { expected: usize, actual: usize },

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
