// src/error.rs

use std::error::Error;
use thiserror::Error;

/// A thread-safe wrapper for standard dynamic errors,
/// so they implement `Send` and `Sync`.
pub type ThreadSafeStdError = Box<dyn Error + Send + Sync + 'static>;

/// Invalid simulation parameters. Raised before any simulation work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Sample size must be at least 2 to define a variance, but was {0}.")]
    SampleSizeTooSmall(usize),

    #[error("Number of latent variables must be at least 1.")]
    NoLatents,

    #[error("Number of observed scores must be at least 1.")]
    NoScores,

    #[error("Number of replications must be at least 1.")]
    NoReplications,

    #[error("Sparsity must be a finite proportion in [0, 1], but was {0}.")]
    InvalidSparsity(f64),

    #[error("Sweep axis '{0}' has no values.")]
    EmptyAxis(&'static str),

    #[error("Failed to build a thread pool with {num_threads} threads: {message}")]
    ThreadPool { num_threads: usize, message: String },
}

/// Failures raised while simulating or measuring a dataset.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Score column {column} has zero variance and cannot be standardized.")]
    ZeroVarianceColumn { column: usize },

    #[error("Score matrix must have at least 2 rows and 1 column, but has shape ({rows}, {cols}).")]
    DegenerateShape { rows: usize, cols: usize },

    #[error("Eigendecomposition of the {matrix} matrix failed: {source}")]
    Eigendecomposition {
        matrix: &'static str,
        #[source]
        source: ThreadSafeStdError,
    },

    #[error("Replication {replication_index} failed: {source}")]
    Replication {
        replication_index: usize,
        #[source]
        source: Box<SimulationError>,
    },

    #[error("{num_failed} of {num_configurations} configurations failed; first failure: {first}")]
    IncompleteSweep {
        num_failed: usize,
        num_configurations: usize,
        first: String,
    },
}
