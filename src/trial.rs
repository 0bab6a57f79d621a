// src/trial.rs

use crate::config::Configuration;
use crate::dimensions::{DimensionCounter, DimensionCounts};
use crate::error::SimulationError;
use crate::linalg_backends::{BackendEigvalsh, NdarrayLinAlgBackend};
use crate::mixture::LinearMixtureModel;
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The outcome of one replication. Field order is the column order of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReplicationResult {
    pub sample_size: usize,
    pub num_latents: usize,
    pub num_scores: usize,
    pub sparsity: f64,
    /// 1-based.
    pub replication_index: usize,
    pub dims_joliffe: usize,
    pub dims_kaiser: usize,
}

impl ReplicationResult {
    pub fn new(config: &Configuration, replication_index: usize, counts: DimensionCounts) -> Self {
        Self {
            sample_size: config.sample_size(),
            num_latents: config.num_latents(),
            num_scores: config.num_scores(),
            sparsity: config.sparsity(),
            replication_index,
            dims_joliffe: counts.dims_joliffe,
            dims_kaiser: counts.dims_kaiser,
        }
    }
}

/// Runs every replication of a single configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialRunner<B = NdarrayLinAlgBackend> {
    counter: DimensionCounter<B>,
}

impl<B: BackendEigvalsh<f64>> TrialRunner<B> {
    pub fn new(counter: DimensionCounter<B>) -> Self {
        Self { counter }
    }

    pub fn counter(&self) -> &DimensionCounter<B> {
        &self.counter
    }

    /// Generates and measures `config.num_replications()` independent datasets.
    ///
    /// Each replication builds a fresh model and draws both new weights and new
    /// latents, so the spread of the results reflects the whole generative model.
    ///
    /// # Errors
    /// The first failing replication aborts the batch; its index is attached to the error.
    pub fn run<R: Rng + ?Sized>(
        &self,
        config: &Configuration,
        rng: &mut R,
    ) -> Result<Vec<ReplicationResult>, SimulationError> {
        let mut results = Vec::with_capacity(config.num_replications());
        for replication_index in 1..=config.num_replications() {
            let dataset = LinearMixtureModel::new(config).generate(rng);
            let counts = self
                .counter
                .count_dimensions(&dataset.scores)
                .map_err(|source| SimulationError::Replication {
                    replication_index,
                    source: Box::new(source),
                })?;
            trace!(
                "Replication {} of {:?}: joliffe={}, kaiser={}",
                replication_index, config, counts.dims_joliffe, counts.dims_kaiser
            );
            results.push(ReplicationResult::new(config, replication_index, counts));
        }
        Ok(results)
    }
}
