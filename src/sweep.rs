// src/sweep.rs

use crate::config::{Configuration, SimulationConfig, SweepGrid};
use crate::dimensions::DimensionCounter;
use crate::error::{ConfigError, SimulationError};
use crate::linalg_backends::{BackendEigvalsh, NdarrayLinAlgBackend};
use crate::trial::{ReplicationResult, TrialRunner};
use log::{debug, info, warn};
use ndarray::Array2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::Instant;

/// Column names of the flat results table, in order.
pub const RESULT_COLUMNS: [&str; 7] = [
    "sample_size",
    "num_latents",
    "num_scores",
    "sparsity",
    "replication_index",
    "dims_joliffe",
    "dims_kaiser",
];

/// All replication rows of a sweep, one per (configuration, replication).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsTable {
    rows: Vec<ReplicationResult>,
}

impl ResultsTable {
    pub fn new(rows: Vec<ReplicationResult>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ReplicationResult] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReplicationResult> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<ReplicationResult> {
        self.rows
    }

    /// The table as a homogeneous numeric matrix with the columns of `RESULT_COLUMNS`.
    pub fn to_array(&self) -> Array2<f64> {
        let mut table = Array2::<f64>::zeros((self.rows.len(), RESULT_COLUMNS.len()));
        for (mut out, row) in table.rows_mut().into_iter().zip(self.rows.iter()) {
            out[0] = row.sample_size as f64;
            out[1] = row.num_latents as f64;
            out[2] = row.num_scores as f64;
            out[3] = row.sparsity;
            out[4] = row.replication_index as f64;
            out[5] = row.dims_joliffe as f64;
            out[6] = row.dims_kaiser as f64;
        }
        table
    }
}

impl<'a> IntoIterator for &'a ResultsTable {
    type Item = &'a ReplicationResult;
    type IntoIter = std::slice::Iter<'a, ReplicationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// A configuration that produced no rows, and why.
#[derive(Debug)]
pub struct ConfigurationFailure {
    pub configuration: Configuration,
    pub error: SimulationError,
}

/// Result of a sweep: every successful configuration's rows, plus a marker
/// for each configuration that failed.
#[derive(Debug)]
pub struct SweepOutcome {
    pub table: ResultsTable,
    pub failures: Vec<ConfigurationFailure>,
    /// The master seed the per-configuration streams were derived from.
    pub seed: u64,
    pub num_configurations: usize,
}

impl SweepOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the table only if every configuration succeeded.
    ///
    /// # Errors
    /// `SimulationError::IncompleteSweep` describing the first failure.
    pub fn into_complete(self) -> Result<ResultsTable, SimulationError> {
        match self.failures.first() {
            None => Ok(self.table),
            Some(first) => Err(SimulationError::IncompleteSweep {
                num_failed: self.failures.len(),
                num_configurations: self.num_configurations,
                first: format!("{:?}: {}", first.configuration, first.error),
            }),
        }
    }
}

/// Random source for the configuration at `configuration_index`.
///
/// All configurations share the master seed but each reads its own ChaCha
/// stream, so concurrently running tasks never draw correlated numbers and
/// the sweep is reproducible regardless of scheduling.
pub fn configuration_rng(master_seed: u64, configuration_index: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(master_seed);
    rng.set_stream(configuration_index as u64);
    rng
}

/// Runs the Cartesian product of configurations, one parallel task per configuration.
#[derive(Debug, Clone)]
pub struct SweepEngine<B = NdarrayLinAlgBackend> {
    config: SimulationConfig,
    runner: TrialRunner<B>,
}

impl SweepEngine<NdarrayLinAlgBackend> {
    pub fn new(config: SimulationConfig) -> Self {
        let counter = DimensionCounter::new(config.zero_variance_policy);
        Self {
            config,
            runner: TrialRunner::new(counter),
        }
    }
}

impl<B: BackendEigvalsh<f64> + Sync> SweepEngine<B> {
    pub fn with_backend(config: SimulationConfig, backend: B) -> Self {
        let counter = DimensionCounter::with_backend(backend, config.zero_variance_policy);
        Self {
            config,
            runner: TrialRunner::new(counter),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Sweeps every combination of the given axis values, `num_replications` times each.
    ///
    /// # Errors
    /// Configuration errors are reported before any simulation starts.
    /// Numerical failures do not abort the sweep; they appear in `SweepOutcome::failures`.
    pub fn run_sweep(
        &self,
        sample_sizes: &[usize],
        num_latents_values: &[usize],
        num_scores_values: &[usize],
        sparsity_values: &[f64],
        num_replications: usize,
    ) -> Result<SweepOutcome, ConfigError> {
        self.run_grid(&SweepGrid {
            sample_sizes: sample_sizes.to_vec(),
            num_latents_values: num_latents_values.to_vec(),
            num_scores_values: num_scores_values.to_vec(),
            sparsity_values: sparsity_values.to_vec(),
            num_replications,
        })
    }

    pub fn run_grid(&self, grid: &SweepGrid) -> Result<SweepOutcome, ConfigError> {
        let configurations = grid.configurations()?;
        let master_seed = self.config.seed.unwrap_or_else(|| rand::thread_rng().gen());

        match self.config.num_threads {
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| ConfigError::ThreadPool {
                        num_threads,
                        message: e.to_string(),
                    })?;
                Ok(pool.install(|| self.run_configurations(configurations, master_seed)))
            }
            None => Ok(self.run_configurations(configurations, master_seed)),
        }
    }

    fn run_configurations(&self, configurations: Vec<Configuration>, master_seed: u64) -> SweepOutcome {
        let num_configurations = configurations.len();
        info!(
            "Starting sweep: {} configurations, {} threads, seed {}.",
            num_configurations,
            rayon::current_num_threads(),
            master_seed
        );
        let sweep_start_time = Instant::now();

        // Indexed collect keeps enumeration order; each task owns its rows until the merge.
        let per_configuration: Vec<(Configuration, Result<Vec<ReplicationResult>, SimulationError>)> =
            configurations
                .into_par_iter()
                .enumerate()
                .map(|(configuration_index, configuration)| {
                    let task_start_time = Instant::now();
                    let mut rng = configuration_rng(master_seed, configuration_index);
                    let result = self.runner.run(&configuration, &mut rng);
                    debug!(
                        "Configuration {} ({:?}) finished in {:?}.",
                        configuration_index,
                        configuration,
                        task_start_time.elapsed()
                    );
                    (configuration, result)
                })
                .collect();

        let mut rows = Vec::new();
        let mut failures = Vec::new();
        for (configuration, result) in per_configuration {
            match result {
                Ok(mut configuration_rows) => rows.append(&mut configuration_rows),
                Err(error) => {
                    warn!("Configuration {:?} failed: {}", configuration, error);
                    failures.push(ConfigurationFailure { configuration, error });
                }
            }
        }

        info!(
            "Sweep finished in {:?}: {} rows, {} failed configurations.",
            sweep_start_time.elapsed(),
            rows.len(),
            failures.len()
        );
        SweepOutcome {
            table: ResultsTable::new(rows),
            failures,
            seed: master_seed,
            num_configurations,
        }
    }
}
