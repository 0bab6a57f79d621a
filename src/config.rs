// src/config.rs

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// One point in the parameter sweep.
///
/// Fields are private so every `Configuration` in circulation has passed
/// validation. More latents than scores is permitted; it simply yields a
/// rank-deficient mixture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Configuration {
    sample_size: usize,
    num_latents: usize,
    num_scores: usize,
    sparsity: f64,
    num_replications: usize,
}

impl Configuration {
    /// Validates and creates a configuration.
    ///
    /// # Errors
    /// Returns a `ConfigError` if the sample size is below 2, if any count is zero,
    /// or if `sparsity` is not a finite proportion in `[0, 1]`.
    pub fn new(
        sample_size: usize,
        num_latents: usize,
        num_scores: usize,
        sparsity: f64,
        num_replications: usize,
    ) -> Result<Self, ConfigError> {
        if sample_size < 2 {
            return Err(ConfigError::SampleSizeTooSmall(sample_size));
        }
        if num_latents == 0 {
            return Err(ConfigError::NoLatents);
        }
        if num_scores == 0 {
            return Err(ConfigError::NoScores);
        }
        if !sparsity.is_finite() || !(0.0..=1.0).contains(&sparsity) {
            return Err(ConfigError::InvalidSparsity(sparsity));
        }
        if num_replications == 0 {
            return Err(ConfigError::NoReplications);
        }
        Ok(Self {
            sample_size,
            num_latents,
            num_scores,
            sparsity,
            num_replications,
        })
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn num_latents(&self) -> usize {
        self.num_latents
    }

    pub fn num_scores(&self) -> usize {
        self.num_scores
    }

    pub fn sparsity(&self) -> f64 {
        self.sparsity
    }

    pub fn num_replications(&self) -> usize {
        self.num_replications
    }

    /// Upper bound on the number of principal components: `min(num_scores, sample_size - 1)`.
    pub fn max_components(&self) -> usize {
        self.num_scores.min(self.sample_size - 1)
    }
}

/// The axes of a Cartesian parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
    pub sample_sizes: Vec<usize>,
    pub num_latents_values: Vec<usize>,
    pub num_scores_values: Vec<usize>,
    pub sparsity_values: Vec<f64>,
    pub num_replications: usize,
}

impl SweepGrid {
    /// Number of configurations in the Cartesian product.
    pub fn num_configurations(&self) -> usize {
        self.sample_sizes.len()
            * self.num_latents_values.len()
            * self.num_scores_values.len()
            * self.sparsity_values.len()
    }

    /// Expected number of rows in the results table of a fully successful sweep.
    pub fn expected_rows(&self) -> usize {
        self.num_configurations() * self.num_replications
    }

    /// Enumerates and validates every configuration, nesting
    /// sample size -> latents -> scores -> sparsity.
    ///
    /// # Errors
    /// Fails on an empty axis or on the first invalid configuration, before any
    /// simulation work is done.
    pub fn configurations(&self) -> Result<Vec<Configuration>, ConfigError> {
        if self.sample_sizes.is_empty() {
            return Err(ConfigError::EmptyAxis("sample_sizes"));
        }
        if self.num_latents_values.is_empty() {
            return Err(ConfigError::EmptyAxis("num_latents_values"));
        }
        if self.num_scores_values.is_empty() {
            return Err(ConfigError::EmptyAxis("num_scores_values"));
        }
        if self.sparsity_values.is_empty() {
            return Err(ConfigError::EmptyAxis("sparsity_values"));
        }

        let mut configurations = Vec::with_capacity(self.num_configurations());
        for &sample_size in &self.sample_sizes {
            for &num_latents in &self.num_latents_values {
                for &num_scores in &self.num_scores_values {
                    for &sparsity in &self.sparsity_values {
                        configurations.push(Configuration::new(
                            sample_size,
                            num_latents,
                            num_scores,
                            sparsity,
                            self.num_replications,
                        )?);
                    }
                }
            }
        }
        Ok(configurations)
    }
}

/// What to do with a score column whose standard deviation is effectively zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroVariancePolicy {
    /// Abort the replication with `SimulationError::ZeroVarianceColumn`.
    #[default]
    Error,
    /// Zero-fill the centered column so it contributes a zero eigenvalue.
    ZeroEigenvalue,
}

/// Run-level settings for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Master seed. Each configuration derives its own random stream from it.
    /// If `None`, a seed is drawn from the operating system and logged.
    pub seed: Option<u64>,
    /// Worker threads for the sweep. `None` uses rayon's global pool.
    pub num_threads: Option<usize>,
    pub zero_variance_policy: ZeroVariancePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            seed: None,
            num_threads: None,
            zero_variance_policy: ZeroVariancePolicy::Error,
        }
    }
}
