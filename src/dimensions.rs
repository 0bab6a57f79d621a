// src/dimensions.rs

use crate::config::ZeroVariancePolicy;
use crate::error::SimulationError;
use crate::linalg_backends::{BackendEigvalsh, NdarrayLinAlgBackend};
use crate::mixture::ScoreMatrix;
use crate::pca::{eigenvalue_spectrum, standardize_columns};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Eigenvalue threshold rules for retaining principal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RetentionCriterion {
    /// Retain components with eigenvalue > 0.7.
    Joliffe,
    /// Retain components with eigenvalue > 1.0.
    Kaiser,
}

impl RetentionCriterion {
    pub fn threshold(self) -> f64 {
        match self {
            RetentionCriterion::Joliffe => 0.7,
            RetentionCriterion::Kaiser => 1.0,
        }
    }

    /// Number of eigenvalues strictly greater than the threshold.
    pub fn count(self, eigenvalues: &Array1<f64>) -> usize {
        let threshold = self.threshold();
        eigenvalues.iter().filter(|&&v| v > threshold).count()
    }
}

/// Components retained by each criterion for one score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCounts {
    pub dims_joliffe: usize,
    pub dims_kaiser: usize,
    /// Number of eigenvalues examined, `min(num_scores, sample_size - 1)`.
    pub num_components: usize,
}

/// Estimates the number of dimensions in a score matrix from its PCA eigenvalues.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionCounter<B = NdarrayLinAlgBackend> {
    backend: B,
    zero_variance_policy: ZeroVariancePolicy,
}

impl DimensionCounter<NdarrayLinAlgBackend> {
    pub fn new(zero_variance_policy: ZeroVariancePolicy) -> Self {
        Self::with_backend(NdarrayLinAlgBackend, zero_variance_policy)
    }
}

impl<B: BackendEigvalsh<f64>> DimensionCounter<B> {
    pub fn with_backend(backend: B, zero_variance_policy: ZeroVariancePolicy) -> Self {
        Self { backend, zero_variance_policy }
    }

    pub fn zero_variance_policy(&self) -> ZeroVariancePolicy {
        self.zero_variance_policy
    }

    /// Standardized PCA eigenvalues of `scores`, largest first.
    pub fn eigenvalues(&self, scores: &ScoreMatrix) -> Result<Array1<f64>, SimulationError> {
        let standardized = standardize_columns(scores.data.clone(), self.zero_variance_policy)?;
        eigenvalue_spectrum(&self.backend, &standardized)
    }

    /// Counts the eigenvalues passing the Joliffe and Kaiser thresholds.
    ///
    /// # Errors
    /// Propagates standardization failures (e.g. a zero-variance column under
    /// `ZeroVariancePolicy::Error`) and eigendecomposition failures.
    pub fn count_dimensions(&self, scores: &ScoreMatrix) -> Result<DimensionCounts, SimulationError> {
        let eigenvalues = self.eigenvalues(scores)?;
        Ok(DimensionCounts {
            dims_joliffe: RetentionCriterion::Joliffe.count(&eigenvalues),
            dims_kaiser: RetentionCriterion::Kaiser.count(&eigenvalues),
            num_components: eigenvalues.len(),
        })
    }
}
