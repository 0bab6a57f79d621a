// src/linalg_backends.rs

use crate::error::ThreadSafeStdError;
use ndarray::{Array1, Array2};
use ndarray_linalg::{EigValsh as NdLinalgEigValsh, UPLO};
use std::error::Error;

/// Trait for the eigenvalues of a symmetric matrix (similar to LAPACK's DSYEVD without vectors).
/// Implementers read the upper triangle of `matrix`.
/// Eigenvalues are returned in ascending order.
pub trait BackendEigvalsh<F: 'static + Copy + Send + Sync> {
    fn eigvalsh_upper(&self, matrix: &Array2<F>) -> Result<Array1<F>, ThreadSafeStdError>;
}

/// ndarray-linalg (LAPACK) backend. The LAPACK provider is chosen by the
/// `backend_*` cargo features.
#[derive(Debug, Default, Copy, Clone)]
pub struct NdarrayLinAlgBackend;

// Helper to convert ndarray-linalg's error to Box<dyn Error + Send + Sync>
fn to_dyn_error<E: Error + Send + Sync + 'static>(e: E) -> ThreadSafeStdError {
    Box::new(e)
}

impl BackendEigvalsh<f64> for NdarrayLinAlgBackend {
    fn eigvalsh_upper(&self, matrix: &Array2<f64>) -> Result<Array1<f64>, ThreadSafeStdError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(format!(
                "Matrix must be square for eigendecomposition, but has shape ({}, {}).",
                matrix.nrows(),
                matrix.ncols()
            )
            .into());
        }
        if matrix.is_empty() {
            return Ok(Array1::zeros(0));
        }
        matrix.eigvalsh(UPLO::Upper).map_err(to_dyn_error)
    }
}
