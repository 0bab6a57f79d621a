// Principal component eigenvalue spectrum

use crate::config::ZeroVariancePolicy;
use crate::error::SimulationError;
use crate::linalg_backends::BackendEigvalsh;
use log::warn;
use ndarray::{Array1, Array2, Axis};

/// Standard deviations at or below this are treated as a constant column.
pub const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// Centers every column to zero mean and scales it to unit (population) variance.
///
/// Columns whose standard deviation is at most `ZERO_VARIANCE_TOLERANCE` are
/// handled by `policy`: either rejected, or zero-filled so that they
/// contribute a zero eigenvalue.
///
/// # Errors
/// Returns `SimulationError::DegenerateShape` for fewer than 2 rows or no
/// columns, and `SimulationError::ZeroVarianceColumn` for a constant column
/// under `ZeroVariancePolicy::Error`.
pub fn standardize_columns(
    mut data_matrix: Array2<f64>,
    policy: ZeroVariancePolicy,
) -> Result<Array2<f64>, SimulationError> {
    let (n_samples, n_features) = data_matrix.dim();
    if n_samples < 2 || n_features == 0 {
        return Err(SimulationError::DegenerateShape {
            rows: n_samples,
            cols: n_features,
        });
    }

    let mean_vector = data_matrix
        .mean_axis(Axis(0))
        .ok_or(SimulationError::DegenerateShape { rows: n_samples, cols: n_features })?;
    data_matrix -= &mean_vector;

    let std_dev_vector = data_matrix.map_axis(Axis(0), |column| column.std(0.0));
    for (column, &std_dev) in std_dev_vector.iter().enumerate() {
        if std_dev.is_finite() && std_dev > ZERO_VARIANCE_TOLERANCE {
            continue;
        }
        match policy {
            ZeroVariancePolicy::Error => {
                return Err(SimulationError::ZeroVarianceColumn { column });
            }
            ZeroVariancePolicy::ZeroEigenvalue => {
                warn!("Score column {} has zero variance; it will contribute a zero eigenvalue.", column);
                data_matrix.column_mut(column).fill(0.0);
            }
        }
    }

    // Degenerate columns are already zero; dividing them by 1.0 keeps them zero.
    let sanitized_scale_vector =
        std_dev_vector.mapv(|val| if val.is_finite() && val > ZERO_VARIANCE_TOLERANCE { val } else { 1.0 });
    data_matrix /= &sanitized_scale_vector;
    Ok(data_matrix)
}

/// Eigenvalues of the sample covariance `XᵀX / (n - 1)` of an already
/// standardized matrix, largest first, clamped to be non-negative and
/// truncated to `min(n_features, n_samples - 1)` components.
///
/// When there are more features than samples the `n × n` Gram matrix
/// `XXᵀ / (n - 1)` is decomposed instead; its non-zero spectrum is identical.
pub fn eigenvalue_spectrum<B: BackendEigvalsh<f64>>(
    backend: &B,
    standardized: &Array2<f64>,
) -> Result<Array1<f64>, SimulationError> {
    let (n_samples, n_features) = standardized.dim();
    if n_samples < 2 || n_features == 0 {
        return Err(SimulationError::DegenerateShape {
            rows: n_samples,
            cols: n_features,
        });
    }

    let (mut symmetric_matrix, matrix_name) = if n_features <= n_samples {
        (standardized.t().dot(standardized), "covariance")
    } else {
        (standardized.dot(&standardized.t()), "Gram")
    };
    symmetric_matrix /= (n_samples - 1) as f64;

    let vals = backend
        .eigvalsh_upper(&symmetric_matrix)
        .map_err(|source| SimulationError::Eigendecomposition { matrix: matrix_name, source })?;

    let mut sorted: Vec<f64> = vals.into_iter().map(|v| v.max(0.0)).collect();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(n_features.min(n_samples - 1));
    Ok(Array1::from(sorted))
}
