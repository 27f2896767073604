//! Correlation matrix derivation.
//!
//! `cor[i][j] = cov[i][j] / sqrt(cov[i][i] * cov[j][j])`, requiring a
//! strictly positive diagonal. A zero or negative variance makes the
//! normalization undefined, so it surfaces as a typed error instead of
//! silently producing NaN or infinity.

use restartkit_error::{RestartError, Result};
use restartkit_types::SquareMatrix;

/// Derive the correlation matrix from a symmetric covariance matrix.
///
/// Off-diagonal entries are written symmetrically; the diagonal is set to
/// exactly `1.0` (the quotient `cov[i][i] / sqrt(cov[i][i]^2)` can differ
/// from 1 in the last bit, and the unit diagonal is an invariant, not an
/// approximation).
///
/// # Errors
///
/// `DegenerateCovariance` naming the first non-positive diagonal entry.
/// The diagonal is validated in full before any entry is divided.
pub fn correlation_from_covariance(cov: &SquareMatrix) -> Result<SquareMatrix> {
    let dim = cov.dim();
    for i in 0..dim {
        let variance = cov.get(i, i);
        if variance <= 0.0 {
            return Err(RestartError::DegenerateCovariance {
                index: i,
                value: variance,
            });
        }
    }

    let mut cor = SquareMatrix::zeros(dim);
    for i in 0..dim {
        for j in 0..i {
            let denom = (cov.get(i, i) * cov.get(j, j)).sqrt();
            cor.set_symmetric(i, j, cov.get(i, j) / denom);
        }
        cor.set(i, i, 1.0);
    }
    Ok(cor)
}
