//! Per-record extraction.
//!
//! Walks one record's span of the line sequence using [`RecordGeometry`]
//! and produces the scalars, the mean vector, and the covariance matrix.
//! Triangular covariance values are mirrored into the upper triangle as
//! each row is parsed ([`SquareMatrix::set_symmetric`]), so the matrix is
//! exactly symmetric by construction — correlation derivation depends on
//! that.
//!
//! Any expected line that is missing or non-numeric fails the decode with
//! a corruption error carrying the record index and the absolute line
//! number. Nothing is skipped and no default value is ever substituted.

use restartkit_error::{RestartError, Result};
use restartkit_types::{RecordGeometry, SquareMatrix};

use crate::lines::parse_numeric;

/// One record as extracted from the file, before correlation derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecord {
    /// The four scalar values, in file order.
    pub scalars: [f64; 4],
    /// Mean vector, length `d`.
    pub mean_vec: Vec<f64>,
    /// Covariance matrix, symmetric by construction.
    pub cov_mat: SquareMatrix,
}

fn line_at<'a>(lines: &[&'a str], index: usize, record: usize) -> Result<&'a str> {
    lines.get(index).copied().ok_or_else(|| {
        RestartError::corrupt(
            index,
            format!("record {record} extends past the end of the file"),
        )
    })
}

/// Decode record `index` (0-based) from the line sequence.
///
/// # Errors
///
/// `Corrupt` if any expected line is missing or fails to parse as a
/// number.
pub fn decode_record(
    lines: &[&str],
    geometry: &RecordGeometry,
    index: usize,
) -> Result<DecodedRecord> {
    let dim = geometry.dim();
    let start = geometry.record_start(index);

    let mut scalars = [0.0_f64; 4];
    for (slot, offset) in RecordGeometry::SCALAR_OFFSETS.into_iter().enumerate() {
        let line_no = start + offset;
        scalars[slot] = parse_numeric(line_at(lines, line_no, index)?, line_no)?;
    }

    let mut mean_vec = Vec::with_capacity(dim);
    for i in 0..dim {
        let line_no = start + RecordGeometry::MEAN_VEC_OFFSET + i;
        mean_vec.push(parse_numeric(line_at(lines, line_no, index)?, line_no)?);
    }

    // Triangular row i holds i + 1 values, one per line; each is written
    // to the lower triangle and mirrored to the upper in the same step.
    let mut cov_mat = SquareMatrix::zeros(dim);
    let mut line_no = start + geometry.triangle_offset();
    for row in 0..dim {
        for col in 0..=row {
            let value = parse_numeric(line_at(lines, line_no, index)?, line_no)?;
            cov_mat.set_symmetric(row, col, value);
            line_no += 1;
        }
    }

    Ok(DecodedRecord {
        scalars,
        mean_vec,
        cov_mat,
    })
}
