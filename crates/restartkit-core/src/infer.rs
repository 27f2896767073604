//! Structural inference: dimensionality and snapshot count.
//!
//! Neither quantity is stored in a header. The dimensionality is
//! reverse-engineered from the shape of the first record's mean-vector
//! block; the record count is the number of occurrences of the first
//! scalar field's label, which the format guarantees appears exactly once
//! per record and nowhere else.

use memchr::memmem;

use restartkit_error::{RestartError, Result};
use restartkit_types::{ScalarField, MEAN_VEC_MARKER};

use crate::lines::is_numeric;

/// Infer the sampling-space dimensionality `d` from the line sequence.
///
/// Scans for the first line containing [`MEAN_VEC_MARKER`] as a substring
/// (first occurrence only — later records legitimately repeat the token),
/// then counts consecutive numeric lines immediately after it.
///
/// # Errors
///
/// `Corrupt` if no marker line exists, or if the marker is not followed by
/// at least one numeric line (`d == 0`).
pub fn infer_dimensionality(lines: &[&str]) -> Result<usize> {
    let marker_line = lines
        .iter()
        .position(|line| line.contains(MEAN_VEC_MARKER))
        .ok_or_else(|| {
            RestartError::corrupt(
                lines.len().saturating_sub(1),
                format!("mean-vector marker '{MEAN_VEC_MARKER}' not found"),
            )
        })?;

    let first_value = marker_line + 1;
    let dim = lines[first_value.min(lines.len())..]
        .iter()
        .take_while(|line| is_numeric(line))
        .count();

    if dim == 0 {
        return Err(RestartError::corrupt(
            first_value,
            format!("no numeric lines follow the '{MEAN_VEC_MARKER}' marker"),
        ));
    }
    Ok(dim)
}

/// Count the number of snapshot records in the raw (unsplit) text.
///
/// `n` is the number of verbatim occurrences of the first scalar field's
/// label token. The exactly-once-per-record property is structural to the
/// format; the decoder cross-checks it against the available line count
/// afterwards.
///
/// # Errors
///
/// `Corrupt` if the token never occurs (`n == 0`).
pub fn count_snapshots(text: &str) -> Result<usize> {
    let marker = ScalarField::MeanAcceptanceRate.marker();
    let count = memmem::find_iter(text.as_bytes(), marker.as_bytes()).count();
    if count == 0 {
        return Err(RestartError::corrupt(
            0,
            format!("update-count marker '{marker}' not found"),
        ));
    }
    Ok(count)
}
