//! Dense square matrix with constructed symmetry.
//!
//! Covariance matrices arrive in the file as a lower triangle; the decoder
//! mirrors each value into the upper triangle as it is parsed rather than
//! symmetrizing afterwards. [`SquareMatrix::set_symmetric`] is that
//! two-write step. Symmetry is therefore exact (same stored bits), which
//! [`SquareMatrix::is_symmetric`] checks bitwise.

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Row-major `d × d` matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    dim: usize,
    data: Vec<f64>,
}

impl SquareMatrix {
    /// A zero-filled `dim × dim` matrix.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Side length.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.dim && col < self.dim, "matrix index out of range");
        self.data[row * self.dim + col]
    }

    /// Set the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.dim && col < self.dim, "matrix index out of range");
        self.data[row * self.dim + col] = value;
    }

    /// Write `value` at `(row, col)` and mirror it at `(col, row)`.
    ///
    /// Both writes always happen (they coincide on the diagonal), so a
    /// matrix filled exclusively through this method is symmetric by
    /// construction — no post-hoc symmetrization pass exists or is needed.
    pub fn set_symmetric(&mut self, row: usize, col: usize, value: f64) {
        self.set(row, col, value);
        self.set(col, row, value);
    }

    /// One row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.dim, "matrix row out of range");
        &self.data[row * self.dim..(row + 1) * self.dim]
    }

    /// Exact symmetry check: `m[i][j]` and `m[j][i]` hold the same bits.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        for i in 0..self.dim {
            for j in 0..i {
                if self.get(i, j).to_bits() != self.get(j, i).to_bits() {
                    return false;
                }
            }
        }
        true
    }
}

impl Serialize for SquareMatrix {
    /// Serializes as a sequence of rows, e.g. `[[4.0, 1.0], [1.0, 9.0]]`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.dim))?;
        for row in 0..self.dim {
            seq.serialize_element(self.row(row))?;
        }
        seq.end()
    }
}
