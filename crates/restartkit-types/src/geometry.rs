//! Per-record line geometry of a restart file.
//!
//! A restart file is a sequence of fixed-shape records whose line layout
//! depends only on the sampling-space dimensionality `d`. This module is
//! the single source of truth for that layout so the decoder never
//! hardcodes an offset twice.
//!
//! Relative to a record's starting line:
//!
//! - offsets `0, 2, 4, 6` hold the four scalar values (odd offsets are
//!   label lines and are never parsed),
//! - offset `8` starts the `d`-line mean-vector block,
//! - offset `9 + d` starts the lower-triangular covariance block, one
//!   value per line, row `i` contributing `i + 1` lines.
//!
//! Line `0` of the file is the first record's leading label, so record `k`
//! starts at absolute line `k * skip + 1`.

/// Line layout of one restart record for a fixed dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordGeometry {
    dim: usize,
    skip: usize,
}

impl RecordGeometry {
    /// Relative line offsets of the four scalar values within a record.
    pub const SCALAR_OFFSETS: [usize; 4] = [0, 2, 4, 6];

    /// Relative line offset of the first mean-vector value.
    pub const MEAN_VEC_OFFSET: usize = 8;

    /// Build the geometry for dimensionality `dim`.
    ///
    /// `dim` must already be validated (`>= 1`); the constructor is a pure
    /// arithmetic function and has no failure mode of its own.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        debug_assert!(dim >= 1, "geometry requires a validated dimensionality");
        // dim * (dim + 3) is always even, so the division is exact.
        let skip = 10 + dim * (dim + 3) / 2;
        Self { dim, skip }
    }

    /// The dimensionality this geometry was built for.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of lines occupied by one full record.
    #[must_use]
    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Relative offset of the first lower-triangular covariance value.
    ///
    /// One label line sits between the mean-vector block and the triangle.
    #[must_use]
    pub fn triangle_offset(&self) -> usize {
        9 + self.dim
    }

    /// Total number of lower-triangular covariance lines: `d * (d + 1) / 2`.
    #[must_use]
    pub fn triangle_len(&self) -> usize {
        self.dim * (self.dim + 1) / 2
    }

    /// Absolute line index where record `k` (0-based) starts.
    #[must_use]
    pub fn record_start(&self, k: usize) -> usize {
        k * self.skip + 1
    }

    /// Minimum number of lines a file holding `count` records must provide.
    ///
    /// The last line actually read for record `count - 1` is its final
    /// triangle value at absolute index `count * skip - 1`; the trailing
    /// label that would introduce a further record is not required.
    #[must_use]
    pub fn lines_required(&self, count: usize) -> usize {
        count * self.skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn skip_small_dims() {
        assert_eq!(RecordGeometry::new(1).skip(), 12);
        assert_eq!(RecordGeometry::new(2).skip(), 15);
        assert_eq!(RecordGeometry::new(3).skip(), 19);
        assert_eq!(RecordGeometry::new(5).skip(), 30);
    }

    #[test]
    fn triangle_shape() {
        let g = RecordGeometry::new(4);
        assert_eq!(g.triangle_offset(), 13);
        assert_eq!(g.triangle_len(), 10);
    }

    #[test]
    fn record_start_skips_file_label() {
        let g = RecordGeometry::new(2);
        assert_eq!(g.record_start(0), 1);
        assert_eq!(g.record_start(1), 16);
        assert_eq!(g.record_start(3), 46);
    }

    #[test]
    fn lines_required_excludes_trailing_label() {
        let g = RecordGeometry::new(2);
        // One d=2 record: label line + 14 payload lines = 15 total.
        assert_eq!(g.lines_required(1), 15);
        assert_eq!(g.lines_required(3), 45);
    }

    #[test]
    fn scalar_offsets_are_even() {
        assert_eq!(RecordGeometry::SCALAR_OFFSETS, [0, 2, 4, 6]);
    }

    proptest! {
        /// `skip` always matches the closed form and the triangular rows
        /// account for every line between the triangle start and the end
        /// of the record's payload.
        #[test]
        fn prop_geometry_round_trip(dim in 1_usize..=64) {
            let g = RecordGeometry::new(dim);
            prop_assert_eq!(g.skip(), 10 + dim * (dim + 3) / 2);

            let row_sum: usize = (0..dim).map(|i| i + 1).sum();
            prop_assert_eq!(row_sum, g.triangle_len());
            prop_assert_eq!(row_sum, dim * (dim + 1) / 2);

            // Payload ends exactly one line short of the next record's
            // leading label.
            prop_assert_eq!(g.triangle_offset() + g.triangle_len(), g.skip() - 1);
        }

        #[test]
        fn prop_records_tile_the_file(dim in 1_usize..=16, count in 1_usize..=32) {
            let g = RecordGeometry::new(dim);
            for k in 1..count {
                prop_assert_eq!(g.record_start(k), g.record_start(k - 1) + g.skip());
            }
            prop_assert_eq!(g.lines_required(count), g.record_start(count) - 1);
        }
    }
}
