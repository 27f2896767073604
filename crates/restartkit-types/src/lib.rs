//! Core data model for RestartKit.
//!
//! Everything in this crate is plain data: the fixed per-record line
//! geometry of a restart file, the dense square matrix used for covariance
//! and correlation, and the decoded snapshot/contents types. No I/O, no
//! logging — the decoding machinery lives in `restartkit-core`.

pub mod geometry;
pub mod matrix;
pub mod snapshot;

pub use geometry::RecordGeometry;
pub use matrix::SquareMatrix;
pub use snapshot::{
    RestartFileContents, RestartSnapshot, SamplerMethod, ScalarField, ScalarTable,
    MEAN_VEC_MARKER,
};
