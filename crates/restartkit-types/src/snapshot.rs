//! Decoded restart-file contents.
//!
//! One [`RestartSnapshot`] per proposal-adaptation update, collected into a
//! [`RestartFileContents`] together with a columnar [`ScalarTable`] view of
//! the four scalar fields. Fields are fixed and explicitly declared —
//! nothing here synthesizes field names at runtime.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::matrix::SquareMatrix;

/// Label line introducing the mean-vector block of every record. The
/// dimensionality inferrer matches the first occurrence of this token.
pub const MEAN_VEC_MARKER: &str = "meanVec";

// ---------------------------------------------------------------------------
// SamplerMethod
// ---------------------------------------------------------------------------

/// Sampler variants whose output the reader recognizes.
///
/// Only [`SamplerMethod::ParaDram`] has its restart record layout
/// implemented; requesting a decoder for the others is reported as an
/// unsupported-method error by `restartkit-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SamplerMethod {
    /// Delayed-rejection adaptive Metropolis-Hastings.
    ParaDram,
    /// Nested sampler (layout not implemented).
    ParaNest,
    /// Parallel tempering sampler (layout not implemented).
    ParaTemp,
}

impl SamplerMethod {
    /// Whether this method's restart record layout is implemented.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, Self::ParaDram)
    }

    /// Canonical method name as it appears in user-facing diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ParaDram => "ParaDRAM",
            Self::ParaNest => "ParaNest",
            Self::ParaTemp => "ParaTemp",
        }
    }
}

impl fmt::Display for SamplerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SamplerMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "paradram" => Ok(Self::ParaDram),
            "paranest" => Ok(Self::ParaNest),
            "paratemp" => Ok(Self::ParaTemp),
            other => Err(format!("unrecognized sampler method: '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// ScalarField
// ---------------------------------------------------------------------------

/// The four per-update scalar fields, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarField {
    /// Mean proposal acceptance rate since the start of the chain.
    MeanAcceptanceRate,
    /// Sample size at the adaptation point (stored as floating point).
    SampleSize,
    /// Log of the square root of the proposal covariance determinant.
    LogSqrtDeterminant,
    /// Squared adaptive scale factor of the proposal distribution.
    AdaptiveScaleFactorSquared,
}

impl ScalarField {
    /// All scalar fields in the order their values appear within a record.
    pub const ALL: [Self; 4] = [
        Self::MeanAcceptanceRate,
        Self::SampleSize,
        Self::LogSqrtDeterminant,
        Self::AdaptiveScaleFactorSquared,
    ];

    /// The verbatim label token used in the file.
    ///
    /// The first field's marker doubles as the per-record token the
    /// snapshot counter matches.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::MeanAcceptanceRate => "meanAcceptanceRateSinceStart",
            Self::SampleSize => "sampleSize",
            Self::LogSqrtDeterminant => "logSqrtDeterminant",
            Self::AdaptiveScaleFactorSquared => "adaptiveScaleFactorSquared",
        }
    }
}

// ---------------------------------------------------------------------------
// RestartSnapshot
// ---------------------------------------------------------------------------

/// One proposal-adaptation update decoded from a restart file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartSnapshot {
    /// Mean acceptance rate since the start of the chain.
    #[serde(rename = "meanAcceptanceRateSinceStart")]
    pub mean_acceptance_rate: f64,
    /// Sample size at the adaptation point.
    pub sample_size: f64,
    /// `log(sqrt(det(covMat)))` of the proposal covariance.
    pub log_sqrt_determinant: f64,
    /// Squared adaptive scale factor.
    pub adaptive_scale_factor_squared: f64,
    /// Proposal mean vector, length `d`.
    pub mean_vec: Vec<f64>,
    /// Proposal covariance matrix, symmetric by construction.
    pub cov_mat: SquareMatrix,
    /// Correlation matrix derived from `cov_mat`; unit diagonal.
    pub cor_mat: SquareMatrix,
}

impl RestartSnapshot {
    /// The named scalar field of this snapshot.
    #[must_use]
    pub fn scalar(&self, field: ScalarField) -> f64 {
        match field {
            ScalarField::MeanAcceptanceRate => self.mean_acceptance_rate,
            ScalarField::SampleSize => self.sample_size,
            ScalarField::LogSqrtDeterminant => self.log_sqrt_determinant,
            ScalarField::AdaptiveScaleFactorSquared => self.adaptive_scale_factor_squared,
        }
    }
}

// ---------------------------------------------------------------------------
// ScalarTable
// ---------------------------------------------------------------------------

/// Columnar view of the four scalar fields across all updates.
///
/// Index `k` in every column refers to the same update as `snapshots[k]`;
/// rows are only ever appended in decode order, which keeps the alignment
/// structural rather than checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScalarTable {
    #[serde(rename = "meanAcceptanceRateSinceStart")]
    mean_acceptance_rate: Vec<f64>,
    #[serde(rename = "sampleSize")]
    sample_size: Vec<f64>,
    #[serde(rename = "logSqrtDeterminant")]
    log_sqrt_determinant: Vec<f64>,
    #[serde(rename = "adaptiveScaleFactorSquared")]
    adaptive_scale_factor_squared: Vec<f64>,
}

impl ScalarTable {
    /// An empty table with room for `capacity` rows per column.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            mean_acceptance_rate: Vec::with_capacity(capacity),
            sample_size: Vec::with_capacity(capacity),
            log_sqrt_determinant: Vec::with_capacity(capacity),
            adaptive_scale_factor_squared: Vec::with_capacity(capacity),
        }
    }

    /// Append one update's scalars, in [`ScalarField::ALL`] order.
    pub fn push_row(&mut self, row: [f64; 4]) {
        self.mean_acceptance_rate.push(row[0]);
        self.sample_size.push(row[1]);
        self.log_sqrt_determinant.push(row[2]);
        self.adaptive_scale_factor_squared.push(row[3]);
    }

    /// The column for `field`.
    #[must_use]
    pub fn column(&self, field: ScalarField) -> &[f64] {
        match field {
            ScalarField::MeanAcceptanceRate => &self.mean_acceptance_rate,
            ScalarField::SampleSize => &self.sample_size,
            ScalarField::LogSqrtDeterminant => &self.log_sqrt_determinant,
            ScalarField::AdaptiveScaleFactorSquared => &self.adaptive_scale_factor_squared,
        }
    }

    /// Number of rows (updates).
    #[must_use]
    pub fn len(&self) -> usize {
        self.mean_acceptance_rate.len()
    }

    /// Whether the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mean_acceptance_rate.is_empty()
    }
}

// ---------------------------------------------------------------------------
// RestartFileContents
// ---------------------------------------------------------------------------

/// The fully decoded contents of one restart file.
///
/// Built once from an immutable text input and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestartFileContents {
    /// Sampling-space dimensionality `d` (>= 1).
    pub dimensionality: usize,
    /// Decoded updates, in file order (length >= 1).
    pub snapshots: Vec<RestartSnapshot>,
    /// Columnar scalar view, positionally aligned with `snapshots`.
    pub scalar_table: ScalarTable,
}

impl RestartFileContents {
    /// Number of decoded snapshots.
    #[must_use]
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }
}
