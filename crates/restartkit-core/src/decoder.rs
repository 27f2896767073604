//! Decode orchestration.
//!
//! Ties the structural inference, geometry, per-record extraction, and
//! correlation derivation together: normalize lines → infer `d` → count
//! `n` → build geometry → cross-check the available line count → decode
//! each record. Every failure aborts the whole decode; partial results
//! are never returned.
//!
//! Decoding is a single pass over an immutable buffer. Record `k` depends
//! only on the geometry and the line sequence, so per-record decoding
//! could be parallelized into pre-sized output slots; the sequential loop
//! here is the correctness baseline and keeps the progress stream
//! strictly ordered.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use restartkit_error::{RestartError, Result};
use restartkit_types::{
    RecordGeometry, RestartFileContents, RestartSnapshot, SamplerMethod, ScalarTable,
};

use crate::correlation::correlation_from_covariance;
use crate::infer::{count_snapshots, infer_dimensionality};
use crate::lines::{normalize, split_lines};
use crate::progress::{progress_stride, NoOpProgress, ProgressObserver};
use crate::record::decode_record;

// ---------------------------------------------------------------------------
// CancelToken
// ---------------------------------------------------------------------------

/// Cooperative cancellation handle for a running decode.
///
/// Cloneable; all clones share one flag. The decoder checks the flag
/// between records, so cancellation latency is bounded by one record's
/// decode time.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the decode holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// RestartDecoder
// ---------------------------------------------------------------------------

/// Decoder for restart snapshot logs of one sampler method.
pub struct RestartDecoder {
    method: SamplerMethod,
    observer: Box<dyn ProgressObserver>,
    cancel: Option<CancelToken>,
}

impl std::fmt::Debug for RestartDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestartDecoder")
            .field("method", &self.method)
            .field("observer", &"<dyn ProgressObserver>")
            .field("cancel", &self.cancel)
            .finish()
    }
}

impl RestartDecoder {
    /// Build a decoder for `method`.
    ///
    /// # Errors
    ///
    /// `UnsupportedMethod` unless the method's record layout is
    /// implemented (currently only ParaDRAM).
    pub fn new(method: SamplerMethod) -> Result<Self> {
        if !method.is_supported() {
            return Err(RestartError::unsupported_method(method.name()));
        }
        Ok(Self {
            method,
            observer: Box::new(NoOpProgress),
            cancel: None,
        })
    }

    /// Attach a progress observer. Replaces the no-op default.
    #[must_use]
    pub fn with_observer(mut self, observer: Box<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Attach a cancellation token checked between records.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The sampler method this decoder was built for.
    #[must_use]
    pub fn method(&self) -> SamplerMethod {
        self.method
    }

    /// Decode a full restart text blob.
    ///
    /// # Errors
    ///
    /// - `Corrupt` for any structural violation (missing markers, zero
    ///   dimensionality or count, too few lines in the file, non-numeric lines).
    /// - `DegenerateCovariance` if a record's covariance diagonal is not
    ///   strictly positive.
    /// - `Interrupted` if the cancel token fires between records.
    pub fn decode(&self, raw: &str) -> Result<RestartFileContents> {
        let text = normalize(raw);
        let lines = split_lines(&text);

        let dim = infer_dimensionality(&lines)?;
        let count = count_snapshots(&text)?;
        let geometry = RecordGeometry::new(dim);
        debug!(
            method = %self.method,
            dim,
            count,
            skip = geometry.skip(),
            "restart geometry resolved"
        );

        // The marker count promises `count` full records; verify the line
        // count up front so a truncated tail fails here with a precise
        // diagnostic instead of mid-record.
        let required = geometry.lines_required(count);
        if lines.len() < required {
            return Err(RestartError::corrupt(
                lines.len(),
                format!(
                    "{count} records of {} lines need {required} lines, file has {}",
                    geometry.skip(),
                    lines.len()
                ),
            ));
        }

        let stride = progress_stride(count);
        let mut snapshots = Vec::with_capacity(count);
        let mut scalar_table = ScalarTable::with_capacity(count);

        for index in 0..count {
            if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
                return Err(RestartError::Interrupted);
            }

            let record = decode_record(&lines, &geometry, index)?;
            let cor_mat = correlation_from_covariance(&record.cov_mat)?;

            scalar_table.push_row(record.scalars);
            snapshots.push(RestartSnapshot {
                mean_acceptance_rate: record.scalars[0],
                sample_size: record.scalars[1],
                log_sqrt_determinant: record.scalars[2],
                adaptive_scale_factor_squared: record.scalars[3],
                mean_vec: record.mean_vec,
                cov_mat: record.cov_mat,
                cor_mat,
            });

            let completed = index + 1;
            if completed % stride == 0 {
                self.observer.on_progress(completed, count);
            }
        }

        // Guarantee a final (n, n) notification without duplicating one
        // the stride already produced.
        if count % stride != 0 {
            self.observer.on_progress(count, count);
        }

        info!(method = %self.method, dim, count, "restart decode complete");
        Ok(RestartFileContents {
            dimensionality: dim,
            snapshots,
            scalar_table,
        })
    }
}

/// Decode with the default configuration: ParaDRAM, no observer, no
/// cancellation.
///
/// # Errors
///
/// See [`RestartDecoder::decode`].
pub fn decode(raw: &str) -> Result<RestartFileContents> {
    RestartDecoder::new(SamplerMethod::ParaDram)?.decode(raw)
}
