//! Decoder for sampler restart snapshot logs.
//!
//! A restart file is a fixed-geometry text encoding of proposal-adaptation
//! state: per update, four scalars, a mean vector, and the lower triangle
//! of the proposal covariance matrix. Nothing in the file states the
//! dimensionality or the record count — both are reverse-engineered from
//! the body, and every structural assumption is checked before it is used
//! so a misaligned geometry fails the decode instead of silently
//! corrupting every subsequent record.
//!
//! Data flows one way: raw text → normalized line sequence → inferred
//! geometry → per-record decode (with inline symmetric mirroring) →
//! correlation derivation → [`RestartFileContents`].
//!
//! [`RestartFileContents`]: restartkit_types::RestartFileContents

pub mod correlation;
pub mod decoder;
pub mod infer;
pub mod lines;
pub mod progress;
pub mod record;

pub use correlation::correlation_from_covariance;
pub use decoder::{decode, CancelToken, RestartDecoder};
pub use progress::{CollectingProgress, NoOpProgress, ProgressObserver};
pub use record::{decode_record, DecodedRecord};
