//! Public API facade for RestartKit.
//!
//! Re-exports the data model, error type, and decoder, and adds the
//! path-aware entry points that bind decode failures to the file they
//! came from.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub use restartkit_core::{
    correlation_from_covariance, decode, CancelToken, CollectingProgress, NoOpProgress,
    ProgressObserver, RestartDecoder,
};
pub use restartkit_error::{RestartError, Result};
pub use restartkit_types::{
    RecordGeometry, RestartFileContents, RestartSnapshot, SamplerMethod, ScalarField,
    ScalarTable, SquareMatrix, MEAN_VEC_MARKER,
};

/// Read and decode a ParaDRAM restart file.
///
/// # Errors
///
/// `FileNotFound` / `Io` for filesystem failures; otherwise the decode
/// errors of [`RestartDecoder::decode`], with structural corruption
/// rebound to [`RestartError::CorruptFile`] naming `path`.
pub fn read_restart_file(path: impl AsRef<Path>) -> Result<RestartFileContents> {
    read_restart_file_with(path, SamplerMethod::ParaDram)
}

/// Read and decode a restart file produced by `method`.
///
/// # Errors
///
/// See [`read_restart_file`]; additionally `UnsupportedMethod` if the
/// method's record layout is not implemented.
pub fn read_restart_file_with(
    path: impl AsRef<Path>,
    method: SamplerMethod,
) -> Result<RestartFileContents> {
    let path = path.as_ref();
    let raw = load_restart_text(path)?;
    RestartDecoder::new(method)?
        .decode(&raw)
        .map_err(|err| err.in_file(path, method.name()))
}

/// Read a restart file into memory as UTF-8 text.
///
/// Callers that need a configured [`RestartDecoder`] (progress observer,
/// cancellation) load the text here, decode it themselves, and rebind
/// structural errors with [`RestartError::in_file`].
///
/// # Errors
///
/// `FileNotFound` if the path does not exist; `Io` for any other
/// filesystem failure.
pub fn load_restart_text(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            RestartError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RestartError::Io(err)
        }
    })
}
