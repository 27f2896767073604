use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for RestartKit operations.
///
/// Structured variants for the conditions a decode can hit. All decode
/// failures are unrecoverable for the attempt: a misaligned geometry would
/// silently corrupt every subsequent record, so nothing is skipped and no
/// partial result is ever returned. Propagation is via `Result` — callers
/// in different contexts (CLI vs. library) decide how to present it.
#[derive(Error, Debug)]
pub enum RestartError {
    /// Restart file not found on disk.
    #[error("restart file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structural corruption detected while decoding a text blob.
    ///
    /// `line` is the 0-based index of the offending (or first missing)
    /// line. Raised for: missing marker tokens, zero inferred
    /// dimensionality, zero snapshot count, a non-numeric value where a
    /// number was expected, or a line sequence exhausted before a full
    /// record.
    #[error("restart structure mismatch at line {line}: {detail}")]
    Corrupt { line: usize, detail: String },

    /// Structural corruption bound to a file on disk.
    ///
    /// The path-aware form of [`RestartError::Corrupt`], produced by the
    /// file-reading layer so the failure surface names the offending file.
    #[error(
        "the structure of '{path}' does not match a {method} restart file: {detail}; \
         the contents of the file may have been compromised"
    )]
    CorruptFile {
        path: PathBuf,
        method: String,
        detail: String,
    },

    /// Correlation derivation hit a non-positive covariance diagonal entry.
    #[error("degenerate covariance: diagonal entry {index} is {value}, expected > 0")]
    DegenerateCovariance { index: usize, value: f64 },

    /// Decoder requested for a sampler variant whose record layout is not
    /// implemented.
    #[error("restart decoding is not implemented for the {method} sampler")]
    UnsupportedMethod { method: String },

    /// The decode was cancelled cooperatively between records.
    #[error("restart decode interrupted")]
    Interrupted,
}

impl RestartError {
    /// Create a structural-corruption error.
    pub fn corrupt(line: usize, detail: impl Into<String>) -> Self {
        Self::Corrupt {
            line,
            detail: detail.into(),
        }
    }

    /// Create an unsupported-method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Rebind a structural [`RestartError::Corrupt`] to the file it came
    /// from. Every other variant passes through unchanged.
    #[must_use]
    pub fn in_file(self, path: impl Into<PathBuf>, method: impl Into<String>) -> Self {
        match self {
            Self::Corrupt { line, detail } => Self::CorruptFile {
                path: path.into(),
                method: method.into(),
                detail: format!("line {line}: {detail}"),
            },
            other => other,
        }
    }

    /// Whether this error reports structural corruption of the input.
    #[must_use]
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::Corrupt { .. } | Self::CorruptFile { .. })
    }

    /// Process exit code for this error (for CLI use).
    ///
    /// Code 2 is reserved for command-line usage errors and never produced
    /// here.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Corrupt { .. }
            | Self::CorruptFile { .. }
            | Self::DegenerateCovariance { .. } => 1,
            Self::UnsupportedMethod { .. } => 3,
            Self::Interrupted => 4,
            Self::FileNotFound { .. } | Self::Io(_) => 5,
        }
    }
}

/// Result type alias using `RestartError`.
pub type Result<T> = std::result::Result<T, RestartError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn corrupt_display_names_line() {
        let err = RestartError::corrupt(42, "expected a numeric value, found 'covMat'");
        assert_eq!(
            err.to_string(),
            "restart structure mismatch at line 42: expected a numeric value, found 'covMat'"
        );
    }

    #[test]
    fn in_file_rebinds_corrupt() {
        let err = RestartError::corrupt(7, "mean-vector marker not found")
            .in_file("/tmp/run_restart.txt", "ParaDRAM");
        match &err {
            RestartError::CorruptFile {
                path,
                method,
                detail,
            } => {
                assert_eq!(path, Path::new("/tmp/run_restart.txt"));
                assert_eq!(method, "ParaDRAM");
                assert_eq!(detail, "line 7: mean-vector marker not found");
            }
            other => panic!("expected CorruptFile, got {other:?}"),
        }
        let rendered = err.to_string();
        assert!(rendered.contains("/tmp/run_restart.txt"));
        assert!(rendered.contains("does not match a ParaDRAM restart file"));
    }

    #[test]
    fn in_file_passes_other_variants_through() {
        let err = RestartError::Interrupted.in_file("x", "ParaDRAM");
        assert!(matches!(err, RestartError::Interrupted));
    }

    #[test]
    fn degenerate_covariance_display() {
        let err = RestartError::DegenerateCovariance {
            index: 1,
            value: -0.5,
        };
        assert_eq!(
            err.to_string(),
            "degenerate covariance: diagonal entry 1 is -0.5, expected > 0"
        );
    }

    #[test]
    fn unsupported_method_display() {
        let err = RestartError::unsupported_method("ParaNest");
        assert_eq!(
            err.to_string(),
            "restart decoding is not implemented for the ParaNest sampler"
        );
    }

    #[test]
    fn corruption_classification() {
        assert!(RestartError::corrupt(0, "x").is_corruption());
        assert!(
            RestartError::corrupt(0, "x")
                .in_file("f", "ParaDRAM")
                .is_corruption()
        );
        assert!(!RestartError::Interrupted.is_corruption());
        assert!(
            !RestartError::DegenerateCovariance {
                index: 0,
                value: 0.0
            }
            .is_corruption()
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(RestartError::corrupt(0, "x").exit_code(), 1);
        assert_eq!(
            RestartError::DegenerateCovariance {
                index: 0,
                value: 0.0
            }
            .exit_code(),
            1
        );
        assert_eq!(RestartError::unsupported_method("ParaTemp").exit_code(), 3);
        assert_eq!(RestartError::Interrupted.exit_code(), 4);
        assert_eq!(
            RestartError::FileNotFound {
                path: PathBuf::from("missing")
            }
            .exit_code(),
            5
        );
    }

    #[test]
    fn io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RestartError = io_err.into();
        assert!(matches!(err, RestartError::Io(_)));
        assert_eq!(err.exit_code(), 5);
    }
}
