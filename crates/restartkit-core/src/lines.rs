//! Line normalization and numeric parsing.
//!
//! Restart files may carry DOS line terminators; all carriage returns are
//! stripped before splitting so that line indices are terminator-agnostic
//! and the geometry arithmetic never has to care.

use std::borrow::Cow;

use restartkit_error::{RestartError, Result};

/// Strip every carriage-return character from `raw`.
///
/// Borrows when the input contains none (the common case on Unix).
#[must_use]
pub fn normalize(raw: &str) -> Cow<'_, str> {
    if raw.contains('\r') {
        Cow::Owned(raw.replace('\r', ""))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Split normalized text into its line sequence.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Whether `line` parses as a single numeric value.
///
/// This is the non-failing probe used by dimensionality inference; label
/// and blank lines are simply "not numeric".
#[must_use]
pub fn is_numeric(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// Parse one line as `f64`, or fail with a corruption error naming the
/// 0-based line index and the offending text.
pub fn parse_numeric(line: &str, line_no: usize) -> Result<f64> {
    line.trim().parse::<f64>().map_err(|_| {
        RestartError::corrupt(
            line_no,
            format!("expected a numeric value, found '{}'", line.trim()),
        )
    })
}
