//! Error type for case opening.
//!
//! Opening a case file is the only fallible operation busdiff performs;
//! whether a failure aborts the whole run (BASE) or just one scenario is
//! the caller's decision, not encoded here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a case file could not be opened.
#[derive(Error, Debug)]
pub enum CaseError {
    /// The file could not be read at all
    #[error("reading case '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is structurally not a readable RAW case
    #[error("parsing case '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    /// Requested RAW revision outside the supported span (29..=35)
    #[error("unsupported RAW version {version}; supported versions are 29..=35")]
    UnsupportedVersion { version: u32 },
}

/// Convenience alias for Results using [`CaseError`].
pub type CaseResult<T> = Result<T, CaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_file() {
        let err = CaseError::Parse {
            path: PathBuf::from("cases/peak.raw"),
            message: "bus data not terminated".into(),
        };
        let text = err.to_string();
        assert!(text.contains("peak.raw"));
        assert!(text.contains("bus data not terminated"));
    }

    #[test]
    fn test_unsupported_version_display() {
        let err = CaseError::UnsupportedVersion { version: 23 };
        assert!(err.to_string().contains("23"));
        assert!(err.to_string().contains("29..=35"));
    }
}
