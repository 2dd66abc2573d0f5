use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TapError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot create {}: {source}", .path.display())]
    Create {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
    #[error("injection marker (REM INJECT HERE) not found in listing")]
    MarkerNotFound,
    #[error("{field} of {value} does not fit in a 16-bit field")]
    EncodingOverflow {
        field: &'static str,
        value: usize,
    },
}

/// Checks that `value` fits the 16-bit little-endian fields used throughout
/// the tape format.
pub(crate) fn fit_u16(field: &'static str, value: usize) -> Result<u16, TapError> {
    u16::try_from(value).map_err(|_| TapError::EncodingOverflow { field, value })
}
