/// Crate-level errors
use crate::format::FormatError;
use crate::trace::TraceError;
use thiserror::Error;

/// Errors that stop a session from starting or continuing.
///
/// Failures to deliver a single record are not represented here; the
/// coordinator logs and counts them instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid format: {0}")]
    Format(#[from] FormatError),

    #[error("a coordinator is already active in this process")]
    AlreadyActive,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
