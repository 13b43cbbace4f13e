use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use uwu_elaborator::TypeError;

/// Errors around the driving of compilation itself, not any one unit's
/// contents.
#[derive(Error, Diagnostic, Debug)]
pub enum DriverError {
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid glob pattern `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("failed to read a glob match: {0}")]
    GlobEntry(#[from] glob::GlobError),
}

/// Every error a compilation unit can abort with, gathered under one
/// diagnostic so callers can render a mix of parse/type/codegen/driver
/// failures uniformly.
#[derive(Error, Diagnostic, Debug)]
#[diagnostic(transparent)]
#[error(transparent)]
pub enum Error {
    Parse(#[from] uwu_parser::ParseError),
    Type(#[from] Box<TypeError>),
    Backend(#[from] uwu_backend::BackendError),
    Driver(#[from] DriverError),
}

impl From<TypeError> for Error {
    fn from(err: TypeError) -> Self {
        Error::Type(Box::new(err))
    }
}
