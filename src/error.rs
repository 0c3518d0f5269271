//! Error taxonomy (§4.10): usage, I/O, input-format, and internal-invariant
//! failures, each reported with enough context to act on.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("format error at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
