use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, editing or writing a single FITS file.
///
/// Every variant is fatal for the file that produced it; the batch
/// orchestrator counts it and moves on to the next file.
#[derive(Error, Debug)]
pub enum FitsError {
    #[error("unsupported file extension: {} (expected .fit, .fits or .fts)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("file contains more than one image HDU")]
    MultiImageUnsupported,

    #[error("keyword not found: {0}")]
    KeywordNotFound(String),

    #[error("duplicate keyword: {0}")]
    DuplicateKeyword(String),

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FitsError>;
