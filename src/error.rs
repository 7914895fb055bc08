//! Error types for unoutline library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading documents or configuring the
/// outline pipeline.
///
/// The classification pipeline itself never fails; these errors come from
/// the edges (file I/O, PDF decoding, span dumps, rule configuration).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// A span dump could not be deserialized.
    #[error("Invalid span dump: {0}")]
    SpanDump(#[from] serde_json::Error),

    /// A cue or noise pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// No span source is registered for the file extension.
    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    /// The input path does not exist or is not a directory.
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
