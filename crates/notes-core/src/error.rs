//! Error types for loading and saving note records.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a single note file.
#[derive(Error, Debug)]
pub enum NoteRecordError {
    /// The note file does not exist.
    #[error("Note file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The note file is not valid UTF-8 text.
    #[error("Note file {} is not valid UTF-8", .0.display())]
    InvalidUtf8(PathBuf),

    /// Any other I/O failure on the note file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl NoteRecordError {
    pub(crate) fn from_io(path: PathBuf, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::InvalidData => Self::InvalidUtf8(path),
            _ => Self::Io { path, source },
        }
    }
}
