//! Error types for notes directory operations.

use notes_core::NoteRecordError;
use thiserror::Error;

/// Errors that can occur during `FsStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No note with this title exists.
    #[error("Note '{0}' not found")]
    NotFound(String),

    /// A note with this title already exists.
    #[error("Note '{0}' already exists")]
    AlreadyExists(String),

    /// Reading or writing a note file failed.
    #[error(transparent)]
    Record(NoteRecordError),

    /// I/O operation on the notes directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
