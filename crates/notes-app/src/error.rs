//! Error taxonomy surfaced to the CLI.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use notes_core::NoteRecordError;
use notes_store_fs::StoreError;
use thiserror::Error;

/// Result type for note operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Errors raised by [`NoteService`](crate::NoteService) operations.
#[derive(Error, Debug)]
pub enum NoteError {
    /// The note does not exist.
    #[error("Note '{0}' not found.")]
    NotFound(String),

    /// A note with the same file name already exists.
    #[error("Note '{0}' already exists.")]
    AlreadyExists(String),

    /// The note file exists but is not UTF-8 text.
    #[error("Note file '{}' is not valid UTF-8 text.", .0.display())]
    InvalidUtf8(PathBuf),

    /// The configured editor binary could not be started.
    #[error("Editor '{0}' not found. Set the $EDITOR environment variable to a valid program.")]
    EditorUnavailable(String),

    /// The editor ran but exited unsuccessfully.
    #[error("Editor exited with {0}")]
    EditorFailed(ExitStatus),

    /// The HTML-to-PDF converter could not be started.
    #[error("PDF converter '{0}' not found. Set `pdf_command` in the config file to an installed program.")]
    PdfRendererUnavailable(String),

    /// The HTML-to-PDF converter exited unsuccessfully.
    #[error("PDF converter exited with {status}: {stderr}")]
    PdfRendererFailed {
        /// Exit status of the converter.
        status: ExitStatus,
        /// Captured standard error.
        stderr: String,
    },

    /// Export was requested without `--html` or `--pdf`.
    #[error("Choose at least one export format (--html and/or --pdf).")]
    NoExportFormat,

    /// An external command string could not be split into arguments.
    #[error("Invalid command '{command}': {reason}")]
    InvalidCommand {
        /// Command as configured.
        command: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Storage failure other than a missing or duplicate note.
    #[error(transparent)]
    Store(StoreError),

    /// I/O failure outside the notes directory.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backup archive could not be written.
    #[error("Failed to write backup archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Timestamp could not be formatted.
    #[error("Failed to format timestamp: {0}")]
    Time(#[from] time::error::Format),
}

impl NoteError {
    /// Whether the error is an expected outcome of user input that should be
    /// reported as a message rather than a failure of the process.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::AlreadyExists(_)
                | Self::InvalidUtf8(_)
                | Self::EditorUnavailable(_)
                | Self::EditorFailed(_)
                | Self::PdfRendererUnavailable(_)
                | Self::PdfRendererFailed { .. }
                | Self::NoExportFormat
                | Self::InvalidCommand { .. }
        )
    }
}

impl From<StoreError> for NoteError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(title) => Self::NotFound(title),
            StoreError::AlreadyExists(title) => Self::AlreadyExists(title),
            StoreError::Record(NoteRecordError::InvalidUtf8(path)) => Self::InvalidUtf8(path),
            other => Self::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_onto_taxonomy() {
        let err = NoteError::from(StoreError::NotFound("Ghost".into()));
        assert!(matches!(err, NoteError::NotFound(ref title) if title == "Ghost"));
        assert!(err.is_user_facing());

        let err = NoteError::from(StoreError::AlreadyExists("Plan".into()));
        assert_eq!(err.to_string(), "Note 'Plan' already exists.");
    }

    #[test]
    fn undecodable_note_is_user_facing() {
        let err = NoteError::from(StoreError::Record(NoteRecordError::InvalidUtf8("Cafe.md".into())));
        assert!(matches!(err, NoteError::InvalidUtf8(ref path) if path.as_os_str() == "Cafe.md"));
        assert!(err.is_user_facing());
    }

    #[test]
    fn io_errors_are_not_user_facing() {
        let err = NoteError::from(StoreError::Io(io::Error::other("disk on fire")));
        assert!(!err.is_user_facing());
    }
}
