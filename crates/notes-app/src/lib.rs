//! Application layer for the notes CLI.
//!
//! This crate provides the note service, configuration, editor launching,
//! exporters and backups used by the `notes` binary.

pub mod backup;
mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod service;
pub mod store;
pub mod timestamp;

// Re-exports for convenience
pub use backup::BackupSummary;
pub use config::{ConfigOverrides, FileConfig, NotesConfig};
pub use editor::{CommandEditor, EditorLauncher, resolve_editor_command};
pub use error::{NoteError, Result};
pub use export::{CommandPdfRenderer, ExportFormat, ExportFormats, ExportedFile, PdfRenderer};
pub use service::{ExportTarget, NoteService, NoteSummary};
pub use store::NoteStore;
