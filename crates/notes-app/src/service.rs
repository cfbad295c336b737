//! Note operations shared by every command.

use std::path::{Path, PathBuf};

use notes_core::{Note, Status, new_note_content};
use notes_store_fs::NoteEntry;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::backup::{self, BackupSummary};
use crate::editor::EditorLauncher;
use crate::error::{NoteError, Result};
use crate::export::{self, ExportFormats, ExportedFile, PdfRenderer};
use crate::store::NoteStore;
use crate::timestamp;

/// A row of the note listing.
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    /// Title recovered from the file name.
    pub title: String,
    /// Status read from the marker.
    pub status: Status,
    /// Location of the note file.
    pub path: PathBuf,
    /// RFC 3339 timestamp of the last modification.
    pub modified_rfc3339: String,
    #[serde(skip)]
    modified: OffsetDateTime,
}

impl NoteSummary {
    /// Last modification time in the local offset.
    #[must_use]
    pub const fn modified(&self) -> OffsetDateTime {
        self.modified
    }
}

/// Which notes an export covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// A single note by title.
    Single(String),
    /// Every note in the directory.
    All,
}

/// Service façade that encapsulates all note-related side effects.
pub struct NoteService<S, E, P> {
    store: S,
    editor: E,
    pdf: P,
    export_dir: PathBuf,
}

impl<S, E, P> NoteService<S, E, P> {
    /// Construct a service writing exports and backups into `export_dir`.
    #[must_use]
    pub const fn new(store: S, editor: E, pdf: P, export_dir: PathBuf) -> Self {
        Self {
            store,
            editor,
            pdf,
            export_dir,
        }
    }

    /// Directory receiving exports and backups.
    #[must_use]
    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

impl<S: NoteStore, E: EditorLauncher, P: PdfRenderer> NoteService<S, E, P> {
    /// Create a note with the default status and a heading, without opening it.
    ///
    /// # Errors
    /// Returns [`NoteError::AlreadyExists`] when a note with the same file name exists.
    pub fn create(&self, title: &str) -> Result<PathBuf> {
        let path = self
            .store
            .create(title, &new_note_content(title))
            .map_err(Into::into)?;
        info!(title, path = %path.display(), "created note");
        Ok(path)
    }

    /// Open a note file in the editor and wait for it to exit.
    ///
    /// # Errors
    /// Returns [`NoteError::EditorUnavailable`] or [`NoteError::EditorFailed`].
    pub fn open_in_editor(&self, path: &Path) -> Result<()> {
        self.editor.open(path)
    }

    /// Open an existing note in the editor.
    ///
    /// # Errors
    /// Returns [`NoteError::NotFound`] for unknown titles, plus any editor error.
    pub fn edit(&self, title: &str) -> Result<()> {
        if !self.store.exists(title) {
            return Err(NoteError::NotFound(title.to_owned()));
        }
        self.editor.open(&self.store.path_for(title))
    }

    /// Delete a note permanently.
    ///
    /// # Errors
    /// Returns [`NoteError::NotFound`] for unknown titles.
    pub fn delete(&self, title: &str) -> Result<()> {
        self.store.delete(title).map_err(Into::into)?;
        info!(title, "deleted note");
        Ok(())
    }

    /// Summaries of every note, optionally restricted to one status.
    ///
    /// # Errors
    /// Returns an error when the directory or a note cannot be read.
    pub fn list(&self, status: Option<Status>) -> Result<Vec<NoteSummary>> {
        let entries = self.store.list().map_err(Into::into)?;
        let mut summaries = Vec::with_capacity(entries.len());
        for entry in entries {
            let Some(note) = self.read_listed(&entry)? else {
                continue;
            };
            if status.is_some_and(|wanted| wanted != note.status) {
                continue;
            }
            let modified = timestamp::from_system_time(entry.modified);
            summaries.push(NoteSummary {
                title: entry.title,
                status: note.status,
                path: entry.path,
                modified_rfc3339: timestamp::format_rfc3339(modified)?,
                modified,
            });
        }
        Ok(summaries)
    }

    /// Change a note's status and save it.
    ///
    /// # Errors
    /// Returns [`NoteError::NotFound`] for unknown titles.
    pub fn set_status(&self, title: &str, status: Status) -> Result<Note> {
        let mut note = self.store.read(title).map_err(Into::into)?;
        let previous = note.status;
        note.set_status(status);
        self.store.write(&note).map_err(Into::into)?;
        info!(title, from = %previous, to = %status, "updated status");
        Ok(note)
    }

    /// Export one note or all notes in the requested formats.
    ///
    /// # Errors
    /// Returns [`NoteError::NoExportFormat`] when no format is selected,
    /// [`NoteError::NotFound`] for an unknown title, and any write or
    /// rendering failure.
    pub fn export(&self, target: &ExportTarget, formats: ExportFormats) -> Result<Vec<ExportedFile>> {
        if formats.is_empty() {
            return Err(NoteError::NoExportFormat);
        }
        match target {
            ExportTarget::Single(title) => {
                let note = self.store.read(title).map_err(Into::into)?;
                export::export_note(title, &note.body, formats, &self.export_dir, &self.pdf)
            }
            ExportTarget::All => {
                let mut written = Vec::new();
                for entry in self.store.list().map_err(Into::into)? {
                    let Some(note) = self.read_listed(&entry)? else {
                        continue;
                    };
                    written.extend(export::export_note(
                        &entry.title,
                        &note.body,
                        formats,
                        &self.export_dir,
                        &self.pdf,
                    )?);
                }
                debug!(count = written.len(), "exported all notes");
                Ok(written)
            }
        }
    }

    /// Archive every note into a timestamped zip in the export directory.
    ///
    /// # Errors
    /// Returns an error when a note cannot be read or the archive cannot be written.
    pub fn backup(&self) -> Result<BackupSummary> {
        self.backup_at(timestamp::local_now())
    }

    /// Load a listed note; `None` (with a warning) when the file is not UTF-8 text.
    fn read_listed(&self, entry: &NoteEntry) -> Result<Option<Note>> {
        match self.store.read_entry(entry).map_err(Into::<NoteError>::into) {
            Ok(note) => Ok(Some(note)),
            Err(NoteError::InvalidUtf8(path)) => {
                warn!(path = %path.display(), "skipping note that is not valid UTF-8");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn backup_at(&self, at: OffsetDateTime) -> Result<BackupSummary> {
        let files: Vec<PathBuf> = self
            .store
            .list()
            .map_err(Into::into)?
            .into_iter()
            .map(|entry| entry.path)
            .collect();
        let dest = self.export_dir.join(backup::backup_file_name(at)?);
        let summary = backup::write_archive(&files, &dest)?;
        info!(path = %summary.path.display(), count = summary.count, "created backup");
        Ok(summary)
    }
}
