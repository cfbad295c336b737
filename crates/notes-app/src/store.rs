//! Storage seam used by [`NoteService`](crate::NoteService).

use std::path::PathBuf;

use notes_core::Note;
use notes_store_fs::{FsStore, NoteEntry, StoreError};

use crate::error::NoteError;

/// Minimal storage abstraction required by [`NoteService`](crate::NoteService).
pub trait NoteStore {
    /// Error type bubbled up from the backing store.
    type Error: Into<NoteError>;

    /// Where the note called `title` lives (whether or not it exists).
    fn path_for(&self, title: &str) -> PathBuf;

    /// Whether a note called `title` exists.
    fn exists(&self, title: &str) -> bool;

    /// Create a note that must not exist yet.
    ///
    /// # Errors
    /// Returns a store-specific error when the note exists or cannot be written.
    fn create(&self, title: &str, content: &str) -> Result<PathBuf, Self::Error>;

    /// Load the note called `title`.
    ///
    /// # Errors
    /// Returns a store-specific error when the note is missing or unreadable.
    fn read(&self, title: &str) -> Result<Note, Self::Error>;

    /// Load the note behind a listed entry.
    ///
    /// # Errors
    /// Returns a store-specific error when the note is missing or unreadable.
    fn read_entry(&self, entry: &NoteEntry) -> Result<Note, Self::Error>;

    /// Overwrite a note with its rendered contents.
    ///
    /// # Errors
    /// Returns a store-specific error when the note cannot be written.
    fn write(&self, note: &Note) -> Result<(), Self::Error>;

    /// Delete the note called `title`.
    ///
    /// # Errors
    /// Returns a store-specific error when the note is missing or cannot be removed.
    fn delete(&self, title: &str) -> Result<(), Self::Error>;

    /// Enumerate every note, sorted by path.
    ///
    /// # Errors
    /// Returns a store-specific error when listing fails.
    fn list(&self) -> Result<Vec<NoteEntry>, Self::Error>;
}

impl NoteStore for FsStore {
    type Error = StoreError;

    fn path_for(&self, title: &str) -> PathBuf {
        Self::path_for(self, title)
    }

    fn exists(&self, title: &str) -> bool {
        Self::exists(self, title)
    }

    fn create(&self, title: &str, content: &str) -> Result<PathBuf, Self::Error> {
        Self::create(self, title, content)
    }

    fn read(&self, title: &str) -> Result<Note, Self::Error> {
        Self::read(self, title)
    }

    fn read_entry(&self, entry: &NoteEntry) -> Result<Note, Self::Error> {
        Note::load(&entry.path).map_err(StoreError::Record)
    }

    fn write(&self, note: &Note) -> Result<(), Self::Error> {
        Self::write(self, note)
    }

    fn delete(&self, title: &str) -> Result<(), Self::Error> {
        Self::delete(self, title)
    }

    fn list(&self) -> Result<Vec<NoteEntry>, Self::Error> {
        Self::list(self)
    }
}
