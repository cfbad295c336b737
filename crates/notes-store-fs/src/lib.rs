//! Flat-directory storage for notes: one `<Title_With_Underscores>.md` per note.

mod error;

pub use error::StoreError;

use notes_core::{Note, NoteRecordError, derive_path, is_note_file, title_from_path};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// A note file found while scanning the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    /// Title recovered from the file name.
    pub title: String,
    /// Full path of the file.
    pub path: PathBuf,
    /// Last modification time reported by the filesystem.
    pub modified: SystemTime,
}

/// Storage rooted at a single notes directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    /// Open the store, creating the directory when it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened notes directory");
        Ok(Self { dir })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path a note with `title` lives at.
    #[must_use]
    pub fn path_for(&self, title: &str) -> PathBuf {
        derive_path(&self.dir, title)
    }

    /// Whether a note with `title` exists.
    #[must_use]
    pub fn exists(&self, title: &str) -> bool {
        self.path_for(title).is_file()
    }

    /// Create a new note file with `content`.
    ///
    /// # Errors
    /// Returns [`StoreError::AlreadyExists`] if the file is already present.
    pub fn create(&self, title: &str, content: &str) -> Result<PathBuf> {
        let path = self.path_for(title);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(title.to_owned()));
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(content.as_bytes())?;
        debug!(path = %path.display(), "created note");
        Ok(path)
    }

    /// Load the note called `title`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when no such note exists.
    pub fn read(&self, title: &str) -> Result<Note> {
        let path = self.path_for(title);
        let mut note = Note::load(&path).map_err(|err| match err {
            NoteRecordError::NotFound(_) => StoreError::NotFound(title.to_owned()),
            other => StoreError::Record(other),
        })?;
        // Keep the caller's spelling; the file name cannot distinguish spaces from underscores.
        title.clone_into(&mut note.title);
        Ok(note)
    }

    /// Persist `note` at its path, replacing any previous contents.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(&self, note: &Note) -> Result<()> {
        note.save().map_err(StoreError::Record)?;
        debug!(path = %note.path.display(), status = %note.status, "saved note");
        Ok(())
    }

    /// Remove the note called `title`.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] when no such note exists.
    pub fn delete(&self, title: &str) -> Result<()> {
        let path = self.path_for(title);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "deleted note");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound(title.to_owned())),
            Err(err) => Err(err.into()),
        }
    }

    /// Every note file in the directory, sorted by path.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<NoteEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !is_note_file(&path) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                warn!(path = %path.display(), "skipping non-file entry with note extension");
                continue;
            }
            entries.push(NoteEntry {
                title: title_from_path(&path),
                modified: metadata.modified()?,
                path,
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }
}
