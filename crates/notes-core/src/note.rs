use std::fs;
use std::path::{Path, PathBuf};

use crate::error::NoteRecordError;
use crate::marker::{self, render_marker, strip_marker};
use crate::status::Status;

/// File extension shared by every note.
pub const NOTE_EXTENSION: &str = "md";

/// File name for a note title: spaces become underscores, `.md` is appended.
///
/// The mapping is lossy: `"a b"` and `"a_b"` share a file name.
#[must_use]
pub fn file_name_for(title: &str) -> String {
    format!("{title}.{NOTE_EXTENSION}").replace(' ', "_")
}

/// Path of the note called `title` inside `dir`.
#[must_use]
pub fn derive_path(dir: &Path, title: &str) -> PathBuf {
    dir.join(file_name_for(title))
}

/// Recover a display title from a note path (underscores read back as spaces).
#[must_use]
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Whether `path` names a note file.
#[must_use]
pub fn is_note_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTE_EXTENSION)
}

/// Initial text of a note created from `title`.
#[must_use]
pub fn new_note_content(title: &str) -> String {
    Note::new(Path::new(""), title).render()
}

/// One note: title, file location, status, and raw Markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Human-readable title.
    pub title: String,
    /// Location on disk.
    pub path: PathBuf,
    /// Current status.
    pub status: Status,
    /// Raw text. A loaded body still carries its marker line, see [`Note::render`].
    pub body: String,
}

impl Note {
    /// Build a fresh note under `dir` with the default status and a level-1 heading.
    #[must_use]
    pub fn new(dir: &Path, title: &str) -> Self {
        Self {
            title: title.to_owned(),
            path: derive_path(dir, title),
            status: Status::default(),
            body: format!("# {title}\n\n"),
        }
    }

    /// Build a note from text that was read elsewhere.
    #[must_use]
    pub fn from_text(path: PathBuf, text: String) -> Self {
        Self {
            title: title_from_path(&path),
            status: marker::extract_status(&text),
            path,
            body: text,
        }
    }

    /// Read a note from disk.
    ///
    /// # Errors
    /// Returns [`NoteRecordError::NotFound`] when the file is missing,
    /// [`NoteRecordError::InvalidUtf8`] when it is not UTF-8 text and
    /// [`NoteRecordError::Io`] for any other read failure.
    pub fn load(path: &Path) -> Result<Self, NoteRecordError> {
        let text =
            fs::read_to_string(path).map_err(|err| NoteRecordError::from_io(path.to_path_buf(), err))?;
        Ok(Self::from_text(path.to_path_buf(), text))
    }

    /// Change the status in memory and rewrite the marker in the body.
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.body = marker::set_status(&self.body, status);
    }

    /// File contents for this note: the marker line, then the body without
    /// leading whitespace or its own leading marker.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = render_marker(self.status);
        out.push_str(strip_marker(self.body.trim_start()).trim_start());
        out
    }

    /// Write the note to [`Note::path`], replacing any existing file.
    ///
    /// # Errors
    /// Returns [`NoteRecordError::Io`] when the file cannot be written.
    pub fn save(&self) -> Result<(), NoteRecordError> {
        fs::write(&self.path, self.render()).map_err(|source| NoteRecordError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn derive_path_replaces_spaces() {
        let path = derive_path(Path::new("/notes"), "Shopping List");
        assert_eq!(path, PathBuf::from("/notes/Shopping_List.md"));
    }

    #[test]
    fn title_from_path_reads_underscores_as_spaces() {
        assert_eq!(title_from_path(Path::new("/notes/Shopping_List.md")), "Shopping List");
        // Underscores in the original title do not survive the round trip.
        let path = derive_path(Path::new("/notes"), "snake_case notes");
        assert_eq!(title_from_path(&path), "snake case notes");
    }

    #[test]
    fn is_note_file_checks_extension() {
        assert!(is_note_file(Path::new("a.md")));
        assert!(!is_note_file(Path::new("a.md.bak")));
        assert!(!is_note_file(Path::new("README")));
    }

    #[test]
    fn new_note_content_has_marker_and_heading() {
        assert_eq!(new_note_content("Shopping List"), "<!-- status: open -->\n# Shopping List\n\n");
    }

    #[test]
    fn load_missing_file_is_not_found() -> TestResult {
        let dir = tempdir()?;
        let err = Note::load(&dir.path().join("missing.md")).err();
        assert!(matches!(err, Some(NoteRecordError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn load_latin1_file_is_invalid_utf8() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("Cafe.md");
        fs::write(&path, b"# Caf\xe9\n")?;
        let err = Note::load(&path).err();
        assert!(matches!(err, Some(NoteRecordError::InvalidUtf8(ref p)) if *p == path));
        Ok(())
    }

    #[test]
    fn load_without_marker_defaults_to_open() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("Plain.md");
        fs::write(&path, "# Plain\n")?;
        let note = Note::load(&path)?;
        assert_eq!(note.title, "Plain");
        assert_eq!(note.status, Status::Open);
        assert_eq!(note.body, "# Plain\n");
        Ok(())
    }

    #[test]
    fn status_change_roundtrips_through_disk() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("Groceries.md");
        fs::write(&path, "<!-- status: open -->\nbuy milk\n")?;

        let mut note = Note::load(&path)?;
        note.set_status(Status::Done);
        note.save()?;

        assert_eq!(fs::read_to_string(&path)?, "<!-- status: done -->\nbuy milk\n");
        assert_eq!(Note::load(&path)?.status, Status::Done);
        Ok(())
    }

    #[test]
    fn save_writes_marker_when_body_has_none() -> TestResult {
        let dir = tempdir()?;
        let mut note = Note::new(dir.path(), "Ideas");
        note.status = Status::InProgress;
        note.body = "\n\n# Ideas\n- one\n".into();
        note.save()?;

        let written = fs::read_to_string(dir.path().join("Ideas.md"))?;
        assert_eq!(written, "<!-- status: in progress -->\n# Ideas\n- one\n");
        Ok(())
    }

    #[test]
    fn render_drops_marker_after_leading_blank_lines() {
        let mut note = Note::new(Path::new("/notes"), "Spaced");
        note.body = "\n\n<!-- status: open -->\nx\n".into();
        note.status = Status::Done;
        assert_eq!(note.render(), "<!-- status: done -->\nx\n");
    }

    #[test]
    fn save_overwrites_existing_file() -> TestResult {
        let dir = tempdir()?;
        let note = Note::new(dir.path(), "Todo");
        fs::write(&note.path, "stale")?;
        note.save()?;
        assert_eq!(fs::read_to_string(&note.path)?, "<!-- status: open -->\n# Todo\n\n");
        Ok(())
    }
}
