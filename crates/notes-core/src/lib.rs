//! Note record model: status, status marker, and title-to-file mapping.

/// Error types for note file access.
pub mod error;
/// Status marker parsing and rendering.
pub mod marker;
/// The note record and its file naming.
pub mod note;
/// Status enumeration.
pub mod status;

pub use error::NoteRecordError;
pub use marker::{extract_status, set_status};
pub use note::{Note, derive_path, file_name_for, is_note_file, new_note_content, title_from_path};
pub use status::Status;
