//! Zip archives of the notes directory.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use tracing::debug;
use zip::CompressionMethod;
use zip::write::{FileOptions, ZipWriter};

use crate::error::Result;
use crate::timestamp::format_compact;

/// Outcome of a backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    /// Archive written.
    pub path: PathBuf,
    /// Number of notes stored in it.
    pub count: usize,
}

/// `notes_backup_YYYYMMDD_HHMMSS.zip` for the given moment.
///
/// # Errors
/// Returns an error if the timestamp cannot be formatted.
pub fn backup_file_name(at: OffsetDateTime) -> Result<String> {
    Ok(format!("notes_backup_{}.zip", format_compact(at)?))
}

/// Write `files` into a new zip at `dest`, each under its bare file name.
/// An existing archive at `dest` is replaced. The archive is assembled in a
/// temporary file next to `dest` and only moved into place once complete.
///
/// # Errors
/// Returns an error if a note cannot be read or the archive cannot be written.
pub fn write_archive(files: &[PathBuf], dest: &Path) -> Result<BackupSummary> {
    let dir = dest
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let staging = tempfile::Builder::new()
        .prefix(".notes_backup-")
        .suffix(".zip.tmp")
        .tempfile_in(dir)?;
    let mut zip = ZipWriter::new(staging);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut count = 0;
    for file in files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let contents = fs::read(file)?;
        zip.start_file(name.to_string_lossy(), options)?;
        zip.write_all(&contents)?;
        count += 1;
    }
    zip.finish()?.persist(dest).map_err(|err| err.error)?;

    debug!(path = %dest.display(), count, "wrote backup archive");
    Ok(BackupSummary {
        path: dest.to_path_buf(),
        count,
    })
}
