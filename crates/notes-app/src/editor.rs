//! Launching the user's text editor on a note file.

use std::env;
use std::io;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::command::parse_command;
use crate::error::{NoteError, Result};

const DEFAULT_EDITOR: &str = "nvim";
const EDITOR_ENV_VARS: [&str; 3] = ["NOTES_EDITOR", "VISUAL", "EDITOR"];

/// Opens a file for interactive editing and blocks until the user is done.
pub trait EditorLauncher {
    /// Edit the file at `path`.
    ///
    /// # Errors
    /// Returns [`NoteError::EditorUnavailable`] when the editor cannot be
    /// started and [`NoteError::EditorFailed`] when it exits unsuccessfully.
    fn open(&self, path: &Path) -> Result<()>;
}

/// Pick the editor command: configured value, then `$NOTES_EDITOR`,
/// `$VISUAL`, `$EDITOR`, and finally `nvim`.
#[must_use]
pub fn resolve_editor_command(configured: Option<&str>) -> String {
    resolve_editor_command_with(configured, |key| env::var(key).ok())
}

fn resolve_editor_command_with<F>(configured: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    configured
        .map(str::to_owned)
        .or_else(|| {
            EDITOR_ENV_VARS
                .iter()
                .find_map(|&key| lookup(key).filter(|value| !value.trim().is_empty()))
        })
        .unwrap_or_else(|| DEFAULT_EDITOR.to_owned())
}

/// Editor started as a child process with the note path as its last argument.
#[derive(Debug, Clone)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    /// Use `command` verbatim, e.g. `code --wait`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Resolve the editor from configuration and the environment.
    #[must_use]
    pub fn from_config(configured: Option<&str>) -> Self {
        Self::new(resolve_editor_command(configured))
    }

    /// Command line this editor runs.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl EditorLauncher for CommandEditor {
    fn open(&self, path: &Path) -> Result<()> {
        let cmd = parse_command(&self.command)?;
        debug!(editor = %cmd.program, path = %path.display(), "launching editor");
        let status = match Command::new(&cmd.program).args(&cmd.args).arg(path).status() {
            Ok(status) => status,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(NoteError::EditorUnavailable(cmd.program));
            }
            Err(err) => return Err(err.into()),
        };
        if !status.success() {
            return Err(NoteError::EditorFailed(status));
        }
        Ok(())
    }
}
