//! Splitting user-configured command strings into program and arguments.

use crate::error::{NoteError, Result};

/// A parsed external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Split `raw` with shell quoting rules, e.g. `code --wait` or `"my editor" -f`.
pub(crate) fn parse_command(raw: &str) -> Result<ExternalCommand> {
    let mut parts = shell_words::split(raw).map_err(|err| NoteError::InvalidCommand {
        command: raw.to_owned(),
        reason: err.to_string(),
    })?;
    if parts.is_empty() {
        return Err(NoteError::InvalidCommand {
            command: raw.to_owned(),
            reason: "command is empty".to_owned(),
        });
    }
    let program = parts.remove(0);
    Ok(ExternalCommand { program, args: parts })
}
