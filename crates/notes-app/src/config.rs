//! Configuration resolved once per invocation from `config.toml` and command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

const CONFIG_DIR: &str = "notes";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_PDF_COMMAND: &str = "wkhtmltopdf";

/// Settings as written in `config.toml`. Every key is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Directory holding the note files.
    pub notes_dir: Option<PathBuf>,
    /// Directory receiving exports and backups.
    pub export_dir: Option<PathBuf>,
    /// Editor command, split with shell quoting rules.
    pub editor: Option<String>,
    /// HTML-to-PDF converter command.
    pub pdf_command: Option<String>,
}

impl FileConfig {
    /// Read a config file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// Values supplied on the command line, taking precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Explicit config file instead of the per-user default.
    pub config_file: Option<PathBuf>,
    /// Notes directory override.
    pub notes_dir: Option<PathBuf>,
    /// Export directory override.
    pub export_dir: Option<PathBuf>,
}

/// Resolved configuration, fixed for the lifetime of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesConfig {
    /// Directory holding the note files.
    pub notes_dir: PathBuf,
    /// Directory receiving exports and backups.
    pub export_dir: PathBuf,
    /// Editor command from the config file; the environment is consulted when unset.
    pub editor: Option<String>,
    /// HTML-to-PDF converter command.
    pub pdf_command: String,
}

impl NotesConfig {
    /// Resolve configuration from the config file and command-line overrides.
    ///
    /// # Errors
    /// Returns an error if the home or config directory cannot be determined,
    /// or the config file cannot be read or parsed.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("failed to resolve home directory"))?;
        let config_path = match overrides.config_file.clone() {
            Some(path) => path,
            None => default_config_path()?,
        };
        debug!(path = %config_path.display(), "loading configuration");
        let file = FileConfig::from_path(&config_path)?;
        Ok(Self::resolve(file, overrides, &home))
    }

    /// Combine file settings, overrides and defaults relative to `home`.
    #[must_use]
    pub fn resolve(file: FileConfig, overrides: ConfigOverrides, home: &Path) -> Self {
        let notes_dir = overrides
            .notes_dir
            .or(file.notes_dir)
            .map_or_else(|| default_notes_dir(home), |dir| expand_home(&dir, home));
        let export_dir = overrides
            .export_dir
            .or(file.export_dir)
            .map_or_else(|| default_export_dir(home), |dir| expand_home(&dir, home));
        Self {
            notes_dir,
            export_dir,
            editor: file.editor.filter(|editor| !editor.trim().is_empty()),
            pdf_command: file
                .pdf_command
                .filter(|command| !command.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PDF_COMMAND.to_owned()),
        }
    }

    /// Create the notes and export directories if they are missing.
    ///
    /// # Errors
    /// Returns an error if either directory cannot be created.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.notes_dir, &self.export_dir] {
            fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
        }
        Ok(())
    }
}

fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| anyhow!("failed to resolve config directory"))?;
    Ok(base.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn default_notes_dir(home: &Path) -> PathBuf {
    home.join(".local").join("share").join("notes")
}

fn default_export_dir(home: &Path) -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| home.join("Downloads"))
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    path.strip_prefix("~").map_or_else(|_| path.to_path_buf(), |rest| home.join(rest))
}
