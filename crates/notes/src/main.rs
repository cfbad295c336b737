//! CLI entry point for notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, CommandFactory, Parser, Subcommand, ValueEnum};
use notes_app::{CommandEditor, CommandPdfRenderer, ConfigOverrides, NoteError, NoteService, NotesConfig};
use notes_core::Status;
use notes_store_fs::FsStore;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;

/// Markdown notes with a status, managed from the terminal.
#[derive(Parser, Debug)]
#[command(name = "notes", version, about = "notes: Markdown notes with an open / in-progress / done status")]
struct Cli {
    /// Config file (defaults to <config dir>/notes/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the note files.
    #[arg(long, global = true)]
    notes_dir: Option<PathBuf>,

    /// Directory receiving exports and backups.
    #[arg(long, global = true)]
    export_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new note and open it in the editor.
    Add {
        /// Title of the note.
        #[arg(long)]
        title: String,
    },

    /// Edit an existing note.
    Edit {
        /// Title of the note.
        #[arg(long)]
        title: String,
    },

    /// Delete a note.
    Delete {
        /// Title of the note.
        #[arg(long)]
        title: String,
    },

    /// List all notes.
    List {
        /// Only show notes with this status.
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Change a note's status.
    Status {
        /// Title of the note.
        #[arg(long)]
        title: String,
        /// New status.
        #[arg(long = "set", value_enum)]
        status: StatusArg,
    },

    /// Export notes as HTML and/or PDF.
    #[command(group(ArgGroup::new("target").required(true).args(["title", "all"])))]
    Export {
        /// Title of a single note.
        #[arg(long)]
        title: Option<String>,
        /// Export every note.
        #[arg(long)]
        all: bool,
        /// Write HTML.
        #[arg(long)]
        html: bool,
        /// Write PDF.
        #[arg(long)]
        pdf: bool,
    },

    /// Create a ZIP backup of all notes.
    Backup,
}

/// Status as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StatusArg {
    Open,
    #[value(alias = "in progress", alias = "in_progress")]
    InProgress,
    Done,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Open => Self::Open,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Done => Self::Done,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ListFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let Cli {
        config,
        notes_dir,
        export_dir,
        cmd,
    } = Cli::parse();

    let Some(cmd) = cmd else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    install_tracing();

    let config = NotesConfig::load(ConfigOverrides {
        config_file: config,
        notes_dir,
        export_dir,
    })?;
    config.ensure_dirs()?;

    let store = FsStore::open(&config.notes_dir)?;
    let editor = CommandEditor::from_config(config.editor.as_deref());
    debug!(
        notes_dir = %config.notes_dir.display(),
        export_dir = %config.export_dir.display(),
        editor = editor.command(),
        "resolved configuration"
    );
    let service = NoteService::new(
        store,
        editor,
        CommandPdfRenderer::new(config.pdf_command.clone()),
        config.export_dir.clone(),
    );
    report(commands::run(cmd, &service))
}

/// Print expected failures as a message; let everything else fail the process.
fn report(result: Result<()>) -> Result<()> {
    match result {
        Err(err) => match err.downcast_ref::<NoteError>() {
            Some(note_err) if note_err.is_user_facing() => {
                eprintln!("Error: {note_err}");
                Ok(())
            }
            _ => Err(err),
        },
        ok => ok,
    }
}

fn install_tracing() {
    // RUST_LOG overrides the default; user-facing output goes to stdout, logs to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
