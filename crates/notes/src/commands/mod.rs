use std::fmt::Write as _;

use anyhow::Result;
use notes_app::timestamp;
use notes_app::{EditorLauncher, ExportFormats, ExportTarget, NoteService, NoteStore, NoteSummary, PdfRenderer};
use notes_core::Status;

use crate::{Command, ListFormat};

const TABLE_HEADERS: [&str; 3] = ["Title", "Status", "Last Modified"];

pub fn run<S, E, P>(command: Command, service: &NoteService<S, E, P>) -> Result<()>
where
    S: NoteStore,
    E: EditorLauncher,
    P: PdfRenderer,
{
    match command {
        Command::Add { title } => handle_add(service, &title),
        Command::Edit { title } => {
            service.edit(&title)?;
            Ok(())
        }
        Command::Delete { title } => {
            service.delete(&title)?;
            println!("Deleted: {title}");
            Ok(())
        }
        Command::List { status, format } => handle_list(service, status.map(Status::from), format),
        Command::Status { title, status } => {
            let note = service.set_status(&title, status.into())?;
            println!("Updated status: {title} → {}", note.status);
            Ok(())
        }
        Command::Export { title, all, html, pdf } => {
            let target = match title {
                Some(title) if !all => ExportTarget::Single(title),
                _ => ExportTarget::All,
            };
            handle_export(service, &target, ExportFormats { html, pdf })
        }
        Command::Backup => {
            let summary = service.backup()?;
            println!(
                "Backup created: {} ({} notes)",
                summary.path.display(),
                summary.count
            );
            Ok(())
        }
    }
}

fn handle_add<S, E, P>(service: &NoteService<S, E, P>, title: &str) -> Result<()>
where
    S: NoteStore,
    E: EditorLauncher,
    P: PdfRenderer,
{
    let path = service.create(title)?;
    println!("Created note: {title}");
    service.open_in_editor(&path)?;
    Ok(())
}

fn handle_list<S, E, P>(service: &NoteService<S, E, P>, status: Option<Status>, format: ListFormat) -> Result<()>
where
    S: NoteStore,
    E: EditorLauncher,
    P: PdfRenderer,
{
    let notes = service.list(status)?;

    if notes.is_empty() && format == ListFormat::Table {
        if status.is_none() {
            println!("No notes found.");
        } else {
            println!("No notes matched the provided filters");
        }
        return Ok(());
    }

    match format {
        ListFormat::Table => print!("{}", render_note_table(&notes)?),
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&notes)?),
    }
    Ok(())
}

fn handle_export<S, E, P>(
    service: &NoteService<S, E, P>,
    target: &ExportTarget,
    formats: ExportFormats,
) -> Result<()>
where
    S: NoteStore,
    E: EditorLauncher,
    P: PdfRenderer,
{
    let written = service.export(target, formats)?;
    if written.is_empty() {
        println!("No notes found.");
    }
    for file in written {
        println!("Exported {}: {}", file.format, file.path.display());
    }
    Ok(())
}

/// Left-aligned table padded to the widest cell of each column.
fn render_note_table(notes: &[NoteSummary]) -> Result<String> {
    let mut rows = Vec::with_capacity(notes.len());
    for note in notes {
        rows.push([
            note.title.clone(),
            note.status.to_string(),
            timestamp::format_listing(note.modified())?,
        ]);
    }

    let mut widths = TABLE_HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &TABLE_HEADERS.map(str::to_owned), &widths)?;
    push_row(&mut out, &widths.map(|width| "-".repeat(width)), &widths)?;
    for row in &rows {
        push_row(&mut out, row, &widths)?;
    }
    Ok(out)
}

fn push_row(out: &mut String, cells: &[String; 3], widths: &[usize; 3]) -> Result<()> {
    let [title, status, modified] = cells;
    let [title_width, status_width, _] = *widths;
    writeln!(out, "{title:<title_width$} | {status:<status_width$} | {modified}")?;
    Ok(())
}
