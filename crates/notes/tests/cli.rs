#![allow(missing_docs)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use assert_cmd::cargo::CommandCargoExt;
use tempfile::{TempDir, tempdir};
use zip::ZipArchive;

struct Workspace {
    root: TempDir,
}

impl Workspace {
    fn new() -> Result<Self> {
        let root = tempdir()?;
        fs::create_dir_all(root.path().join("notes"))?;
        fs::create_dir_all(root.path().join("exports"))?;
        Ok(Self { root })
    }

    fn notes_dir(&self) -> PathBuf {
        self.root.path().join("notes")
    }

    fn export_dir(&self) -> PathBuf {
        self.root.path().join("exports")
    }

    fn write_note(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.notes_dir().join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn notes(&self, args: &[&str]) -> Result<Output> {
        let mut cmd = Command::cargo_bin("notes")?;
        cmd.args(args)
            .arg("--config")
            .arg(self.root.path().join("missing.toml"))
            .arg("--notes-dir")
            .arg(self.notes_dir())
            .arg("--export-dir")
            .arg(self.export_dir())
            .env("NOTES_EDITOR", "true")
            .env_remove("RUST_LOG");
        Ok(cmd.output()?)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn dir_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

#[cfg(unix)]
#[test]
fn add_creates_note_from_title() -> Result<()> {
    let ws = Workspace::new()?;

    let output = ws.notes(&["add", "--title", "Shopping List"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Created note: Shopping List"));
    assert_eq!(
        fs::read_to_string(ws.notes_dir().join("Shopping_List.md"))?,
        "<!-- status: open -->\n# Shopping List\n\n"
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn add_existing_note_reports_error() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Plan.md", "<!-- status: done -->\nkeep me\n")?;

    let output = ws.notes(&["add", "--title", "Plan"])?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Error: "));
    assert_eq!(
        fs::read_to_string(ws.notes_dir().join("Plan.md"))?,
        "<!-- status: done -->\nkeep me\n"
    );
    Ok(())
}

#[test]
fn status_rewrites_marker_in_place() -> Result<()> {
    let ws = Workspace::new()?;
    let path = ws.write_note("Errands.md", "<!-- status: open -->\nbuy milk\n")?;

    let output = ws.notes(&["status", "--title", "Errands", "--set", "done"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Updated status: Errands"));
    assert_eq!(fs::read_to_string(path)?, "<!-- status: done -->\nbuy milk\n");
    Ok(())
}

#[test]
fn delete_missing_note_leaves_directory_unchanged() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Keep.md", "<!-- status: open -->\n# Keep\n\n")?;

    let output = ws.notes(&["delete", "--title", "Ghost"])?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Error: "));
    assert_eq!(dir_entries(&ws.notes_dir())?, vec!["Keep.md"]);
    Ok(())
}

#[test]
fn delete_removes_note() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Old_Idea.md", "<!-- status: open -->\n# Old Idea\n\n")?;

    let output = ws.notes(&["delete", "--title", "Old Idea"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Deleted: Old Idea"));
    assert!(dir_entries(&ws.notes_dir())?.is_empty());
    Ok(())
}

#[test]
fn list_json_reports_titles_and_statuses() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Alpha.md", "<!-- status: done -->\n# Alpha\n")?;
    ws.write_note("Beta_Note.md", "# Beta Note\n")?;
    ws.write_note("readme.txt", "not a note")?;

    let output = ws.notes(&["list", "--format", "json"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let rows = rows.as_array().cloned().unwrap_or_default();
    let pairs: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            (
                row["title"].as_str().unwrap_or_default().to_owned(),
                row["status"].as_str().unwrap_or_default().to_owned(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Alpha".to_owned(), "done".to_owned()),
            ("Beta Note".to_owned(), "open".to_owned()),
        ]
    );
    Ok(())
}

#[test]
fn list_json_uses_marker_spelling_for_in_progress() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Draft.md", "<!-- status: in progress -->\n# Draft\n")?;

    let output = ws.notes(&["list", "--format", "json"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(rows[0]["status"], "in progress");
    Ok(())
}

#[test]
fn list_skips_note_that_is_not_utf8() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Good.md", "<!-- status: done -->\n# Good\n")?;
    fs::write(ws.notes_dir().join("Cafe.md"), b"# Caf\xe9\n")?;

    let output = ws.notes(&["list"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Good"));
    assert!(!out.contains("Cafe"));
    Ok(())
}

#[test]
fn status_on_note_that_is_not_utf8_reports_error() -> Result<()> {
    let ws = Workspace::new()?;
    let path = ws.notes_dir().join("Cafe.md");
    fs::write(&path, b"# Caf\xe9\n")?;

    let output = ws.notes(&["status", "--title", "Cafe", "--set", "done"])?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Error: "));
    assert_eq!(fs::read(&path)?, b"# Caf\xe9\n");
    Ok(())
}

#[test]
fn list_table_on_empty_directory() -> Result<()> {
    let ws = Workspace::new()?;

    let output = ws.notes(&["list"])?;

    assert!(output.status.success());
    assert!(stdout(&output).contains("No notes found."));
    Ok(())
}

#[test]
fn export_html_writes_styled_document() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Trip_Plan.md", "<!-- status: open -->\n# Trip Plan\n\n- pack\n")?;

    let output = ws.notes(&["export", "--title", "Trip Plan", "--html"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let html = fs::read_to_string(ws.export_dir().join("Trip_Plan.html"))?;
    assert!(html.contains("<style>"));
    assert!(html.contains("<h1>Trip Plan</h1>"));
    assert!(html.contains("<li>pack</li>"));
    Ok(())
}

#[test]
fn export_without_format_reports_error() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Trip_Plan.md", "<!-- status: open -->\n# Trip Plan\n")?;

    let output = ws.notes(&["export", "--all"])?;

    assert!(output.status.success());
    assert!(stderr(&output).contains("Error: "));
    assert!(dir_entries(&ws.export_dir())?.is_empty());
    Ok(())
}

#[test]
fn backup_zips_every_note() -> Result<()> {
    let ws = Workspace::new()?;
    ws.write_note("Alpha.md", "<!-- status: open -->\n# Alpha\n")?;
    ws.write_note("Beta.md", "<!-- status: done -->\n# Beta\n")?;

    let output = ws.notes(&["backup"])?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("(2 notes)"));

    let archives = dir_entries(&ws.export_dir())?;
    assert_eq!(archives.len(), 1);
    assert!(archives[0].starts_with("notes_backup_"));

    let archive = ZipArchive::new(File::open(ws.export_dir().join(&archives[0]))?)?;
    let mut names: Vec<_> = archive.file_names().map(str::to_owned).collect();
    names.sort();
    assert_eq!(names, vec!["Alpha.md", "Beta.md"]);
    Ok(())
}

#[test]
fn invalid_status_value_is_a_usage_error() -> Result<()> {
    let ws = Workspace::new()?;

    let output = ws.notes(&["status", "--title", "Any", "--set", "blocked"])?;

    assert!(!output.status.success());
    Ok(())
}
