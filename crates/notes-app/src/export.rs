//! HTML and PDF export of notes.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use pulldown_cmark::{Options, Parser, html};
use tracing::debug;

use crate::command::parse_command;
use crate::error::{NoteError, Result};

/// Monospace styling prepended to every exported document.
pub const MONO_CSS: &str = r#"
<style>
    body, p, li, h1, h2, h3, h4, h5, h6 { font-family: "Courier New", Courier, monospace; }
    pre, code { font-family: "Courier New", Courier, monospace; }
</style>
"#;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Standalone HTML file.
    Html,
    /// PDF rendered from the HTML.
    Pdf,
}

impl ExportFormat {
    /// File extension for the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("HTML"),
            Self::Pdf => f.write_str("PDF"),
        }
    }
}

/// Which formats to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFormats {
    /// Produce HTML.
    pub html: bool,
    /// Produce PDF.
    pub pdf: bool,
}

impl ExportFormats {
    /// True when no format was requested.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.html && !self.pdf
    }

    /// Requested formats, HTML first.
    #[must_use]
    pub fn selected(self) -> Vec<ExportFormat> {
        let mut formats = Vec::with_capacity(2);
        if self.html {
            formats.push(ExportFormat::Html);
        }
        if self.pdf {
            formats.push(ExportFormat::Pdf);
        }
        formats
    }
}

/// A file written by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Title of the exported note.
    pub title: String,
    /// Format written.
    pub format: ExportFormat,
    /// Output location.
    pub path: PathBuf,
}

/// Turns a styled HTML document into a PDF file.
pub trait PdfRenderer {
    /// Render `html` into a PDF at `out`.
    ///
    /// # Errors
    /// Returns an error when the renderer is missing or fails.
    fn render(&self, html: &str, out: &Path) -> Result<()>;
}

/// PDF renderer that shells out to an HTML-to-PDF converter, invoked as
/// `<command> <input.html> <output.pdf>`.
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    command: String,
}

impl CommandPdfRenderer {
    /// Use `command`, e.g. `wkhtmltopdf --quiet` or `weasyprint`.
    #[must_use]
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl PdfRenderer for CommandPdfRenderer {
    fn render(&self, html: &str, out: &Path) -> Result<()> {
        let cmd = parse_command(&self.command)?;

        let mut input = tempfile::Builder::new()
            .prefix("notes-export-")
            .suffix(".html")
            .tempfile()?;
        input.write_all(html.as_bytes())?;
        input.flush()?;

        debug!(converter = %cmd.program, out = %out.display(), "rendering pdf");
        let output = match Command::new(&cmd.program)
            .args(&cmd.args)
            .arg(input.path())
            .arg(out)
            .output()
        {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(NoteError::PdfRendererUnavailable(cmd.program));
            }
            Err(err) => return Err(err.into()),
        };
        if !output.status.success() {
            return Err(NoteError::PdfRendererFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(())
    }
}

/// Render Markdown to an HTML fragment.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Styled HTML document for a note.
#[must_use]
pub fn styled_html(markdown: &str) -> String {
    let mut doc = String::from(MONO_CSS);
    doc.push_str(&render_markdown(markdown));
    doc
}

/// Output file name for `title` in `format`: spaces become underscores.
#[must_use]
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    format!("{title}.{}", format.extension()).replace(' ', "_")
}

/// Write `markdown` for the note `title` into `export_dir` in each requested format.
///
/// # Errors
/// Returns an error if a file cannot be written or the PDF renderer fails.
pub fn export_note<P: PdfRenderer + ?Sized>(
    title: &str,
    markdown: &str,
    formats: ExportFormats,
    export_dir: &Path,
    pdf: &P,
) -> Result<Vec<ExportedFile>> {
    let html = styled_html(markdown);
    let mut written = Vec::new();
    for format in formats.selected() {
        let path = export_dir.join(export_file_name(title, format));
        match format {
            ExportFormat::Html => fs::write(&path, &html)?,
            ExportFormat::Pdf => pdf.render(&html, &path)?,
        }
        debug!(title, %format, path = %path.display(), "exported note");
        written.push(ExportedFile {
            title: title.to_owned(),
            format,
            path,
        });
    }
    Ok(written)
}
