//! Status marker embedded as the first line of every note file.
//!
//! The envelope is the literal `<!-- status: {value} -->` followed by a newline.
//! Files written by earlier versions use the same text, so it must not change.

use crate::status::Status;

/// Prefix that identifies a marker line.
pub const MARKER_PREFIX: &str = "<!-- status:";

const MARKER_SUFFIX: &str = "-->";

/// Render the marker line for `status`, including the trailing newline.
#[must_use]
pub fn render_marker(status: Status) -> String {
    format!("{MARKER_PREFIX} {status} {MARKER_SUFFIX}\n")
}

/// Whether `line` is a status marker line.
#[must_use]
pub fn is_marker_line(line: &str) -> bool {
    line.starts_with(MARKER_PREFIX)
}

/// Find the status of a note's text.
///
/// Only the first line beginning with [`MARKER_PREFIX`] is considered. Text
/// without a marker, or with an unrecognised value, yields [`Status::default`].
#[must_use]
pub fn extract_status(text: &str) -> Status {
    text.lines()
        .find(|line| is_marker_line(line))
        .and_then(|line| {
            let value = line.replacen(MARKER_PREFIX, "", 1).replace(MARKER_SUFFIX, "");
            Status::parse(&value)
        })
        .unwrap_or_default()
}

/// Return `body` with its status set to `status`.
///
/// A marker on the first line is replaced in place, otherwise one is
/// prepended. The result ends with exactly one newline.
#[must_use]
pub fn set_status(body: &str, status: Status) -> String {
    let marker = render_marker(status);
    let marker = marker.trim_end();

    // Split on `\n` only so a `\r` left inside a line survives unchanged.
    let mut lines: Vec<&str> = body.split('\n').collect();
    if lines.first().is_some_and(|line| is_marker_line(line)) {
        lines[0] = marker;
    } else {
        lines.insert(0, marker);
    }
    while lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Drop a leading marker line, if any, returning the rest of the text.
#[must_use]
pub fn strip_marker(text: &str) -> &str {
    let first_line = text.split('\n').next().unwrap_or_default();
    if !is_marker_line(first_line) {
        return text;
    }
    text.split_once('\n').map_or("", |(_, rest)| rest)
}
