//! Local-time formatting for listings and backup names.

use std::time::SystemTime;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Current time in the local offset, or UTC when the offset is unknown.
#[must_use]
pub fn local_now() -> OffsetDateTime {
    to_local(OffsetDateTime::now_utc())
}

/// Convert a filesystem timestamp to the local offset.
#[must_use]
pub fn from_system_time(ts: SystemTime) -> OffsetDateTime {
    to_local(OffsetDateTime::from(ts))
}

fn to_local(ts: OffsetDateTime) -> OffsetDateTime {
    UtcOffset::current_local_offset().map_or(ts, |offset| ts.to_offset(offset))
}

/// `YYYY-MM-DD HH:MM`, as shown in the note list.
///
/// # Errors
/// Returns an error if the timestamp cannot be formatted.
pub fn format_listing(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    ts.format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
}

/// RFC 3339 timestamp used in JSON output.
///
/// # Errors
/// Returns an error if the timestamp cannot be formatted.
pub fn format_rfc3339(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    ts.format(&Rfc3339)
}

/// `YYYYMMDD_HHMMSS`, embedded in backup archive names.
///
/// # Errors
/// Returns an error if the timestamp cannot be formatted.
pub fn format_compact(ts: OffsetDateTime) -> Result<String, time::error::Format> {
    ts.format(format_description!("[year][month][day]_[hour][minute][second]"))
}
