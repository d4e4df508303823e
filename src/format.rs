//! Rendering log records to lines, and parsing them back
//!
//! The rendered format is one line per record:
//!
//! ```text
//! [{identity}] {ISO-8601 UTC timestamp} [{LEVEL}]: {message} {metadata-json-or-empty}
//! ```
//!
//! Empty metadata renders as an empty trailing segment, never a literal `{}`.
//! The separator space before the segment is always emitted, so lines without
//! metadata carry a trailing space; [`parse`] trims it back off.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::record::{Level, LogRecord, Metadata};

/// Render a record into its single-line persisted form.
pub fn render(record: &LogRecord) -> String {
    let meta = if record.metadata.is_empty() {
        String::new()
    } else {
        serde_json::to_string(&record.metadata).unwrap_or_default()
    };
    format!(
        "[{}] {} [{}]: {} {}",
        record.identity,
        record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        record.level.as_str(),
        record.message,
        meta
    )
}

/// A line recovered by [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// Identity label
    pub identity: String,
    /// Record timestamp, normalized to UTC
    pub timestamp: DateTime<Utc>,
    /// Severity
    pub level: Level,
    /// Log message
    pub message: String,
    /// Metadata, empty when the line carried none
    pub metadata: Metadata,
}

/// Parse a rendered line back into its parts.
///
/// Returns `None` for lines that do not match the rendered format.
pub fn parse(line: &str) -> Option<ParsedLine> {
    let rest = line
        .trim_end_matches(&['\r', '\n'][..])
        .strip_prefix('[')?;
    let (identity, rest) = rest.split_once("] ")?;
    let (timestamp, rest) = rest.split_once(" [")?;
    let (level, rest) = rest.split_once("]: ")?;

    let timestamp = DateTime::parse_from_rfc3339(timestamp)
        .ok()?
        .with_timezone(&Utc);
    let level = Level::from_name(level)?;
    let (message, metadata) = split_metadata(rest);

    Some(ParsedLine {
        identity: identity.to_string(),
        timestamp,
        level,
        message,
        metadata,
    })
}

/// Split the tail of a line into message and metadata.
///
/// The metadata segment is the rightmost ` {`-prefixed suffix that parses as a
/// JSON object; trying candidates right-to-left keeps nested objects intact.
fn split_metadata(rest: &str) -> (String, Metadata) {
    if rest.ends_with('}') {
        let mut search_end = rest.len();
        while let Some(pos) = rest[..search_end].rfind(" {") {
            if let Ok(meta) = serde_json::from_str::<Metadata>(&rest[pos + 1..]) {
                return (rest[..pos].to_string(), meta);
            }
            search_end = pos;
        }
    }
    (rest.trim_end().to_string(), Metadata::new())
}
