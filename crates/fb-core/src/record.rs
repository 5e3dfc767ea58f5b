//! Pipe-delimited feed record parsing.
//!
//! The feed is produced externally by a sorter/extractor that emits one
//! event per line, pre-grouped by entity:
//!
//! ```text
//! 10.0.0.1|1234567890.0|...
//! ```
//!
//! Field 0 (trimmed) is the entity id; field 1 is the event timestamp in
//! seconds since the Unix epoch. Any further fields are ignored.

use fb_common::{Error, Result};

/// A single feed record: one event for one entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Grouping key, e.g. a host address.
    pub entity: String,
    /// Event time in seconds since the Unix epoch.
    pub timestamp: f64,
}

/// Parse one feed line.
///
/// `line_no` is 1-based and only used for diagnostics. A line with
/// fewer than two `|`-separated fields, or a non-numeric timestamp
/// field, is a parse error that aborts the whole run.
pub fn parse_record(line: &str, line_no: u64) -> Result<Record> {
    let mut fields = line.split('|');
    let entity = fields.next().unwrap_or_default().trim();
    let Some(raw_timestamp) = fields.next() else {
        return Err(Error::Parse {
            line: line_no,
            reason: "expected at least two '|'-separated fields".into(),
        });
    };

    let raw_timestamp = raw_timestamp.trim();
    let timestamp: f64 = raw_timestamp.parse().map_err(|_| Error::Parse {
        line: line_no,
        reason: format!("timestamp field {:?} is not numeric", raw_timestamp),
    })?;

    Ok(Record {
        entity: entity.to_string(),
        timestamp,
    })
}
