//! Log rows and their one-line rendering.
//!
//! A [`LogRow`] carries the four columns a line needs. [`RowPrinter`] turns
//! rows into `"<ip> [<time>] <message>"` lines.
//!
//! # Skipping
//!
//! Until the printer has produced its first real line, a row whose timestamp
//! does not parse or whose message fails to render is replaced by the skip
//! marker. After that the printer is verbose: a bad timestamp prints as the
//! epoch and a failed render prints its fallback text. The latch never resets.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::{Map, Value};
use std::fmt;

use crate::config::{ColumnsConfig, OutputConfig};
use crate::render::render;

// ---------------------------------------------------------------------------
// LogRow
// ---------------------------------------------------------------------------

/// The columns of one log-table row that feed a rendered line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRow {
    /// Format template of the message.
    pub details: String,
    /// Unix timestamp, as stored.
    pub tstamp: String,
    /// Client address; may be empty.
    pub ip: String,
    /// Serialized payload for the template's slots.
    pub log_data: String,
}

impl LogRow {
    /// Pick the configured columns out of a JSON row object. Missing and null
    /// columns read as empty.
    pub fn from_json(obj: &Map<String, Value>, columns: &ColumnsConfig) -> Self {
        Self {
            details: column_text(obj.get(&columns.template)),
            tstamp: column_text(obj.get(&columns.timestamp)),
            ip: column_text(obj.get(&columns.ip)),
            log_data: column_text(obj.get(&columns.payload)),
        }
    }

    /// The row timestamp as seconds since the epoch.
    pub fn timestamp(&self) -> Option<i64> {
        self.tstamp.parse().ok()
    }
}

fn column_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// RowPrinter
// ---------------------------------------------------------------------------

/// Formats rows into log lines, holding the one-way verbose latch.
pub struct RowPrinter<Tz: TimeZone = Local> {
    output: OutputConfig,
    tz: Tz,
    verbose: bool,
}

impl RowPrinter<Local> {
    pub fn new(output: OutputConfig) -> Self {
        Self::with_timezone(output, Local)
    }
}

impl<Tz: TimeZone> RowPrinter<Tz>
where
    Tz::Offset: fmt::Display,
{
    /// A printer that renders timestamps in `tz`.
    ///
    /// An invalid `timestamp_format` is replaced by the default one.
    pub fn with_timezone(mut output: OutputConfig, tz: Tz) -> Self {
        let valid = StrftimeItems::new(&output.timestamp_format)
            .all(|item| !matches!(item, Item::Error));
        if !valid {
            let fallback = OutputConfig::default().timestamp_format;
            tracing::warn!(
                format = %output.timestamp_format,
                fallback = %fallback,
                "row: invalid timestamp format, using default"
            );
            output.timestamp_format = fallback;
        }
        Self { output, tz, verbose: false }
    }

    /// Whether the first line has been printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn skip_marker(&self) -> &str {
        &self.output.skip_marker
    }

    /// Format one row, or return the skip marker.
    pub fn format_row(&mut self, row: &LogRow) -> String {
        let ts = match row.timestamp() {
            Some(ts) => ts,
            None if !self.verbose => {
                tracing::debug!(tstamp = %row.tstamp, "row: unparsable timestamp, skipped");
                return self.output.skip_marker.clone();
            }
            None => 0,
        };

        let outcome = render(&row.details, &row.log_data);
        if let Some(err) = outcome.error() {
            if !self.verbose {
                tracing::debug!(error = %err, "row: render failed, skipped");
                return self.output.skip_marker.clone();
            }
        }

        self.verbose = true;

        let ip = if row.ip.is_empty() {
            self.output.missing_ip.as_str()
        } else {
            row.ip.as_str()
        };
        let utc = DateTime::from_timestamp(ts, 0).unwrap_or_else(|| {
            tracing::debug!(tstamp = ts, "row: timestamp out of range, printing epoch");
            DateTime::<Utc>::UNIX_EPOCH
        });
        let time = utc
            .with_timezone(&self.tz)
            .format(&self.output.timestamp_format);

        format!("{ip} [{time}] {}", outcome.text())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
