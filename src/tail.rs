//! Tail driver: reads newline-delimited JSON row objects and writes one
//! rendered log line per row.
//!
//! Input is read as raw bytes. Blank lines are ignored. A line that is not a
//! JSON object, including one that is not valid UTF-8, is logged and printed
//! as the skip marker so the output keeps one line per row.

use chrono::TimeZone;
use serde_json::Value;
use sltail_core::config::{ColumnsConfig, Config};
use sltail_core::{LogRow, RowPrinter};
use std::fmt;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// What a [`run`] pass saw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TailSummary {
    /// Lines written, skip markers included.
    pub lines: usize,
    /// Input lines that were not JSON objects.
    pub invalid: usize,
    /// Timestamp of the last row whose `tstamp` parsed.
    pub watermark: Option<i64>,
}

/// Render every row from `reader` into `writer` using local time.
pub async fn run<R, W>(reader: R, writer: W, config: &Config) -> anyhow::Result<TailSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut printer = RowPrinter::new(config.output.clone());
    run_with_printer(reader, writer, &config.columns, &mut printer).await
}

/// [`run`] with a caller-supplied printer, e.g. one pinned to UTC.
pub async fn run_with_printer<R, W, Tz>(
    mut reader: R,
    mut writer: W,
    columns: &ColumnsConfig,
    printer: &mut RowPrinter<Tz>,
) -> anyhow::Result<TailSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut summary = TailSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = buf.trim_ascii();
        if line.is_empty() {
            continue;
        }

        let out = match serde_json::from_slice::<Value>(line) {
            Ok(Value::Object(obj)) => {
                let row = LogRow::from_json(&obj, columns);
                if let Some(ts) = row.timestamp() {
                    summary.watermark = Some(ts);
                }
                printer.format_row(&row)
            }
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "tail: row is not a JSON object");
                summary.invalid += 1;
                printer.skip_marker().to_string()
            }
            Err(err) => {
                tracing::warn!(error = %err, "tail: unparsable row");
                summary.invalid += 1;
                printer.skip_marker().to_string()
            }
        };

        writer.write_all(out.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        summary.lines += 1;
    }

    writer.flush().await?;
    tracing::debug!(
        lines = summary.lines,
        invalid = summary.invalid,
        watermark = ?summary.watermark,
        "tail: input exhausted"
    );
    Ok(summary)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
