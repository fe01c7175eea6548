use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::ValueEnum;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::models::SessionRecord;

/// Column order of the tabular output. The generator core knows nothing
/// about this; all output syntax lives here.
pub const CSV_HEADER: &str = "user_id,session_id,timestamp,session_duration_sec,domain_category,\
domain_risk_score,redirect_count,dwell_time_sec,download_flag,click_count,typing_events,\
login_failures,mfa_challenge,new_device_login,label_malicious";

/// Supported output serializations.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Header row plus one comma-separated record per line.
    Csv,
    /// One JSON object per line.
    Jsonl,
}

/// Quote a string field if it contains the delimiter, a quote, or a line
/// break. The generator never emits such characters, but the writer does
/// not rely on that. An empty string stays an empty field (the
/// absent-value convention).
fn csv_str(s: &str) -> Cow<'_, str> {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        Cow::Owned(format!("\"{}\"", s.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(s)
    }
}

fn csv_bool(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

/// Write the record sequence as CSV, header included, in generation order.
pub fn write_csv<W: Write>(records: &[SessionRecord], mut out: W) -> Result<()> {
    writeln!(out, "{}", CSV_HEADER)?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{:.3},{},{},{},{},{},{},{},{},{}",
            csv_str(&r.user_id),
            csv_str(&r.session_id),
            csv_str(&r.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
            r.session_duration_sec,
            csv_str(&r.domain_category),
            r.domain_risk_score,
            r.redirect_count,
            r.dwell_time_sec,
            csv_bool(r.download_flag),
            r.click_count,
            r.typing_events,
            r.login_failures,
            csv_bool(r.mfa_challenge),
            csv_bool(r.new_device_login),
            csv_bool(r.label_malicious),
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Write the record sequence as JSON Lines, in generation order.
pub fn write_jsonl<W: Write>(records: &[SessionRecord], mut out: W) -> Result<()> {
    for r in records {
        writeln!(out, "{}", serde_json::to_string(r)?)?;
    }
    out.flush()?;
    Ok(())
}

/// Serialize the full sequence to a file in the requested format.
pub fn write_to_path(
    path: &Path,
    format: OutputFormat,
    records: &[SessionRecord],
) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(records, writer)?,
        OutputFormat::Jsonl => write_jsonl(records, writer)?,
    }
    info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}
