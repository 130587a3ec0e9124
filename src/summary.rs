use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::aggregate::{AggregateCounts, Counter};
use crate::error::{Error, Result};
use crate::log::{LogEntry, LogLevel};

pub const DEFAULT_INDENT: usize = 4;

/// Message reported when no ERROR entry was seen.
pub const NOT_APPLICABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostCommonError {
    pub message: String,
    pub count: u64,
}

impl MostCommonError {
    pub fn none() -> Self {
        Self {
            message: NOT_APPLICABLE.to_string(),
            count: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(rename = "Log Level Counts")]
    pub level_counts: Counter<LogLevel>,
    #[serde(rename = "Service Counts")]
    pub service_counts: Counter<String>,
    #[serde(rename = "Most Common Error")]
    pub most_common_error: MostCommonError,
}

/// Summary together with the entries a date filter kept.
#[derive(Debug, Serialize)]
pub struct FilteredReport<'a> {
    #[serde(rename = "Summary")]
    pub summary: &'a Summary,
    #[serde(rename = "Filtered Entries")]
    pub entries: &'a [&'a LogEntry],
}

/// Highest-count message. Ties go to the lexicographically smallest message.
pub fn most_common_error(errors: &Counter<String>) -> MostCommonError {
    let mut best: Option<(&String, u64)> = None;
    // Ascending key order, so only a strictly larger count replaces the
    // current pick.
    for (message, &count) in errors {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((message, count));
        }
    }

    match best {
        Some((message, count)) => MostCommonError {
            message: message.clone(),
            count,
        },
        None => MostCommonError::none(),
    }
}

/// Serialize `value` as JSON nested with `indent` spaces per level.
pub fn write_pretty<W: Write, T: Serialize + ?Sized>(writer: W, value: &T, indent: usize) -> Result<()> {
    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut ser)?;
    Ok(())
}

pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    let mut buf = Vec::new();
    write_pretty(&mut buf, value, indent)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

impl Summary {
    pub fn build(counts: AggregateCounts) -> Self {
        let most_common_error = most_common_error(&counts.errors);
        Self {
            level_counts: counts.levels,
            service_counts: counts.services,
            most_common_error,
        }
    }

    pub fn write_json<W: Write>(&self, writer: W, indent: usize) -> Result<()> {
        write_pretty(writer, self, indent)
    }

    pub fn to_json_pretty(&self, indent: usize) -> Result<String> {
        to_pretty_string(self, indent)
    }

    /// Create or truncate `path` and write the summary into it.
    pub fn save(&self, path: &Path, indent: usize) -> Result<()> {
        let write_err = |source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        self.write_json(&mut writer, indent).map_err(|e| match e {
            Error::Serialize(inner) if inner.is_io() => write_err(inner.into()),
            other => other,
        })?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)?;
        Ok(())
    }
}
