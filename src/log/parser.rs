use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Text written in place of a timestamp when a line carries none.
pub const UNKNOWN_TIMESTAMP: &str = "N/A";

/// Exact layout of a timestamp captured by [`LINE_REGEX`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Error,
    Warn,
    Debug,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [LogLevel::Info, LogLevel::Error, LogLevel::Warn, LogLevel::Debug];

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?}")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    // Case-sensitive: "info" is not a level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(LogLevel::Info),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" => Ok(LogLevel::Warn),
            "DEBUG" => Ok(LogLevel::Debug),
            other => Err(UnknownLevel(other.to_string())),
        }
    }
}

/// Timestamp of a parsed line, kept as the text the line carried.
///
/// Conversion to a calendar value happens only when filtering, see
/// [`crate::filter::filter_by_date`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Timestamp {
    Unknown,
    Text(String),
}

impl Timestamp {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Timestamp::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Timestamp::Unknown => UNKNOWN_TIMESTAMP,
            Timestamp::Text(s) => s,
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub timestamp: Timestamp,
    pub service: String,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Timestamp::Text(ts) = &self.timestamp {
            write!(f, "{ts} - ")?;
        }
        write!(f, "{} - {} - {}", self.service, self.level, self.message)
    }
}

/// `[<date> <time> - ]<service> - <LEVEL> - <message>`, anchored at the start.
pub static LINE_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:(\d{4}-\d{2}-\d{2})\s+(\d{2}:\d{2}:\d{2})\s+-\s+)?",
        r"([\w?-]+)\s+-\s+",
        r"(INFO|ERROR|WARN|DEBUG)\s+-\s+",
        r"(.+)",
    ))
    .unwrap()
});

/// Decompose one already-trimmed line. `None` means the line is malformed.
pub fn match_line(line: &str) -> Option<LogEntry> {
    let caps = LINE_REGEX.captures(line)?;

    let timestamp = match (caps.get(1), caps.get(2)) {
        (Some(date), Some(time)) => Timestamp::Text(format!("{} {}", date.as_str(), time.as_str())),
        _ => Timestamp::Unknown,
    };
    let level = caps[4].parse().ok()?;

    Some(LogEntry {
        timestamp,
        service: caps[3].to_string(),
        level,
        message: caps[5].to_string(),
    })
}
