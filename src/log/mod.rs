mod parser;
mod reader;

pub use parser::{
    LINE_REGEX, LogEntry, LogLevel, TIMESTAMP_FORMAT, Timestamp, UNKNOWN_TIMESTAMP, UnknownLevel,
    match_line,
};
pub use reader::{ParseRun, RunStatus, SkippedLine, parse_file, parse_reader};
