//! Parse `[date time - ]service - LEVEL - message` log files into per-level,
//! per-service and most-common-error summaries.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod log;
pub mod logging;
pub mod summary;

pub use aggregate::{AggregateCounts, Aggregator, Counter};
pub use error::{Error, Result};
pub use filter::{DateRange, filter_by_date};
pub use log::{LogEntry, LogLevel, ParseRun, RunStatus, Timestamp, match_line, parse_file, parse_reader};
pub use summary::{MostCommonError, Summary};
