use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use super::parser::{LogEntry, match_line};
use crate::aggregate::{AggregateCounts, Aggregator};
use crate::error::{Error, Result};

/// A line the matcher rejected. `line_number` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
}

#[derive(Debug)]
pub enum RunStatus {
    Complete,
    /// Reading stopped early; everything before `line_number` was processed.
    Interrupted { line_number: usize, cause: io::Error },
}

/// Everything one pass over the input produced.
#[derive(Debug)]
pub struct ParseRun {
    pub entries: Vec<LogEntry>,
    pub counts: AggregateCounts,
    pub skipped: Vec<SkippedLine>,
    pub lines_read: usize,
    pub status: RunStatus,
}

impl ParseRun {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, RunStatus::Complete)
    }
}

pub fn parse_file(path: &Path) -> Result<ParseRun> {
    let file = File::open(path).map_err(|source| Error::InputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading log file");
    Ok(parse_reader(BufReader::new(file)))
}

/// Lines of a text stream ended by `\n`, `\r\n` or a lone `\r`.
///
/// Invalid UTF-8 yields an `InvalidData` error for that line and ends the
/// iteration, as does any read error.
pub struct TextLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<io::Result<String>>,
    done: bool,
}

impl<R: BufRead> TextLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn fill(&mut self) {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => self.done = true,
            Ok(_) => {
                let mut chunk = self.buf.as_slice();
                if let Some(rest) = chunk.strip_suffix(b"\n") {
                    chunk = rest;
                }
                if let Some(rest) = chunk.strip_suffix(b"\r") {
                    chunk = rest;
                }
                for piece in chunk.split(|&b| b == b'\r') {
                    match std::str::from_utf8(piece) {
                        Ok(text) => self.pending.push_back(Ok(text.to_string())),
                        Err(e) => {
                            self.pending.push_back(Err(io::Error::new(io::ErrorKind::InvalidData, e)));
                            self.done = true;
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                self.pending.push_back(Err(e));
                self.done = true;
            }
        }
    }
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && !self.done {
            self.fill();
        }
        self.pending.pop_front()
    }
}

/// Match and aggregate every line of `reader` in order.
///
/// Malformed lines are warned about and skipped. A read error ends the pass
/// but keeps what was gathered so far.
pub fn parse_reader<R: BufRead>(reader: R) -> ParseRun {
    let mut aggregator = Aggregator::new();
    let mut entries = Vec::new();
    let mut skipped = Vec::new();
    let mut lines_read = 0;
    let mut status = RunStatus::Complete;

    for (i, line) in TextLines::new(reader).enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(cause) => {
                status = RunStatus::Interrupted { line_number: i + 1, cause };
                break;
            }
        };
        lines_read += 1;

        let line = line.trim();
        match match_line(line) {
            Some(entry) => {
                aggregator.record(&entry);
                entries.push(entry);
            }
            None => {
                warn!("Skipping malformed log line: {line}");
                skipped.push(SkippedLine {
                    line_number: i + 1,
                    content: line.to_string(),
                });
            }
        }
    }

    ParseRun {
        entries,
        counts: aggregator.finish(),
        skipped,
        lines_read,
        status,
    }
}
