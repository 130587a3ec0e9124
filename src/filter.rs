use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};
use crate::log::{LogEntry, TIMESTAMP_FORMAT, Timestamp};

/// Closed interval `[start, end]`. A range with `start > end` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Missing bounds are open-ended.
    pub fn from_bounds(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Self {
        Self {
            start: start.unwrap_or(NaiveDateTime::MIN),
            end: end.unwrap_or(NaiveDateTime::MAX),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|source| Error::TimestampParse {
        timestamp: text.to_string(),
        source,
    })
}

/// Entries whose timestamp lies in `range`, in input order.
///
/// Entries without a timestamp never match. A timestamp the matcher accepted
/// but the calendar rejects (month 13, hour 99) fails the whole call.
pub fn filter_by_date<'a>(entries: &'a [LogEntry], range: &DateRange) -> Result<Vec<&'a LogEntry>> {
    let mut kept = Vec::new();
    for entry in entries {
        let Timestamp::Text(text) = &entry.timestamp else {
            continue;
        };
        if range.contains(parse_timestamp(text)?) {
            kept.push(entry);
        }
    }
    Ok(kept)
}

/// Which end of a range a command-line bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind {
    Start,
    End,
}

/// Accept `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD`.
///
/// A bare date covers the whole day: midnight as a start bound, 23:59:59 as
/// an end bound.
pub fn parse_bound(text: &str, kind: BoundKind) -> std::result::Result<NaiveDateTime, String> {
    let text = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD or \"YYYY-MM-DD HH:MM:SS\", got {text:?}"))?;
    let time = match kind {
        BoundKind::Start => NaiveTime::MIN,
        BoundKind::End => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN),
    };
    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, match_line};
    use proptest::prelude::*;

    fn at(text: &str) -> NaiveDateTime {
        parse_timestamp(text).unwrap()
    }

    fn entries(lines: &[&str]) -> Vec<LogEntry> {
        lines.iter().map(|l| match_line(l).unwrap()).collect()
    }

    #[test]
    fn test_inclusive_bounds_keep_order() {
        let logs = entries(&[
            "2024-01-01 09:00:00 - auth - INFO - first",
            "2024-01-01 10:00:00 - auth - INFO - second",
            "2024-01-01 11:00:00 - auth - INFO - third",
        ]);
        let range = DateRange::new(at("2024-01-01 09:00:00"), at("2024-01-01 10:00:00"));

        let kept = filter_by_date(&logs, &range).unwrap();
        let messages: Vec<&str> = kept.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn test_unknown_timestamps_are_excluded() {
        let logs = entries(&[
            "auth - ERROR - no clock",
            "2024-01-01 10:00:00 - auth - INFO - has clock",
        ]);
        let range = DateRange::from_bounds(None, None);
        let kept = filter_by_date(&logs, &range).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].message, "has clock");
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let logs = entries(&["2024-01-01 10:00:00 - auth - INFO - x"]);
        let range = DateRange::new(at("2024-01-02 00:00:00"), at("2024-01-01 00:00:00"));
        assert!(range.is_empty());
        assert!(filter_by_date(&logs, &range).unwrap().is_empty());
    }

    #[test]
    fn test_impossible_timestamp_is_an_error() {
        let logs = entries(&["2024-13-45 99:99:99 - auth - INFO - broken clock"]);
        let range = DateRange::from_bounds(None, None);
        let err = filter_by_date(&logs, &range).unwrap_err();
        match err {
            Error::TimestampParse { timestamp, .. } => assert_eq!(timestamp, "2024-13-45 99:99:99"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(
            parse_bound("2024-01-01", BoundKind::Start).unwrap(),
            at("2024-01-01 00:00:00")
        );
        assert_eq!(
            parse_bound("2024-01-01", BoundKind::End).unwrap(),
            at("2024-01-01 23:59:59")
        );
        assert_eq!(
            parse_bound("2024-01-01 12:30:00", BoundKind::End).unwrap(),
            at("2024-01-01 12:30:00")
        );
        assert!(parse_bound("yesterday", BoundKind::Start).is_err());
    }

    proptest! {
        #[test]
        fn test_sentinel_never_passes(
            start_h in 0u32..24,
            span in 0u32..48,
            unknown in 0usize..8,
        ) {
            let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(start_h, 0, 0).unwrap();
            let end = start + chrono::Duration::hours(i64::from(span));
            let logs: Vec<LogEntry> = (0..unknown)
                .map(|i| LogEntry {
                    timestamp: Timestamp::Unknown,
                    service: "svc".to_string(),
                    level: LogLevel::Info,
                    message: format!("m{i}"),
                })
                .collect();
            let kept = filter_by_date(&logs, &DateRange::new(start, end)).unwrap();
            prop_assert!(kept.is_empty());
        }
    }
}
