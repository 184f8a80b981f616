use chrono::{DateTime, TimeZone, Utc};

use crate::{
    error::RecordError,
    invariants::Day,
    models::{DayRecord, NormalizedRecord, ParsedRecord},
};

// Timestamp format for log entries: 01/Aug/1995:00:00:01 -0400
const TS_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

pub fn parse_timestamp(time: &str) -> Result<DateTime<Utc>, RecordError> {
    DateTime::parse_from_str(time, TS_FORMAT)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| RecordError::DateParse {
            time: time.to_string(),
            source,
        })
}

/// Replaces the textual timestamp with the instant it names. On failure the
/// record is handed back so the caller can trap it.
pub fn normalize(record: ParsedRecord) -> Result<NormalizedRecord, (ParsedRecord, RecordError)> {
    match parse_timestamp(&record.time) {
        Ok(time) => Ok(NormalizedRecord {
            ip: record.ip,
            time,
            request: record.request,
            response: record.response,
            size: record.size,
        }),
        Err(e) => Err((record, e)),
    }
}

pub fn with_day<Tz: TimeZone>(record: NormalizedRecord, tz: &Tz) -> DayRecord {
    DayRecord {
        day: Day::of(&record.time.with_timezone(tz)),
        record,
    }
}
