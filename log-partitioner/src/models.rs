use chrono::{DateTime, Utc};

use crate::{error::RecordError, invariants::Day};

/// Fields captured from one access log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub ip: String,
    pub time: String,
    pub request: String,
    pub response: u16,
    pub size: String,
}

/// A record whose timestamp has been resolved to an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub ip: String,
    pub time: DateTime<Utc>,
    pub request: String,
    pub response: u16,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRecord {
    pub day: Day,
    pub record: NormalizedRecord,
}

#[derive(Debug)]
pub struct TrapRecord {
    pub record: ParsedRecord,
    pub reason: RecordError,
}

/// What became of a single input line.
#[derive(Debug)]
pub enum Outcome {
    Partition(DayRecord),
    Trap(TrapRecord),
    Malformed,
}
