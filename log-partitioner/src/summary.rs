use std::collections::BTreeMap;

use serde::Serialize;

use crate::{error::RecordError, invariants::Day};

/// Counters reported once a run completes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub lines: usize,
    pub partitioned: usize,
    pub trapped: usize,
    pub not_found: usize,
    pub date_errors: usize,
    pub malformed: usize,
    pub partitions: BTreeMap<String, usize>,
    /// Response codes of partitioned records.
    pub responses: BTreeMap<u16, usize>,
}

impl RunSummary {
    pub fn record_partitioned(&mut self, day: Day, response: u16) {
        self.lines += 1;
        self.partitioned += 1;
        *self.partitions.entry(day.partition_name()).or_default() += 1;
        *self.responses.entry(response).or_default() += 1;
    }

    pub fn record_trapped(&mut self, reason: &RecordError) {
        self.lines += 1;
        self.trapped += 1;
        match reason {
            RecordError::Validation(_) => self.not_found += 1,
            RecordError::DateParse { .. } => self.date_errors += 1,
            RecordError::Parse => {}
        }
    }

    pub fn record_malformed(&mut self) {
        self.lines += 1;
        self.malformed += 1;
    }
}
