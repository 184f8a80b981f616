use std::collections::BTreeMap;

use tokio::sync::mpsc::Receiver;

use crate::{
    invariants::Day,
    models::{DayRecord, Outcome, ParsedRecord},
    summary::RunSummary,
};

/// Groups records by day of month, keeping input order within each group.
///
/// The key is the day number alone, so the 1st of August and the 1st of
/// September share a partition.
#[derive(Debug, Default)]
pub struct Partitioner {
    groups: BTreeMap<Day, Vec<DayRecord>>,
    trap: Vec<ParsedRecord>,
    summary: RunSummary,
}

impl Partitioner {
    pub fn accept(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Partition(record) => {
                self.summary.record_partitioned(record.day, record.record.response);
                self.groups.entry(record.day).or_default().push(record);
            }
            Outcome::Trap(trap) => {
                self.summary.record_trapped(&trap.reason);
                self.trap.push(trap.record);
            }
            Outcome::Malformed => self.summary.record_malformed(),
        }
    }

    pub fn groups(&self) -> impl Iterator<Item = (Day, &[DayRecord])> {
        self.groups.iter().map(|(day, records)| (*day, records.as_slice()))
    }

    pub fn trap(&self) -> &[ParsedRecord] {
        &self.trap
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }
}

/// Drains outcome batches until the workers hang up. Nothing is final until
/// this returns.
pub async fn collect(mut rx: Receiver<Vec<Outcome>>) -> Partitioner {
    let mut partitioner = Partitioner::default();
    while let Some(batch) = rx.recv().await {
        for outcome in batch {
            partitioner.accept(outcome);
        }
    }
    partitioner
}
