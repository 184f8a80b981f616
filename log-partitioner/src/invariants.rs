use chrono::{DateTime, Datelike, TimeZone};
use derive_more::{Display, Into};

/// Calendar day of month, always within `1..=31`.
#[derive(Debug, Display, Into, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(u8);

impl Day {
    pub fn of<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        // chrono never yields a day outside 1..=31
        Self(instant.day() as u8)
    }

    /// Name of the partition file holding this day's records.
    pub fn partition_name(self) -> String {
        format!("{:02}", self.0)
    }

    pub fn all() -> impl Iterator<Item = Day> {
        (1..=31).map(Self)
    }
}

impl TryFrom<u32> for Day {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1..=31 => Ok(Self(value as u8)),
            _ => Err(format!("day {value} is outside 1..=31")),
        }
    }
}
