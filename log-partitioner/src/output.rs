use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use crate::{
    error::PipelineError,
    invariants::Day,
    models::{DayRecord, ParsedRecord},
    partition::Partitioner,
};

pub const HEADER: [&str; 5] = ["day", "ip", "time", "request", "size"];
pub const TRAP_FILE: &str = "trap";

/// One tab-delimited output line. Trapped records have no day yet and keep
/// their raw timestamp.
#[derive(Debug, Serialize)]
struct Row<'a> {
    day: Option<u8>,
    ip: &'a str,
    time: String,
    request: &'a str,
    size: &'a str,
}

impl<'a> From<&'a DayRecord> for Row<'a> {
    fn from(record: &'a DayRecord) -> Self {
        let r = &record.record;
        Self {
            day: Some(record.day.into()),
            ip: &r.ip,
            time: r.time.timestamp_millis().to_string(),
            request: &r.request,
            size: &r.size,
        }
    }
}

impl<'a> From<&'a ParsedRecord> for Row<'a> {
    fn from(record: &'a ParsedRecord) -> Self {
        Self {
            day: None,
            ip: &record.ip,
            time: record.time.clone(),
            request: &record.request,
            size: &record.size,
        }
    }
}

/// Writes one file per day plus the trap file, replacing output from any
/// earlier run.
pub async fn write_all(partitioner: &Partitioner, dir: &Path) -> Result<(), PipelineError> {
    fs::create_dir_all(dir).await.map_err(write_err(dir))?;
    clear_previous(dir).await?;

    let mut days = 0;
    for (day, records) in partitioner.groups() {
        let path = dir.join(day.partition_name());
        write_file(&path, records.iter().map(Row::from)).await?;
        info!(day = %day, rows = records.len(), path = %path.display(), "wrote partition");
        days += 1;
    }
    if days == 0 {
        warn!("no records reached a day partition");
    }

    let path = dir.join(TRAP_FILE);
    write_file(&path, partitioner.trap().iter().map(Row::from)).await?;
    info!(rows = partitioner.trap().len(), path = %path.display(), "wrote trap");
    Ok(())
}

async fn clear_previous(dir: &Path) -> Result<(), PipelineError> {
    let stale = Day::all()
        .map(Day::partition_name)
        .chain(std::iter::once(TRAP_FILE.to_string()));
    for name in stale {
        let path = dir.join(name);
        match fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(write_err(&path)(e)),
        }
    }
    Ok(())
}

async fn write_file<'a>(
    path: &Path,
    rows: impl Iterator<Item = Row<'a>>,
) -> Result<(), PipelineError> {
    let bytes = encode(rows).map_err(write_err(path))?;
    fs::write(path, bytes).await.map_err(write_err(path))
}

/// Header always comes first, even when there are no rows.
fn encode<'a>(rows: impl Iterator<Item = Row<'a>>) -> io::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.into_inner().map_err(|e| e.into_error())
}

fn write_err(path: &Path) -> impl Fn(io::Error) -> PipelineError {
    let path: PathBuf = path.to_path_buf();
    move |source| PipelineError::Write {
        path: path.clone(),
        source,
    }
}
