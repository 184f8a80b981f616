use std::{io, path::PathBuf};

use thiserror::Error;
use tokio::task::JoinError;

/// Problems with a single record. These never abort a run.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line does not match the access log format")]
    Parse,

    #[error("response code {0} failed validation")]
    Validation(u16),

    #[error("timestamp {time:?} is not dd/MMM/yyyy:HH:mm:ss Z: {source}")]
    DateParse {
        time: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Resource failures that end the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("pipeline task failed: {0}")]
    Task(#[from] JoinError),

    #[error("failed to encode run summary: {0}")]
    Summary(#[from] serde_json::Error),
}
