use std::path::PathBuf;

use tokio::{
    fs::File,
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc::Sender,
};

use crate::error::PipelineError;

/// Streams the input file downstream in chunks of `chunk_lines` lines.
/// Returns the number of lines read.
pub async fn read_lines(
    path: PathBuf,
    chunk_lines: usize,
    tx: Sender<Vec<String>>,
) -> Result<usize, PipelineError> {
    let read_err = |source| PipelineError::Read {
        path: path.clone(),
        source,
    };
    let file = File::open(&path).await.map_err(read_err)?;
    let mut reader = BufReader::new(file);
    let mut raw = Vec::new();
    let mut chunk = Vec::with_capacity(chunk_lines);
    let mut total = 0;
    loop {
        raw.clear();
        if reader.read_until(b'\n', &mut raw).await.map_err(read_err)? == 0 {
            break;
        }
        chunk.push(decode_line(&raw));
        total += 1;
        if chunk.len() >= chunk_lines && tx.send(chunk.split_off(0)).await.is_err() {
            return Ok(total);
        }
    }
    if !chunk.is_empty() {
        tx.send(chunk).await.ok();
    }
    Ok(total)
}

fn decode_line(raw: &[u8]) -> String {
    let trimmed = raw.strip_suffix(b"\n").unwrap_or(raw);
    let trimmed = trimmed.strip_suffix(b"\r").unwrap_or(trimmed);
    String::from_utf8_lossy(trimmed).to_string()
}
