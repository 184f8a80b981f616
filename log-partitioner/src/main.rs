mod datetime;
mod error;
mod ingest;
mod invariants;
mod models;
mod output;
mod parser;
mod partition;
mod summary;
mod validate;
mod worker;

use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use error::PipelineError;
use ingest::read_lines;
use models::Outcome;
use num_format::{Locale, ToFormattedString};
use partition::Partitioner;
use tokio::{
    sync::mpsc::{self, Receiver, Sender},
    task::JoinHandle,
    try_join,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use worker::worker_loop;

const INGEST_BUFFER_SIZE: usize = 50;
const AGGREGATOR_BUFFER_SIZE: usize = 5;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Apache access log to read
    #[arg(long, default_value = "data/access_log.txt")]
    input_path: PathBuf,

    /// Directory receiving one file per day plus the trap file
    #[arg(long, default_value = "data/out")]
    output_path: PathBuf,

    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
    chunk_lines: u32,
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    let args = Args::parse();
    init_logging();
    info!(
        input = %args.input_path.display(),
        output = %args.output_path.display(),
        "starting run"
    );

    let (ingest_tx, ingest_rx) = mpsc::channel(INGEST_BUFFER_SIZE);
    let (aggregator_tx, aggregator_rx) = mpsc::channel::<Vec<Outcome>>(AGGREGATOR_BUFFER_SIZE);

    let ingest_handle = spawn_ingest(args.input_path, args.chunk_lines as usize, ingest_tx);
    let worker_handle = spawn_workers(ingest_rx, aggregator_tx);
    let aggregator_handle = spawn_aggregator(aggregator_rx);

    let (read, (), partitioner) = try_join!(ingest_handle, worker_handle, aggregator_handle)?;
    let lines = read?;

    output::write_all(&partitioner, &args.output_path).await?;

    let summary = partitioner.summary();
    info!(
        lines = %lines.to_formatted_string(&Locale::en),
        partitioned = %summary.partitioned.to_formatted_string(&Locale::en),
        trapped = %summary.trapped.to_formatted_string(&Locale::en),
        malformed = %summary.malformed.to_formatted_string(&Locale::en),
        "finished"
    );
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn spawn_ingest(
    path: PathBuf,
    chunk_lines: usize,
    tx: Sender<Vec<String>>,
) -> JoinHandle<Result<usize, PipelineError>> {
    tokio::spawn(read_lines(path, chunk_lines, tx))
}

fn spawn_workers(rx: Receiver<Vec<String>>, tx: Sender<Vec<Outcome>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        worker_loop(tx, rx, Utc).await;
    })
}

fn spawn_aggregator(rx: Receiver<Vec<Outcome>>) -> JoinHandle<Partitioner> {
    tokio::spawn(partition::collect(rx))
}
