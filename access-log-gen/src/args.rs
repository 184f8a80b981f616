use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use derive_getters::Getters;

#[derive(Parser, Debug, Getters)]
#[command(name = "access-log-gen")]
#[command(about = "Generate a synthetic Apache access log file", long_about = None)]
pub struct CliArgs {
    #[arg(long, default_value = "data/access_log.txt")]
    output: PathBuf,

    #[arg(long, default_value_t = 10_000)]
    lines: usize,

    #[arg(long, default_value = "1995-08-01")]
    start: NaiveDate,

    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// Fixed seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 0.01)]
    malformed_ratio: f64,
}
