mod args;
mod generator;

use std::{
    fs::File,
    io::{BufWriter, Write},
    process::ExitCode,
};

use args::CliArgs;
use clap::Parser;
use generator::LogGenerator;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => {
            info!(lines = args.lines(), path = %args.output().display(), "wrote access log");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut generator = LogGenerator::new(
        *args.start(),
        *args.days(),
        *args.lines(),
        *args.malformed_ratio(),
    )
    .ok_or("invalid --start, --days, --lines or --malformed-ratio")?;
    let mut rng = match args.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    if let Some(parent) = args.output().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(args.output())?);
    for _ in 0..*args.lines() {
        let line = generator
            .next_line(&mut rng)
            .ok_or("timestamp out of range")?;
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}
