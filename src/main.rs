//! detcurve CLI binary
//! Sweeps a threshold range over keyword-spotting scores and writes the
//! DET stats file.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

mod cli;
use cli::Cli;

use detcurve::constants::SECONDS_PER_HOUR;
use detcurve::{evaluate, labels, load_scores, write_report};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // reject bad sweep parameters before touching any file
    let cfg = cli.sweep_config();
    cfg.validate()?;

    let score_reader = BufReader::new(
        File::open(&cli.score_file)
            .with_context(|| format!("opening score file {}", cli.score_file.display()))?,
    );
    let scores = load_scores(score_reader, cli.keyword)
        .with_context(|| format!("loading scores from {}", cli.score_file.display()))?;

    let label_reader = BufReader::new(
        File::open(&cli.test_data)
            .with_context(|| format!("opening label file {}", cli.test_data.display()))?,
    );
    let part = labels::partition(label_reader, cli.keyword, &scores)
        .with_context(|| format!("partitioning labels from {}", cli.test_data.display()))?;

    info!(
        "filler total duration hours: {}",
        part.filler_duration / SECONDS_PER_HOUR
    );

    let records = evaluate(&part, &cfg)?;

    let out = BufWriter::new(
        File::create(&cli.stats_file)
            .with_context(|| format!("creating stats file {}", cli.stats_file.display()))?,
    );
    write_report(out, &records)
        .with_context(|| format!("writing stats file {}", cli.stats_file.display()))?;

    info!(
        "wrote {} threshold records to {}",
        records.len(),
        cli.stats_file.display()
    );
    Ok(())
}
