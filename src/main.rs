//! Git Evolution Benchmarking Tool
//!
//! Runs benchmark commands against recent Git revisions of a project and plots
//! the evolution of their results.

use anyhow::{Context, Result};
use clap::Parser;

use gitevolution::config::{Args, Config};
use gitevolution::pipeline;

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = Config::from_args(args).context("Failed to resolve the output path")?;

    let evolution = pipeline::benchmark(&config)
        .with_context(|| format!("Benchmarking {} failed", config.repository.display()))?;

    // Raw results, for inspection
    println!("{}", serde_json::to_string_pretty(&evolution.results)?);

    evolution
        .render(&config.output, &config.y_label)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    Ok(())
}
