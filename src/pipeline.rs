//! # Benchmark Pipeline
//!
//! Wires the revision source, the command runner and the chart renderer
//! together for one run.

use log::{info, warn};
use std::path::Path;

use crate::analysis::{GitRepository, Runner};
use crate::config::Config;
use crate::error::Result;
use crate::plotting::render;
use crate::types::{BenchCommand, ResultMatrix, Revision};

/// Everything measured during a run, ready to be plotted.
#[derive(Clone, Debug)]
pub struct Evolution {
    pub commands: Vec<BenchCommand>,
    pub revisions: Vec<Revision>,
    pub results: ResultMatrix,
}

impl Evolution {
    pub fn render(&self, output: &Path, y_label: &str) -> Result<()> {
        render(&self.commands, &self.revisions, &self.results, output, y_label)
    }
}

/// Benchmark every configured command over the recent history of the
/// configured repository.
///
/// The configuration is validated before the repository is touched. The
/// primary branch is checked out first and is checked out again once the run
/// is over, whether it succeeded or not.
pub fn benchmark(config: &Config) -> Result<Evolution> {
    config.validate()?;

    let repository = GitRepository::open(&config.repository, config.branch.as_deref())?;
    let guard = repository.primary_branch_guard()?;

    let revisions = repository.list_recent_revisions(config.number)?;
    info!(
        "Benchmarking {} command(s) over {} revision(s) of {}, {} sample(s) each",
        config.commands.len(),
        revisions.len(),
        repository.workdir().display(),
        config.samples
    );

    let outcome = Runner::new(&repository, &config.commands).run(
        &revisions,
        config.samples,
        config.extract_index,
    );
    let restored = guard.restore();

    let results = match (outcome, restored) {
        (Ok(results), Ok(())) => results,
        (Err(e), Ok(())) => return Err(e),
        (Ok(_), Err(e)) => return Err(e),
        (Err(e), Err(restore_error)) => {
            warn!(
                "Failed to restore {} after the run failed: {}",
                repository.primary_branch(),
                restore_error
            );
            return Err(e);
        }
    };

    Ok(Evolution {
        commands: config.commands.clone(),
        revisions,
        results,
    })
}

/// Benchmark, then write the chart to the configured output.
pub fn run(config: &Config) -> Result<Evolution> {
    let evolution = benchmark(config)?;
    evolution.render(&config.output, &config.y_label)?;
    Ok(evolution)
}
