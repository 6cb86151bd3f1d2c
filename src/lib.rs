//! # Git Evolution Benchmarking Library
//!
//! `gitevolution` benchmarks a project across its recent Git history: it
//! checks out each revision in turn, runs user supplied commands against the
//! working copy, picks a number out of each command's output and plots how
//! the numbers evolve from one revision to the next.
//!
//! ## Features
//!
//! - List the most recent revisions of a repository, oldest first
//! - Run any number of shell commands several times per revision
//! - Extract a result from free-form command output
//! - Plot every sample and the per-revision mean of each command
//! - Restore the primary branch once the run is over, even when it fails
//!
//! ## Example
//!
//! ```no_run
//! use gitevolution::{pipeline, BenchCommand, Config};
//!
//! let mut config = Config::new("path/to/project");
//! config.commands = vec![BenchCommand::new("cargo bench --quiet | tail -n 1")];
//! config.number = 20;
//! config.samples = 3;
//!
//! let evolution = pipeline::run(&config)?;
//! println!("{} revisions plotted", evolution.revisions.len());
//! # Ok::<(), gitevolution::Error>(())
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{GitRepository, Runner};
pub use config::Config;
pub use error::{Error, Result};
pub use types::{BenchCommand, ResultMatrix, Revision};
