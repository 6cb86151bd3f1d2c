//! # Configuration
//!
//! Command line arguments and the validated settings of a run.

use clap::{ArgAction, Parser};
use std::io;
use std::path::{self, PathBuf};

use crate::error::{Error, Result};
use crate::plotting::ensure_palette_capacity;
use crate::types::BenchCommand;
use crate::utils::DEFAULT_INDEX;

/// Counts the lines of every file tracked in the repository.
pub const DEFAULT_COMMAND: &str = "git ls-files | xargs cat | wc -l";
pub const DEFAULT_NUMBER: usize = 100;
pub const DEFAULT_OUTPUT: &str = "evolution.png";
pub const DEFAULT_SAMPLES: usize = 1;
pub const DEFAULT_Y_LABEL: &str = "Benchmark result";

const LONG_ABOUT: &str = "Run benchmark against recent Git revisions of a project, \
and plot the evolution of results. If no commands are provided, total source code \
lines in the repository are counted (git ls-files | xargs cat | wc -l).";

#[derive(Parser, Debug)]
#[command(name = "gitevolution", version)]
#[command(about = "Plot benchmark results across recent Git revisions", long_about = LONG_ABOUT)]
pub struct Args {
    /// Path of a Git repository to benchmark
    pub repository: PathBuf,

    /// Commands to plot results for (can be repeated)
    pub command: Vec<String>,

    /// Maximum number of recent revisions to include (at least 1)
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUMBER, value_parser = at_least_one)]
    pub number: usize,

    /// Path to the output image
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Of all floats/ints parsed from the output, take this one (negative counts from the end)
    #[arg(
        short = 'p',
        long = "parse-float-at",
        default_value_t = DEFAULT_INDEX,
        allow_negative_numbers = true
    )]
    pub parse_float_at: i64,

    /// Amount of samples for each revision/command (at least 1)
    #[arg(short = 's', long, default_value_t = DEFAULT_SAMPLES, value_parser = at_least_one)]
    pub samples: usize,

    /// Y axis label
    #[arg(short = 'y', long, default_value = DEFAULT_Y_LABEL)]
    pub ylabel: String,

    /// Branch to check out before and after the run (default: main, then master)
    #[arg(short = 'b', long)]
    pub branch: Option<String>,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn at_least_one(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Settings of one benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub repository: PathBuf,
    pub commands: Vec<BenchCommand>,
    pub number: usize,
    pub output: PathBuf,
    pub extract_index: i64,
    pub samples: usize,
    pub y_label: String,
    pub branch: Option<String>,
}

impl Config {
    /// Defaults for benchmarking `repository`, writing the chart to the
    /// current directory.
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        Self {
            repository: repository.into(),
            commands: vec![BenchCommand::new(DEFAULT_COMMAND)],
            number: DEFAULT_NUMBER,
            output: PathBuf::from(DEFAULT_OUTPUT),
            extract_index: DEFAULT_INDEX,
            samples: DEFAULT_SAMPLES,
            y_label: DEFAULT_Y_LABEL.to_string(),
            branch: None,
        }
    }

    /// Build the settings from parsed arguments.
    ///
    /// The output path is made absolute against the current directory, so it
    /// doesn't depend on where the benchmark commands run.
    pub fn from_args(args: Args) -> io::Result<Self> {
        let commands = if args.command.is_empty() {
            vec![BenchCommand::new(DEFAULT_COMMAND)]
        } else {
            args.command.into_iter().map(BenchCommand::new).collect()
        };

        Ok(Self {
            repository: args.repository,
            commands,
            number: args.number,
            output: path::absolute(&args.output)?,
            extract_index: args.parse_float_at,
            samples: args.samples,
            y_label: args.ylabel,
            branch: args.branch,
        })
    }

    /// Check the settings a run can't do without: at least one revision,
    /// sample and command, and no more commands than chart colors.
    pub fn validate(&self) -> Result<()> {
        if self.number == 0 {
            return Err(Error::InvalidConfig(
                "the number of revisions must be at least 1".to_string(),
            ));
        }
        if self.samples == 0 {
            return Err(Error::InvalidConfig(
                "the number of samples must be at least 1".to_string(),
            ));
        }
        if self.commands.is_empty() {
            return Err(Error::InvalidConfig("no command to benchmark".to_string()));
        }
        ensure_palette_capacity(self.commands.len())
    }
}
