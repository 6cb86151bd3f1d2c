use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

use crate::utils::ExtractError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error("{} is a bare repository, there is no working copy to check out", .0.display())]
    BareRepository(PathBuf),

    #[error("no primary branch found, tried {}", .tried.join(", "))]
    NoPrimaryBranch { tried: Vec<String> },

    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed at revision {revision} ({status})\n{stderr}")]
    CommandFailed {
        command: String,
        revision: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("can't extract a number from the output of `{command}` at revision {revision}")]
    Extraction {
        command: String,
        revision: String,
        #[source]
        source: ExtractError,
    },

    #[error("too many commands: {count} configured, only {max} colors available")]
    TooManyCommands { count: usize, max: usize },

    #[error("nothing to plot, no revisions were benchmarked")]
    NoRevisions,

    #[error("result matrix doesn't match {commands} command(s) over {revisions} revision(s)")]
    ShapeMismatch { commands: usize, revisions: usize },

    #[error("chart rendering failed: {0}")]
    Plot(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
