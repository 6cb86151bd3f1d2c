//! # Common Types
//!
//! This module contains the common types shared by the revision source, the
//! command runner and the chart renderer.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// A single commit selected for benchmarking.
///
/// Revisions are produced by [`crate::analysis::GitRepository::list_recent_revisions`]
/// and never change afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revision {
    /// Abbreviated commit hash
    pub id: String,
    /// Commit summary, shortened for display
    pub summary: String,
}

impl Revision {
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
        }
    }

    /// Label used for the revision's tick on the x axis.
    pub fn tick_label(&self) -> String {
        format!("{}: {}", self.id, self.summary)
    }
}

/// A shell command whose output carries the measured value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchCommand(String);

impl BenchCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self(command.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Legend label: base name of the program the command starts with.
    ///
    /// `"./target/release/bench --fast"` is labeled `"bench"`.
    pub fn label(&self) -> String {
        let program = self.0.split_whitespace().next().unwrap_or_default();
        Path::new(program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| program.to_string())
    }
}

impl fmt::Display for BenchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Samples of one command at one revision.
pub type RevisionResultSet = Vec<f64>;

/// Results of a whole run, indexed as `[command][revision][sample]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultMatrix {
    series: Vec<Vec<RevisionResultSet>>,
}

impl ResultMatrix {
    /// Creates a matrix with one empty series per command.
    pub fn with_commands(command_count: usize) -> Self {
        Self {
            series: vec![Vec::new(); command_count],
        }
    }

    pub fn push(&mut self, command_index: usize, samples: RevisionResultSet) {
        self.series[command_index].push(samples);
    }

    /// Per-revision sample sets for one command.
    pub fn series(&self, command_index: usize) -> &[RevisionResultSet] {
        &self.series[command_index]
    }

    pub fn command_count(&self) -> usize {
        self.series.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[RevisionResultSet]> {
        self.series.iter().map(Vec::as_slice)
    }

    /// Checks that every series holds one sample set per revision.
    pub fn has_shape(&self, command_count: usize, revision_count: usize) -> bool {
        self.series.len() == command_count
            && self.series.iter().all(|series| series.len() == revision_count)
    }
}

impl From<Vec<Vec<RevisionResultSet>>> for ResultMatrix {
    fn from(series: Vec<Vec<RevisionResultSet>>) -> Self {
        Self { series }
    }
}
