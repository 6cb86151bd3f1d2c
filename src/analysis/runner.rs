use log::{debug, info};
use std::process::Command;

use crate::analysis::GitRepository;
use crate::error::{Error, Result};
use crate::types::{BenchCommand, ResultMatrix, Revision};
use crate::utils::extract_number;

/// Runs benchmark commands against every revision of a repository.
pub struct Runner<'a> {
    repository: &'a GitRepository,
    commands: &'a [BenchCommand],
}

impl<'a> Runner<'a> {
    pub fn new(repository: &'a GitRepository, commands: &'a [BenchCommand]) -> Self {
        Self {
            repository,
            commands,
        }
    }

    /// Check out each revision in turn and measure every command `samples`
    /// times on it.
    ///
    /// The first failing command stops the whole run. The working copy is left
    /// at whatever revision was being measured, restoring it is up to the
    /// caller.
    pub fn run(
        &self,
        revisions: &[Revision],
        samples: usize,
        extract_index: i64,
    ) -> Result<ResultMatrix> {
        let mut results = ResultMatrix::with_commands(self.commands.len());

        for (position, revision) in revisions.iter().enumerate() {
            info!(
                "[{}/{}] {}: {}",
                position + 1,
                revisions.len(),
                revision.id,
                revision.summary
            );
            self.repository.checkout(&revision.id)?;

            for (index, command) in self.commands.iter().enumerate() {
                let values = (0..samples)
                    .map(|_| self.measure(command, revision, extract_index))
                    .collect::<Result<Vec<_>>>()?;
                results.push(index, values);
            }
        }

        Ok(results)
    }

    /// Run `command` once in the working copy and pick a number from its output.
    fn measure(
        &self,
        command: &BenchCommand,
        revision: &Revision,
        extract_index: i64,
    ) -> Result<f64> {
        let output = shell(command.as_str())
            .current_dir(self.repository.workdir())
            .output()
            .map_err(|source| Error::Spawn {
                command: command.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: command.to_string(),
                revision: revision.id.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value = extract_number(&stdout, extract_index).map_err(|source| Error::Extraction {
            command: command.to_string(),
            revision: revision.id.clone(),
            source,
        })?;

        debug!("{} `{}` -> {}", revision.id, command, value);
        Ok(value)
    }
}

#[cfg(unix)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("sh");
    shell.arg("-c").arg(command);
    shell
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut shell = Command::new("cmd");
    shell.arg("/C").arg(command);
    shell
}
