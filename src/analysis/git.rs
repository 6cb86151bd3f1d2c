use git2::{build::CheckoutBuilder, BranchType, Repository, Sort};
use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Revision;

/// Longest commit summary shown next to a revision id.
pub const MAX_SUMMARY_LENGTH: usize = 48;

/// Branches tried, in order, when no primary branch is configured.
pub const PRIMARY_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

const SUMMARY_PLACEHOLDER: &str = " [...]";

/// A working copy whose history gets benchmarked.
///
/// The handle never changes the process working directory. Commands that must
/// run inside the working copy take [`GitRepository::workdir`] explicitly.
pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
    primary_branch: String,
}

impl GitRepository {
    /// Open the repository at `path`.
    ///
    /// `primary_branch` names the branch restored after a run. When it is
    /// `None`, the first existing branch of [`PRIMARY_BRANCH_CANDIDATES`] is used.
    pub fn open(path: impl AsRef<Path>, primary_branch: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| Error::BareRepository(path.to_path_buf()))?
            .to_path_buf();
        let primary_branch = resolve_primary_branch(&repo, primary_branch)?;
        debug!(
            "Opened {} with primary branch {}",
            workdir.display(),
            primary_branch
        );

        Ok(Self {
            repo,
            workdir,
            primary_branch,
        })
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    pub fn primary_branch(&self) -> &str {
        &self.primary_branch
    }

    /// Full id of the commit currently checked out.
    pub fn head(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Switch the working copy to `revision`: a commit id, tag or branch name.
    ///
    /// Branches keep HEAD attached, anything else detaches it. Local
    /// modifications that conflict with the target make the checkout fail.
    pub fn checkout(&self, revision: &str) -> Result<()> {
        let (object, reference) = self.repo.revparse_ext(revision)?;
        let commit = object.peel_to_commit()?;

        let mut opts = CheckoutBuilder::new();
        opts.safe();
        self.repo.checkout_tree(commit.as_object(), Some(&mut opts))?;

        match reference
            .filter(|reference| reference.is_branch())
            .and_then(|reference| reference.name().map(str::to_string))
        {
            Some(ref_name) => self.repo.set_head(&ref_name)?,
            None => self.repo.set_head_detached(commit.id())?,
        }

        debug!("Checked out {} ({:.8})", revision, commit.id());
        Ok(())
    }

    pub fn checkout_primary_branch(&self) -> Result<()> {
        self.checkout(&self.primary_branch)
    }

    /// Check out the primary branch, and keep it checked out once the
    /// returned guard goes away.
    pub fn primary_branch_guard(&self) -> Result<PrimaryBranchGuard<'_>> {
        self.checkout_primary_branch()?;
        Ok(PrimaryBranchGuard {
            repository: self,
            armed: true,
        })
    }

    /// The `count` most recent revisions reachable from HEAD, oldest first.
    pub fn list_recent_revisions(&self, count: usize) -> Result<Vec<Revision>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push_head()?;

        let mut revisions = revwalk
            .take(count)
            .map(|oid| {
                let commit = self.repo.find_commit(oid?)?;
                let short_id = commit.as_object().short_id()?;
                Ok(Revision::new(
                    short_id.as_str().unwrap_or_default(),
                    shorten_summary(commit.summary().unwrap_or_default(), MAX_SUMMARY_LENGTH),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        // git lists newest first, charts read left to right
        revisions.reverse();
        Ok(revisions)
    }
}

/// Restores the primary branch of a [`GitRepository`] when dropped.
///
/// Prefer [`PrimaryBranchGuard::restore`], which reports a failed checkout
/// instead of only logging it.
#[must_use = "the primary branch is restored as soon as the guard is dropped"]
pub struct PrimaryBranchGuard<'repo> {
    repository: &'repo GitRepository,
    armed: bool,
}

impl PrimaryBranchGuard<'_> {
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.repository.checkout_primary_branch()
    }
}

impl Drop for PrimaryBranchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            if let Err(e) = self.repository.checkout_primary_branch() {
                warn!(
                    "Failed to restore {}: {}",
                    self.repository.primary_branch(),
                    e
                );
            }
        }
    }
}

fn resolve_primary_branch(repo: &Repository, configured: Option<&str>) -> Result<String> {
    let candidates: Vec<&str> = match configured {
        Some(branch) => vec![branch],
        None => PRIMARY_BRANCH_CANDIDATES.to_vec(),
    };

    candidates
        .iter()
        .copied()
        .find(|name| repo.find_branch(name, BranchType::Local).is_ok())
        .map(str::to_string)
        .ok_or_else(|| Error::NoPrimaryBranch {
            tried: candidates.iter().copied().map(str::to_string).collect(),
        })
}

/// Collapse whitespace and cut `summary` on a word boundary so that it fits
/// in `width` characters, placeholder included. Hyphenated words may also be
/// cut right after one of their hyphens.
pub fn shorten_summary(summary: &str, width: usize) -> String {
    let words: Vec<&str> = summary.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(SUMMARY_PLACEHOLDER.chars().count());
    let mut shortened = String::new();
    let mut length = 0;
    'words: for word in words {
        for (i, chunk) in hyphen_chunks(word).into_iter().enumerate() {
            let separator = usize::from(i == 0 && !shortened.is_empty());
            let chunk_length = chunk.chars().count();
            if length + separator + chunk_length > budget {
                break 'words;
            }
            if separator == 1 {
                shortened.push(' ');
            }
            shortened.push_str(chunk);
            length += separator + chunk_length;
        }
    }

    if shortened.is_empty() {
        SUMMARY_PLACEHOLDER.trim_start().to_string()
    } else {
        shortened + SUMMARY_PLACEHOLDER
    }
}

/// Split `word` after every hyphen that follows two letters and comes before
/// two letters, so `self-contained` yields `self-` and `contained`.
fn hyphen_chunks(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let is_letter = |i: usize| chars.get(i).is_some_and(|(_, c)| c.is_alphabetic());

    let mut chunks = Vec::new();
    let mut start = 0;
    for (i, &(offset, c)) in chars.iter().enumerate() {
        let breaks = c == '-'
            && i >= 2
            && is_letter(i - 2)
            && is_letter(i - 1)
            && is_letter(i + 1)
            && is_letter(i + 2);
        if breaks {
            let end = offset + c.len_utf8();
            chunks.push(&word[start..end]);
            start = end;
        }
    }
    chunks.push(&word[start..]);
    chunks
}
