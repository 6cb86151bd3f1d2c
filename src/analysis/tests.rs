use super::git::shorten_summary;
use super::*;
use crate::error::Error;
use crate::types::BenchCommand;
use crate::utils::ExtractError;
use git2::{Commit, Repository, Signature};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a repository with `count` commits, commit `i` writing `i` to value.txt
fn setup_test_repo(count: usize) -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();
    let signature = Signature::now("Test User", "test@example.com").unwrap();

    for i in 1..=count {
        fs::write(temp_dir.path().join("value.txt"), format!("{}\n", i)).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("value.txt")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<Commit> = repo
            .head()
            .ok()
            .and_then(|head| head.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parents: Vec<&Commit> = parents.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            &format!("Commit {}", i),
            &tree,
            &parents,
        )
        .unwrap();
    }

    (temp_dir, repo)
}

fn read_value(temp_dir: &TempDir) -> String {
    fs::read_to_string(temp_dir.path().join("value.txt"))
        .unwrap()
        .trim()
        .to_string()
}

fn commands(commands: &[&str]) -> Vec<BenchCommand> {
    commands.iter().map(|command| BenchCommand::new(*command)).collect()
}

#[test]
fn test_open_invalid_path() {
    let result = GitRepository::open("/nonexistent/path", None);
    assert!(matches!(result, Err(Error::Git(_))));
}

#[test]
fn test_open_detects_primary_branch() {
    let (temp_dir, repo) = setup_test_repo(1);
    let branch = repo.head().unwrap().shorthand().unwrap().to_string();

    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    assert_eq!(repository.primary_branch(), branch);
}

#[test]
fn test_open_unknown_branch() {
    let (temp_dir, _repo) = setup_test_repo(1);

    let result = GitRepository::open(temp_dir.path(), Some("trunk"));
    match result {
        Err(Error::NoPrimaryBranch { tried }) => assert_eq!(tried, vec!["trunk".to_string()]),
        other => panic!("expected NoPrimaryBranch, got {:?}", other.err()),
    }
}

#[test]
fn test_list_recent_revisions_oldest_first() {
    let (temp_dir, _repo) = setup_test_repo(3);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let head = repository.head().unwrap();

    let revisions = repository.list_recent_revisions(3).unwrap();
    let summaries: Vec<&str> = revisions.iter().map(|r| r.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Commit 1", "Commit 2", "Commit 3"]);
    assert!(head.starts_with(&revisions[2].id));
}

#[test]
fn test_list_recent_revisions_count() {
    let (temp_dir, _repo) = setup_test_repo(5);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let head = repository.head().unwrap();

    let revisions = repository.list_recent_revisions(2).unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[0].summary, "Commit 4");
    assert!(head.starts_with(&revisions[1].id));

    assert_eq!(repository.list_recent_revisions(10).unwrap().len(), 5);
    assert!(repository.list_recent_revisions(0).unwrap().is_empty());
}

#[test]
fn test_checkout_revision() {
    let (temp_dir, repo) = setup_test_repo(3);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(3).unwrap();

    repository.checkout(&revisions[0].id).unwrap();
    assert_eq!(read_value(&temp_dir), "1");
    assert!(repository.head().unwrap().starts_with(&revisions[0].id));
    assert!(repo.head_detached().unwrap());

    repository.checkout_primary_branch().unwrap();
    assert_eq!(read_value(&temp_dir), "3");
    assert!(!repo.head_detached().unwrap());
    assert_eq!(
        repo.head().unwrap().shorthand().unwrap(),
        repository.primary_branch()
    );
}

#[test]
fn test_checkout_nonexistent_revision() {
    let (temp_dir, _repo) = setup_test_repo(1);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();

    assert!(repository.checkout("deadbeefdeadbeef").is_err());
    assert!(repository.checkout("no-such-branch").is_err());
}

#[test]
fn test_checkout_refuses_conflicting_changes() {
    let (temp_dir, _repo) = setup_test_repo(2);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(2).unwrap();

    fs::write(temp_dir.path().join("value.txt"), "local edit\n").unwrap();
    assert!(repository.checkout(&revisions[0].id).is_err());
    assert_eq!(read_value(&temp_dir), "local edit");
}

#[test]
fn test_guard_restores_primary_branch_on_drop() {
    let (temp_dir, repo) = setup_test_repo(3);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(3).unwrap();

    {
        let _guard = repository.primary_branch_guard().unwrap();
        repository.checkout(&revisions[1].id).unwrap();
        assert_eq!(read_value(&temp_dir), "2");
    }

    assert_eq!(read_value(&temp_dir), "3");
    assert!(!repo.head_detached().unwrap());
}

#[test]
fn test_guard_explicit_restore() {
    let (temp_dir, repo) = setup_test_repo(2);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(2).unwrap();

    let guard = repository.primary_branch_guard().unwrap();
    repository.checkout(&revisions[0].id).unwrap();
    guard.restore().unwrap();

    assert_eq!(read_value(&temp_dir), "2");
    assert!(!repo.head_detached().unwrap());
}

#[test]
fn test_shorten_summary() {
    assert_eq!(shorten_summary("Fix parser", 48), "Fix parser");
    assert_eq!(shorten_summary("  Fix \t the   parser ", 48), "Fix the parser");

    let long = "Rework the revision walker so that merges are listed in topological order";
    let shortened = shorten_summary(long, 48);
    assert_eq!(shortened, "Rework the revision walker so that merges [...]");
    assert!(shortened.chars().count() <= 48);

    assert_eq!(shorten_summary("Supercalifragilisticexpialidocious", 10), "[...]");
}

#[test]
fn test_shorten_summary_breaks_after_hyphens() {
    let long = "Update self-contained-long-hyphenated-option-parsing module";
    let shortened = shorten_summary(long, 48);
    assert_eq!(shortened, "Update self-contained-long-hyphenated- [...]");
    assert!(shortened.chars().count() <= 48);

    // no break next to digits or a single letter
    assert_eq!(
        shorten_summary("Bump x-ray-2-beta release tooling for nightly builds", 16),
        "Bump [...]"
    );
}

#[test]
fn test_run_reads_each_revision() {
    let (temp_dir, _repo) = setup_test_repo(3);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(3).unwrap();
    let commands = commands(&["cat value.txt"]);

    let results = Runner::new(&repository, &commands)
        .run(&revisions, 1, -1)
        .unwrap();

    assert_eq!(results.series(0), &[vec![1.0], vec![2.0], vec![3.0]]);
}

#[test]
fn test_run_result_shape() {
    let (temp_dir, _repo) = setup_test_repo(2);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(2).unwrap();
    let commands = commands(&["echo 10", "echo size: 4 kb, took 2.5s"]);

    let results = Runner::new(&repository, &commands)
        .run(&revisions, 3, 0)
        .unwrap();

    assert!(results.has_shape(2, 2));
    for series in results.iter() {
        assert!(series.iter().all(|samples| samples.len() == 3));
    }
    assert_eq!(results.series(0)[1], vec![10.0, 10.0, 10.0]);
    assert_eq!(results.series(1)[0], vec![4.0, 4.0, 4.0]);
}

#[test]
fn test_run_stops_on_failing_command() {
    let (temp_dir, _repo) = setup_test_repo(2);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(2).unwrap();
    let commands = commands(&["echo 1; echo broken >&2; exit 3"]);

    let result = Runner::new(&repository, &commands).run(&revisions, 1, -1);
    match result {
        Err(Error::CommandFailed {
            revision, stderr, ..
        }) => {
            assert_eq!(revision, revisions[0].id);
            assert_eq!(stderr, "broken");
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[test]
fn test_run_stops_when_no_number() {
    let (temp_dir, _repo) = setup_test_repo(2);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(2).unwrap();
    let commands = commands(&["echo done"]);

    let result = Runner::new(&repository, &commands).run(&revisions, 1, -1);
    assert!(matches!(
        result,
        Err(Error::Extraction {
            source: ExtractError::NoNumber,
            ..
        })
    ));
}

#[test]
fn test_run_index_out_of_range() {
    let (temp_dir, _repo) = setup_test_repo(1);
    let repository = GitRepository::open(temp_dir.path(), None).unwrap();
    let revisions = repository.list_recent_revisions(1).unwrap();
    let commands = commands(&["echo 1 2"]);

    let result = Runner::new(&repository, &commands).run(&revisions, 1, 5);
    assert!(matches!(
        result,
        Err(Error::Extraction {
            source: ExtractError::IndexOutOfRange { index: 5, count: 2 },
            ..
        })
    ));
}
