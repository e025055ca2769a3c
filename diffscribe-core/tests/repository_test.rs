//! Integration tests for the repository adapter against scratch repositories.

mod common;

use common::TestRepo;
use diffscribe_core::ai::models::{PipelineShape, select_pipeline};
use diffscribe_core::error::GitError;
use diffscribe_core::git::{
    LONG_DIFF_LINES, get_staged_diff, get_staged_diff_with_limit, get_staged_files, is_repository,
};

#[test]
fn plain_directory_is_not_a_repository() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!is_repository(&dir.path().to_string_lossy()));
}

#[test]
fn work_tree_and_subdirectories_are_repositories() {
    let repo = TestRepo::new();
    repo.write_file("src/lib.rs", "pub fn f() {}\n");

    assert!(is_repository(&repo.path_str()));
    assert!(is_repository(&repo.path().join("src").to_string_lossy()));
}

#[test]
fn bare_repository_is_not_a_work_tree() {
    let dir = tempfile::tempdir().unwrap();
    git2::Repository::init_bare(dir.path()).unwrap();
    assert!(!is_repository(&dir.path().to_string_lossy()));
}

#[test]
fn nothing_staged_is_no_staged_changes() {
    let repo = TestRepo::new();
    // unstaged edits do not count
    repo.write_file("README.md", "# changed\n");

    let err = get_staged_diff(&repo.path_str()).unwrap_err();
    assert!(matches!(err, GitError::NoStagedChanges));
    assert_eq!(err.to_string(), "No staged changes found");
}

#[test]
fn staged_addition_is_returned_as_diff() {
    let repo = TestRepo::new();
    repo.write_file("src/math.rs", "pub fn add(a: i32, b: i32) -> i32 { a + b }\n");
    repo.stage("src/math.rs");

    let diff = get_staged_diff(&repo.path_str()).unwrap();

    assert!(diff.text.contains("diff --git a/src/math.rs b/src/math.rs"));
    assert!(diff.text.contains("+pub fn add(a: i32, b: i32) -> i32 { a + b }"));
    assert!(diff.line_count() > 1);
}

#[test]
fn diff_over_limit_is_a_controlled_failure() {
    let repo = TestRepo::new();
    repo.write_file("big.txt", &"line of text\n".repeat(200));
    repo.stage("big.txt");

    let err = get_staged_diff_with_limit(&repo.path_str(), 256).unwrap_err();
    assert!(matches!(err, GitError::DiffTooLarge { limit: 256 }));
}

#[test]
fn diff_exactly_at_limit_is_accepted() {
    let repo = TestRepo::new();
    repo.write_file("big.txt", &"line of text\n".repeat(200));
    repo.stage("big.txt");

    let full = get_staged_diff(&repo.path_str()).unwrap();
    let size = full.text.len();

    let exact = get_staged_diff_with_limit(&repo.path_str(), size).unwrap();
    assert_eq!(exact.text, full.text);

    let err = get_staged_diff_with_limit(&repo.path_str(), size - 1).unwrap_err();
    assert!(matches!(err, GitError::DiffTooLarge { .. }));
}

#[test]
fn diff_of_bound_length_takes_single_pass() {
    let repo = TestRepo::new();
    // six header lines plus the added lines
    let body: String = (0..LONG_DIFF_LINES - 6).map(|i| format!("row {i}\n")).collect();
    repo.write_file("rows.txt", &body);
    repo.stage("rows.txt");

    let diff = get_staged_diff(&repo.path_str()).unwrap();

    assert!(diff.text.ends_with('\n'));
    assert_eq!(diff.line_count(), LONG_DIFF_LINES);
    assert_eq!(select_pipeline(&diff.stats()), PipelineShape::SinglePass);
}

#[test]
fn git_failure_reports_its_stderr() {
    let repo = TestRepo::new();
    // a corrupt index makes git print an error and exit non-zero
    std::fs::write(repo.path().join(".git").join("index"), b"not an index").unwrap();

    let err = get_staged_diff(&repo.path_str()).unwrap_err();
    match err {
        GitError::CommandFailed(detail) => assert!(detail.contains("index"), "{detail}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn staged_files_lists_index_changes_only() {
    let repo = TestRepo::new();
    repo.write_file("a.txt", "a\n");
    repo.write_file("b.txt", "b\n");
    repo.stage("a.txt");

    let files = get_staged_files(&repo.path_str()).unwrap();
    assert_eq!(files, ["a.txt"]);
}
