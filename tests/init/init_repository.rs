use crate::common::ROOT_COMMIT_MESSAGE;
use crate::common::command::{
    branch_id, cat_commit, current_branch, head_id, repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn init_creates_metadata_and_root_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty twig repository in",
        ))
        .stdout(predicate::str::contains(".twig"));

    let metadata = repository_dir.path().join(".twig");
    assert!(metadata.join("objects").is_dir());
    assert!(metadata.join("index").is_file());

    let root = head_id(repository_dir.path());
    assert_eq!(root, branch_id(repository_dir.path(), "master"));
    assert_eq!(current_branch(repository_dir.path()), "master");

    // the root commit has no parents and tracks nothing
    assert_eq!(
        cat_commit(repository_dir.path(), &root),
        format!("timestamp 0 +0000\n\n{}\n", ROOT_COMMIT_MESSAGE)
    );

    Ok(())
}

#[rstest]
fn init_at_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    assert!(
        repository_dir
            .path()
            .join("nested")
            .join("project")
            .join(".twig")
            .join("HEAD")
            .is_file()
    );

    Ok(())
}

#[rstest]
fn init_twice_fails(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_twig_command(repository_dir.path(), &["init"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A twig version-control system already exists in the current directory.",
        ));

    Ok(())
}

#[test]
fn root_commit_is_the_same_in_every_repository() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    run_twig_command(first.path(), &["init"]).assert().success();
    run_twig_command(second.path(), &["init"]).assert().success();

    assert_eq!(head_id(first.path()), head_id(second.path()));

    Ok(())
}
