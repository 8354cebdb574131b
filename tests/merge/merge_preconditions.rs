use crate::common::command::{
    commit_file, head_id, init_repository_dir, run_twig_command, twig_add, twig_merge,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn merge_with_staged_changes_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "other"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    twig_add(dir, "new.txt").assert().success();

    twig_merge(dir, "other")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("You have uncommitted changes."));

    Ok(())
}

#[rstest]
fn merge_with_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    twig_merge(init_repository_dir.path(), "ghost")
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}

#[rstest]
fn merge_with_itself_fails(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    twig_merge(init_repository_dir.path(), "master")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot merge a branch with itself."));

    Ok(())
}

#[rstest]
fn merge_refuses_to_overwrite_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "other"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_file(dir, "incoming.txt", "theirs\n", "Add incoming");
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    commit_file(dir, "1.txt", "diverge\n", "Diverge");
    let before = head_id(dir);

    write_file(FileSpec::new(dir.join("incoming.txt"), "mine\n".to_string()));

    twig_merge(dir, "other")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(head_id(dir), before);
    assert_eq!(read_file(&dir.join("incoming.txt")), "mine\n");

    Ok(())
}
