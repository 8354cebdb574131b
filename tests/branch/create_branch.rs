use crate::common::command::{
    branch_id, commit_file, current_branch, head_id, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("dev")]
#[case("feature/login")]
#[case("release-1.0")]
fn create_branch_at_head(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "create", name])
        .assert()
        .success()
        .stdout("");

    assert_eq!(branch_id(dir, name), head_id(dir));
    // the active branch does not change
    assert_eq!(current_branch(dir), "master");

    Ok(())
}

#[rstest]
fn new_commits_only_move_the_current_branch(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "dev"])
        .assert()
        .success();
    let fork = head_id(dir);

    commit_file(dir, "1.txt", "master only\n", "Master change");

    assert_eq!(branch_id(dir, "dev"), fork);
    assert_eq!(branch_id(dir, "master"), head_id(dir));
    assert_ne!(head_id(dir), fork);

    Ok(())
}

#[rstest]
fn create_duplicate_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_twig_command(dir, &["branch", "create", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));

    Ok(())
}

#[rstest]
#[case("bad..name")]
#[case(".hidden")]
#[case("ends.lock")]
#[case("has space")]
fn create_branch_with_invalid_name_fails(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["branch", "create", name])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid branch name"));

    Ok(())
}
