use crate::common::command::{
    branch_id, commit_file, init_repository_dir, run_twig_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn delete_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "dev"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "dev"]).assert().success();
    commit_file(dir, "dev.txt", "dev\n", "Dev work");
    let dev_tip = branch_id(dir, "dev");
    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    run_twig_command(dir, &["branch", "delete", "dev"])
        .assert()
        .success()
        .stdout(format!("Deleted branch dev (was {}).\n", &dev_tip[..7]));

    assert!(!dir.join(".twig").join("refs").join("heads").join("dev").exists());
    // the commit is still reachable by ID
    run_twig_command(dir, &["find", "Dev work"])
        .assert()
        .success()
        .stdout(format!("{}\n", dev_tip));

    Ok(())
}

#[rstest]
fn delete_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["branch", "delete", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cannot remove the current branch."));

    Ok(())
}

#[rstest]
fn delete_missing_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["branch", "delete", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}
