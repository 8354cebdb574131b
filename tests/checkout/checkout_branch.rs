use crate::common::command::{
    branch_id, commit_file, commit_removal, current_branch, head_id, init_repository_dir,
    run_twig_command, twig_add,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

/// `dev` forks from the initial commit; `master` then adds `new.txt`
#[fixture]
fn diverged_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "dev"])
        .assert()
        .success();
    commit_file(dir, "new.txt", "master\n", "Add new");

    init_repository_dir
}

#[rstest]
fn checkout_branch_rewrites_the_working_tree(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();

    run_twig_command(dir, &["checkout", "dev"])
        .assert()
        .success()
        .stdout("Switched to branch 'dev'\n");

    assert!(!dir.join("new.txt").exists());
    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
    assert_eq!(current_branch(dir), "dev");
    assert_eq!(head_id(dir), branch_id(dir, "dev"));

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("new.txt")), "master\n");
    assert_eq!(head_id(dir), branch_id(dir, "master"));

    Ok(())
}

#[rstest]
fn checkout_branch_clears_the_staging_area(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "staged\n".to_string()));
    twig_add(dir, "1.txt").assert().success();

    run_twig_command(dir, &["checkout", "dev"])
        .assert()
        .success();

    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"));

    Ok(())
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_files(
    diverged_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = diverged_repository_dir.path();
    run_twig_command(dir, &["checkout", "dev"])
        .assert()
        .success();
    write_file(FileSpec::new(dir.join("new.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ))
        .stderr(predicate::str::contains("new.txt"));

    // nothing moved
    assert_eq!(read_file(&dir.join("new.txt")), "mine\n");
    assert_eq!(current_branch(dir), "dev");

    Ok(())
}

#[rstest]
fn checkout_current_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No need to checkout the current branch.",
        ));

    Ok(())
}

#[rstest]
fn checkout_unknown_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout", "ghost"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No such branch exists."));

    Ok(())
}

#[rstest]
fn checkout_without_operands_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["checkout"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Incorrect operands."));

    Ok(())
}

#[rstest]
fn checkout_swaps_a_tracked_directory_and_a_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "flat"])
        .assert()
        .success();
    run_twig_command(dir, &["checkout", "flat"])
        .assert()
        .success();
    commit_removal(dir, "a/2.txt", "Drop the directory");
    commit_file(dir, "a", "now a file\n", "Replace it with a file");

    run_twig_command(dir, &["checkout", "master"])
        .assert()
        .success();
    assert!(dir.join("a").is_dir());
    assert_eq!(read_file(&dir.join("a").join("2.txt")), "two\n");

    run_twig_command(dir, &["checkout", "flat"])
        .assert()
        .success();
    assert!(dir.join("a").is_file());
    assert_eq!(read_file(&dir.join("a")), "now a file\n");

    Ok(())
}
