use crate::common::command::{
    branch_id, commit_file, head_id, init_repository_dir, run_twig_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reset_moves_the_branch_and_the_working_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_id(dir);
    commit_file(dir, "new.txt", "new\n", "Add new");
    commit_file(dir, "1.txt", "one, again\n", "Edit one");

    run_twig_command(dir, &["reset", &first[..10]])
        .assert()
        .success()
        .stdout(format!("HEAD is now at {} Initial commit\n", &first[..7]));

    assert!(!dir.join("new.txt").exists());
    assert_eq!(read_file(&dir.join("1.txt")), "one\n");
    assert_eq!(head_id(dir), first);
    assert_eq!(branch_id(dir, "master"), first);

    Ok(())
}

#[rstest]
fn reset_leaves_other_branches_alone(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_id(dir);
    commit_file(dir, "new.txt", "new\n", "Add new");
    run_twig_command(dir, &["branch", "create", "keep"])
        .assert()
        .success();
    let kept = head_id(dir);

    run_twig_command(dir, &["reset", &first]).assert().success();

    assert_eq!(branch_id(dir, "keep"), kept);

    Ok(())
}

#[rstest]
fn reset_refuses_to_overwrite_untracked_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let first = head_id(dir);
    commit_file(dir, "new.txt", "new\n", "Add new");
    let second = head_id(dir);

    run_twig_command(dir, &["reset", &first]).assert().success();
    write_file(FileSpec::new(dir.join("new.txt"), "mine\n".to_string()));

    run_twig_command(dir, &["reset", &second])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("There is an untracked file in the way"));

    assert_eq!(head_id(dir), first);
    assert_eq!(read_file(&dir.join("new.txt")), "mine\n");

    Ok(())
}

#[rstest]
fn reset_to_unknown_commit_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["reset", "0000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No commit with that id exists."));

    Ok(())
}
