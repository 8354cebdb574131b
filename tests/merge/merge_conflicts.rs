use crate::common::command::{
    commit_file, commit_removal, head_id, init_repository_dir, run_twig_command, twig_merge,
};
use crate::common::file::read_file;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn switch_to(dir: &std::path::Path, branch: &str) {
    run_twig_command(dir, &["checkout", branch])
        .assert()
        .success();
}

#[rstest]
fn both_sides_modified_writes_conflict_markers(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "file.txt", "base", "Add base");
    run_twig_command(dir, &["branch", "create", "other"])
        .assert()
        .success();

    commit_file(dir, "file.txt", "current", "Current change");
    switch_to(dir, "other");
    commit_file(dir, "file.txt", "given", "Given change");
    switch_to(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("file.txt")),
        "<<<<<<< HEAD\ncurrent=======\ngiven>>>>>>>\n"
    );

    // the conflicted content was committed as it is
    let body = String::from_utf8(
        run_twig_command(dir, &["cat-file", "-p", &head_id(dir)])
            .output()?
            .stdout,
    )?;
    assert!(body.ends_with("Merged other into master.\n"));
    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "=== Modifications Not Staged For Commit ===\n\n",
        ));

    Ok(())
}

#[rstest]
fn modified_against_deleted_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "other"])
        .assert()
        .success();

    commit_file(dir, "1.txt", "one, kept\n", "Keep one");
    switch_to(dir, "other");
    commit_removal(dir, "1.txt", "Drop one");
    switch_to(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("1.txt")),
        "<<<<<<< HEAD\none, kept\n=======\n>>>>>>>\n"
    );

    Ok(())
}

#[rstest]
fn both_sides_added_different_content_conflicts(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "other"])
        .assert()
        .success();

    commit_file(dir, "new.txt", "mine\n", "Add mine");
    switch_to(dir, "other");
    commit_file(dir, "new.txt", "theirs\n", "Add theirs");
    switch_to(dir, "master");

    twig_merge(dir, "other")
        .assert()
        .success()
        .stdout("Encountered a merge conflict.\n");

    assert_eq!(
        read_file(&dir.join("new.txt")),
        "<<<<<<< HEAD\nmine\n=======\ntheirs\n>>>>>>>\n"
    );

    Ok(())
}
