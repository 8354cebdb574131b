use crate::common::command::{
    cat_commit, commit_removal, head_id, init_repository_dir, run_twig_command, twig_add,
    twig_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn commit_records_staged_changes(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let parent = head_id(dir);

    write_file(FileSpec::new(dir.join("1.txt"), "changed\n".to_string()));
    twig_add(dir, "1.txt").assert().success();

    let output = twig_commit(dir, "Change one").output()?;
    assert!(output.status.success());

    let commit_id = head_id(dir);
    assert_ne!(commit_id, parent);
    assert_eq!(
        String::from_utf8(output.stdout)?,
        format!("[master {}] Change one\n", &commit_id[..7])
    );

    let body = cat_commit(dir, &commit_id);
    assert!(body.starts_with(&format!("parent {}\n", parent)));
    // the untouched file keeps its blob from the parent
    assert!(body.contains("entry f719efd430d52bcfc8566a43b2eb655688d38871 a/2.txt\n"));
    assert!(!body.contains("5626abf0f72e58d7a153368ba57db4c673c0e171"));

    // staging is empty again
    twig_commit(dir, "Again")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No changes added to the commit."));

    Ok(())
}

#[rstest]
fn commit_records_removals(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    commit_removal(dir, "1.txt", "Remove one");

    let body = cat_commit(dir, &head_id(dir));
    assert!(!body.contains(" 1.txt\n"));
    assert!(body.contains(" a/2.txt\n"));

    Ok(())
}

#[rstest]
fn commit_with_nothing_staged_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let before = head_id(dir);

    // unstaged edits do not count
    write_file(FileSpec::new(dir.join("1.txt"), "edited\n".to_string()));

    twig_commit(dir, "Nothing")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No changes added to the commit."));
    assert_eq!(head_id(dir), before);

    Ok(())
}

#[rstest]
#[case("")]
#[case("   ")]
fn commit_with_blank_message_fails(
    init_repository_dir: TempDir,
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    twig_add(dir, "new.txt").assert().success();

    run_twig_command(dir, &["commit", "-m", message])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please enter a commit message."));

    Ok(())
}
