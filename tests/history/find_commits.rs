use crate::common::command::{commit_file, head_id, init_repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn find_prints_every_matching_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    commit_file(dir, "1.txt", "first\n", "Tweak");
    let first = head_id(dir);
    commit_file(dir, "1.txt", "second\n", "Tweak");
    let second = head_id(dir);

    let mut expected = vec![first, second];
    expected.sort();

    let output = run_twig_command(dir, &["find", "Tweak"]).output()?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        format!("{}\n", expected.join("\n"))
    );

    Ok(())
}

#[rstest]
fn find_matches_whole_messages_only(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["find", "Initial"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Found no commit with that message."));

    Ok(())
}

#[rstest]
fn find_matches_the_message_as_written(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    write_file(FileSpec::new(dir.join("1.txt"), "padded\n".to_string()));
    run_twig_command(dir, &["add", "1.txt"]).assert().success();
    run_twig_command(dir, &["commit", "-m", " padded message "])
        .assert()
        .success();
    let padded = head_id(dir);

    run_twig_command(dir, &["find", " padded message "])
        .assert()
        .success()
        .stdout(format!("{}\n", padded));
    run_twig_command(dir, &["find", "padded message"])
        .assert()
        .code(1);

    Ok(())
}
