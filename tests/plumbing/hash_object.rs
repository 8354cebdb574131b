use crate::common::command::{init_repository_dir, repository_dir, run_twig_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

const NOTES_BLOB_ID: &str = "5626abf0f72e58d7a153368ba57db4c673c0e171";

#[rstest]
fn hash_object_prints_the_blob_id(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir.path();
    run_twig_command(dir, &["init"]).assert().success();
    write_file(FileSpec::new(dir.join("notes.txt"), "one\n".to_string()));

    run_twig_command(dir, &["hash-object", "notes.txt"])
        .assert()
        .success()
        .stdout(format!("{}\n", NOTES_BLOB_ID));

    let object_path = dir
        .join(".twig")
        .join("objects")
        .join("blobs")
        .join(NOTES_BLOB_ID);
    assert!(!object_path.exists());

    run_twig_command(dir, &["hash-object", "-w", "notes.txt"])
        .assert()
        .success()
        .stdout(format!("{}\n", NOTES_BLOB_ID));
    assert!(object_path.is_file());

    Ok(())
}

#[rstest]
fn hash_object_of_missing_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["hash-object", "ghost.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File does not exist."));

    Ok(())
}
