use crate::common::command::{init_repository_dir, run_twig_command, twig_add};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn status_of_a_clean_repository(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_twig_command(init_repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\n*master\n\n\
             === Staged Files ===\n\n\
             === Removed Files ===\n\n\
             === Modifications Not Staged For Commit ===\n\n\
             === Untracked Files ===\n\n",
        );

    Ok(())
}

#[rstest]
fn status_reports_every_section(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_twig_command(dir, &["branch", "create", "dev"])
        .assert()
        .success();

    write_file(FileSpec::new(dir.join("new.txt"), "new\n".to_string()));
    twig_add(dir, "new.txt").assert().success();
    run_twig_command(dir, &["rm", "a/2.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "edited\n".to_string()));
    write_file(FileSpec::new(dir.join("stray.txt"), "stray\n".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(
            "=== Branches ===\ndev\n*master\n\n\
             === Staged Files ===\nnew.txt\n\n\
             === Removed Files ===\na/2.txt\n\n\
             === Modifications Not Staged For Commit ===\n1.txt (modified)\n\n\
             === Untracked Files ===\nstray.txt\n\n",
        );

    Ok(())
}

#[rstest]
fn status_reports_deleted_and_restaged_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    // deleted without `rm`
    std::fs::remove_file(dir.join("a").join("2.txt"))?;
    // edited again after staging
    write_file(FileSpec::new(dir.join("1.txt"), "staged\n".to_string()));
    twig_add(dir, "1.txt").assert().success();
    write_file(FileSpec::new(dir.join("1.txt"), "edited later\n".to_string()));

    run_twig_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "=== Staged Files ===\n1.txt\n\n",
        ))
        .stdout(predicates::str::contains(
            "=== Modifications Not Staged For Commit ===\n1.txt (modified)\na/2.txt (deleted)\n\n",
        ));

    Ok(())
}

#[rstest]
fn corrupt_staging_area_is_fatal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    std::fs::write(dir.join(".twig").join("index"), b"STAG garbage")?;

    run_twig_command(dir, &["status"])
        .assert()
        .code(128)
        .stderr(predicates::str::starts_with("fatal: "));

    Ok(())
}
