/// End-to-end tests of the `pdfium-build` binary.
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pdfium_build(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pdfium-build"));
    cmd.env("HOME", home.path())
        .env("DEPOT_TOOLS_DIR", home.path().join("depot_tools"))
        .env("NO_COLOR", "1")
        .env_remove("PDFIUM_PROJECT_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_actions() {
    let home = tempfile::tempdir().unwrap();
    pdfium_build(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--clean")
                .and(predicate::str::contains("--setup-depot-tools"))
                .and(predicate::str::contains("--update-depot-tools"))
                .and(predicate::str::contains("--clean-depot-tools"))
                .and(predicate::str::contains("--debug")),
        );
}

#[test]
fn test_conflicting_actions_are_rejected() {
    let home = tempfile::tempdir().unwrap();
    pdfium_build(&home)
        .args(["--clean", "--clean-depot-tools"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_clean_removes_artifacts() {
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(root.path().join("build/CMakeFiles")).unwrap();
    std::fs::create_dir_all(root.path().join("third_party/pdfium/out/Debug")).unwrap();
    std::fs::write(root.path().join("CMakeCache.txt"), "").unwrap();

    pdfium_build(&home)
        .arg("--clean")
        .arg("--project-root")
        .arg(root.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Clean complete!"));

    assert!(!root.path().join("build").exists());
    assert!(!root.path().join("third_party/pdfium/out").exists());
    assert!(!root.path().join("CMakeCache.txt").exists());
    assert!(root.path().join("third_party/pdfium").is_dir());
}

#[test]
fn test_update_without_install_fails() {
    let home = tempfile::tempdir().unwrap();
    pdfium_build(&home)
        .arg("--update-depot-tools")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Build failed: depot_tools is not installed",
        ));
}

#[cfg(unix)]
#[test]
fn test_clean_depot_tools_removes_path_entry() {
    let home = tempfile::tempdir().unwrap();
    let depot = home.path().join("depot_tools");
    std::fs::create_dir_all(&depot).unwrap();
    let rc = home.path().join(".bashrc");
    std::fs::write(
        &rc,
        format!(
            "alias ll='ls -l'\n\n{}\nexport PATH=\"$PATH:{}\"\n{}\n",
            pdfium_build::shell_rc::BLOCK_BEGIN,
            depot.display(),
            pdfium_build::shell_rc::BLOCK_END
        ),
    )
    .unwrap();

    pdfium_build(&home)
        .arg("--clean-depot-tools")
        .assert()
        .success();

    assert!(!depot.exists());
    let contents = std::fs::read_to_string(&rc).unwrap();
    assert!(contents.contains("alias ll='ls -l'"));
    assert!(!contents.contains("depot_tools"));
}

#[test]
fn test_interactive_exit() {
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    pdfium_build(&home)
        .arg("--project-root")
        .arg(root.path())
        .write_stdin("8\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Build options")
                .and(predicate::str::contains("No build artifacts found"))
                .and(predicate::str::contains("Exiting")),
        );
}

#[test]
fn test_closed_stdin_is_a_cancel() {
    let home = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    pdfium_build(&home)
        .arg("--project-root")
        .arg(root.path())
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled by user"));
}
