use assert_cmd::Command;
use assert_fs::{fixture::PathChild, TempDir};

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are incorrectly defined will cause clap to panic regardless of the
// arguments or options provided.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("literalura")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

fn run_menu(dir: &TempDir, input: &str) -> Result<String, Box<dyn std::error::Error>> {
    let output = Command::cargo_bin("literalura")?
        .arg("--database")
        .arg(dir.child("catalog.db").path())
        .arg("--quiet")
        .write_stdin(input)
        .output()?;

    assert!(output.status.success(), "{output:?}");
    Ok(String::from_utf8(output.stdout)?)
}

#[test]
fn menu_exits_on_zero() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let stdout = run_menu(&dir, "0\n")?;

    assert!(stdout.contains("======= LITERALURA MENU ======="));
    assert!(stdout.contains("Thank you for using LiterAlura."));

    dir.close()?;
    Ok(())
}

#[test]
fn menu_recovers_from_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let stdout = run_menu(&dir, "books please\n2\n3\n")?;

    assert!(stdout.contains("Invalid input."));
    assert!(stdout.contains("No books registered."));
    assert!(stdout.contains("No authors registered."));
    // stdin closed without choosing 0 still ends the session cleanly
    assert!(!stdout.contains("Thank you for using LiterAlura."));

    dir.close()?;
    Ok(())
}

#[test]
fn database_is_created_and_reused() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    run_menu(&dir, "0\n")?;
    assert!(dir.child("catalog.db").path().is_file());

    let stdout = run_menu(&dir, "5\nen\n0\n")?;
    assert!(stdout.contains("No books found in that language."));

    dir.close()?;
    Ok(())
}

#[test]
fn unopenable_database_is_a_startup_failure() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    // a directory cannot be opened as a database file
    Command::cargo_bin("literalura")?
        .arg("--database")
        .arg(dir.path())
        .write_stdin("0\n")
        .assert()
        .failure()
        .code(2);

    dir.close()?;
    Ok(())
}
