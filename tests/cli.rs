use assert_cmd::Command;

#[test]
fn list_prints_catalog_without_tty() {
    let output = Command::cargo_bin("breathe")
        .unwrap()
        .arg("--list")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.contains("Box Breathing"));
    assert!(stdout.contains("3-0-6-9"));
    assert!(stdout.contains("Mobilizes body resources"));
}

#[test]
fn unknown_exercise_is_rejected() {
    let output = Command::cargo_bin("breathe")
        .unwrap()
        .args(["--exercise", "Underwater"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Underwater"));
}

#[test]
fn zero_duration_is_rejected() {
    Command::cargo_bin("breathe")
        .unwrap()
        .args(["--duration", "0"])
        .assert()
        .failure();
}

#[test]
fn requires_tty_for_the_session_screen() {
    let output = Command::cargo_bin("breathe").unwrap().output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}
