use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("kodegen_bundler_msi").unwrap()
}

#[test]
fn test_help_describes_wix_build() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("candle.exe"))
        .stdout(predicate::str::contains("--app-dir"));
}

#[test]
fn test_app_dir_is_required() {
    cli()
        .assert()
        .failure()
        .stderr(predicate::str::contains("--app-dir"));
}

#[test]
fn test_unknown_arch_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--app-dir", dir.path().to_str().unwrap(), "--arch", "sparc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sparc"));
}

#[test]
fn test_missing_app_dir_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args([
            "--app-dir",
            dir.path().join("missing").to_str().unwrap(),
            "--product-name",
            "App",
            "--app-version",
            "1.0.0",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("App directory does not exist"));
}

#[test]
fn test_product_identity_required_without_manifest() {
    let dir = tempfile::tempdir().unwrap();
    cli()
        .args(["--app-dir", dir.path().to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--manifest"));
}
