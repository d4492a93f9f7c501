#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::predicate;

#[test]
fn test_help_lists_options() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--dir"));
}

#[test]
fn test_version() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--dir")
        .arg(dir.path())
        .env_remove("TMDB_API_KEY")
        .env("TMDB_API_ACCESS_TOKEN", "token")
        .env("TOKEN_SECRET", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TMDB_API_KEY environment variable is required",
        ));
}

#[test]
fn test_missing_token_secret_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--dir")
        .arg(dir.path())
        .env("TMDB_API_KEY", "key")
        .env("TMDB_API_ACCESS_TOKEN", "token")
        .env_remove("TOKEN_SECRET")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "TOKEN_SECRET environment variable is required",
        ));
}

#[test]
fn test_malformed_config_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "server = 3").unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--config")
        .arg(&path)
        .env("TMDB_API_KEY", "key")
        .env("TMDB_API_ACCESS_TOKEN", "token")
        .env("TOKEN_SECRET", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse"));
}

#[test]
fn test_invalid_public_url_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[server]\npublic_url = \"not a url\"\n",
    )
    .unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("seriesly");
    cmd.arg("--dir")
        .arg(dir.path())
        .env("TMDB_API_KEY", "key")
        .env("TMDB_API_ACCESS_TOKEN", "token")
        .env("TOKEN_SECRET", "secret")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid server.public_url"));
}
