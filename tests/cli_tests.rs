// tests/cli_tests.rs
// End-to-end runs of the composer_spec binary

use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("composer_spec").expect("composer_spec binary must be built");
    cmd.env_remove("COMPOSER_SPEC_BINARY")
        .env_remove("COMPOSER_SPEC_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().clone();
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

#[test]
fn test_version() {
    let output = cli().arg("version").assert().success().get_output().clone();
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("composer_spec v"));
}

#[test]
fn test_missing_composer_yields_empty_tree() {
    let dir = tempdir().unwrap();
    let json = stdout_json(
        cli()
            .env("COMPOSER_SPEC_BINARY", "composer-binary-that-does-not-exist")
            .arg("--working-dir")
            .arg(dir.path())
            .arg("spec"),
    );
    assert_eq!(json, serde_json::json!({"name": "composer", "subcommands": []}));
}

#[cfg(unix)]
#[test]
fn test_spec_from_fake_composer() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::copy("tests/fixtures/composer_list.json", &catalog).unwrap();

    let script = dir.path().join("fake-composer");
    std::fs::write(&script, format!("#!/bin/sh\ncat '{}'\n", catalog.display())).unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    std::fs::write(dir.path().join("symfony.lock"), "{}").unwrap();

    let json = stdout_json(
        cli()
            .env("COMPOSER_SPEC_BINARY", &script)
            .arg("-d")
            .arg(dir.path())
            .arg("spec"),
    );
    let subcommands = json["subcommands"].as_array().unwrap();
    assert_eq!(subcommands.len(), 8);
    assert_eq!(subcommands[3]["name"][0], "require");
    assert_eq!(subcommands[3]["args"][0]["generators"][0]["type"], "package-search");
    assert_eq!(subcommands[7]["options"][0]["isDangerous"], true);
}

#[test]
fn test_suggest_manifest_dependencies() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("composer.json"),
        r#"{
            "require": {"php": "^8.2", "ext-json": "*", "symfony/console": "^7.0"},
            "require-dev": {"phpunit/phpunit": "^11.0"}
        }"#,
    )
    .unwrap();

    let json = stdout_json(
        cli()
            .arg("-d")
            .arg(dir.path())
            .args(["suggest", "manifest-dependencies"]),
    );
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "symfony/console", "icon": "📦"},
            {"name": "phpunit/phpunit", "icon": "📦"}
        ])
    );
}

#[test]
fn test_suggest_without_manifest() {
    let dir = tempdir().unwrap();
    let json = stdout_json(
        cli()
            .arg("-d")
            .arg(dir.path())
            .args(["suggest", "manifest-dependencies"]),
    );
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn test_suggest_search_with_empty_token() {
    let json = stdout_json(cli().args(["suggest", "package-search"]));
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn test_bad_config_path_fails() {
    let dir = tempdir().unwrap();
    cli()
        .arg("--config")
        .arg(dir.path().join("missing.yaml"))
        .arg("spec")
        .assert()
        .failure();
}

#[test]
fn test_suggest_accepts_token_with_leading_dash() {
    let dir = tempdir().unwrap();
    let json = stdout_json(
        cli()
            .arg("-d")
            .arg(dir.path())
            .args(["suggest", "manifest-dependencies", "-foo"]),
    );
    assert_eq!(json, serde_json::json!([]));
}
