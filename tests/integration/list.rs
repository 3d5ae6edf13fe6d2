//! `divvy list`

use predicates::prelude::*;
use tempfile::TempDir;

use divvy_cli::test_utils::ConfigFixture;

use super::divvy;

#[test]
fn test_list_explicit_config() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .arg("list")
        .assert()
        .success()
        .stdout("Available compute packages:\ndefault\nsingularity\nslurm\n");
}

#[test]
fn test_list_config_from_env() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .env("DIVCFG", &fixture.config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("slurm"));
}

#[test]
fn test_list_legacy_env_var() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .env("PEPENV", &fixture.config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("singularity"));
}

#[test]
fn test_list_json() {
    let fixture = ConfigFixture::new().unwrap();

    let output = divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let names: Vec<String> = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(names, ["default", "singularity", "slurm"]);
}

#[test]
fn test_list_bundled_default() {
    let temp = TempDir::new().unwrap();

    divvy(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("slurm_singularity").and(predicate::str::contains("docker")));

    let home = temp.path().join("divvy-home");
    assert!(home.join("divvy_config.yaml").is_file());
    assert!(home.join("templates").join("slurm_template.sub").is_file());
}

#[test]
fn test_list_missing_config() {
    let temp = TempDir::new().unwrap();

    divvy(temp.path())
        .args(["-c", "does-not-exist.yaml", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_list_invalid_config() {
    let fixture = ConfigFixture::with_config("not_packages:\n  default: {}\n").unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("compute_packages"));
}

#[test]
fn test_list_deprecated_key_warns_on_stderr() {
    let fixture =
        ConfigFixture::with_config("compute:\n  default:\n    submission_template: t.sub\n").unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("default"))
        .stderr(predicate::str::contains("compute_packages"));
}
