//! `divvy init`

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use super::divvy;

#[test]
fn test_init_then_list() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("site").join("my_divvy.yaml");

    divvy(temp.path())
        .arg("-c")
        .arg(&config)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote divvy configuration"));

    assert!(config.is_file());
    assert!(temp.path().join("site/templates/localhost_template.sub").is_file());

    divvy(temp.path())
        .env("DIVCFG", &config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("slurm"));
}

#[test]
fn test_init_existing_config_untouched() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("divvy.yaml");
    fs::write(&config, "compute_packages: {}\n").unwrap();

    divvy(temp.path())
        .env("DIVCFG", &config)
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config).unwrap(), "compute_packages: {}\n");
}

#[test]
fn test_init_needs_a_path() {
    let temp = TempDir::new().unwrap();

    divvy(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration path given"));
}
