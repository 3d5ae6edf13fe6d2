//! Loading, merging and path normalization in the package catalog.

use std::fs;
use std::path::Path;

use divvy_cli::config::ConfigStore;
use divvy_cli::core::DivvyError;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_template_path_follows_the_file_that_set_it() {
    let temp = TempDir::new().unwrap();
    let dir1 = temp.path().join("dir1");
    let dir2 = temp.path().join("dir2");
    let a = write(&dir1, "a.yaml", "compute_packages:\n  X:\n    submission_template: t.sh\n");
    let b = write(&dir2, "b.yaml", "compute_packages:\n  X:\n    submission_template: u.sh\n");

    let mut store = ConfigStore::new();
    store.load(&a).unwrap();
    assert_eq!(store.get("X").unwrap().submission_template(), Some(dir1.join("t.sh").as_path()));

    store.load(&b).unwrap();
    assert_eq!(store.get("X").unwrap().submission_template(), Some(dir2.join("u.sh").as_path()));
}

#[test]
fn test_incremental_load_extends_packages() {
    let temp = TempDir::new().unwrap();
    let base = write(
        temp.path(),
        "base.yaml",
        "compute_packages:\n  slurm:\n    submission_template: slurm.sub\n    partition: standard\n    mem: 4000\n",
    );
    let site = write(
        temp.path(),
        "site.yaml",
        "compute_packages:\n  slurm:\n    partition: largemem\n  sge:\n    submission_template: sge.sub\n",
    );

    let mut store = ConfigStore::from_file(&base).unwrap();
    let report = store.load(&site).unwrap();

    assert_eq!(report.packages, ["sge", "slurm"]);
    let slurm = store.get("slurm").unwrap();
    assert_eq!(slurm.get_str("partition"), Some("largemem"));
    assert_eq!(slurm.get("mem").and_then(|v| v.as_u64()), Some(4000));
    assert_eq!(slurm.submission_template(), Some(temp.path().join("slurm.sub").as_path()));
    assert_eq!(store.names().into_iter().collect::<Vec<_>>(), ["sge", "slurm"]);
}

#[test]
fn test_reloading_same_file_is_stable() {
    let temp = TempDir::new().unwrap();
    let path = write(
        temp.path(),
        "divvy.yaml",
        "compute_packages:\n  default:\n    submission_template: local.sub\n  slurm:\n    submission_template: /abs/slurm.sub\n    mem: 1000\n",
    );

    let mut store = ConfigStore::from_file(&path).unwrap();
    let names: Vec<String> = store.names().into_iter().map(str::to_string).collect();
    let before: Vec<_> = names.iter().map(|n| store.get(n).unwrap().clone()).collect();

    store.load(&path).unwrap();

    let names_after: Vec<String> = store.names().into_iter().map(str::to_string).collect();
    let after: Vec<_> = names_after.iter().map(|n| store.get(n).unwrap().clone()).collect();
    assert_eq!(names, names_after);
    assert_eq!(before, after);
}

#[test]
fn test_legacy_key_reports_deprecation() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "old.yaml", "compute:\n  default:\n    submission_template: t.sub\n");

    let mut store = ConfigStore::new();
    let report = store.load(&path).unwrap();

    assert_eq!(report.deprecated_key, Some("compute"));
    assert!(store.contains("default"));
}

#[test]
fn test_unknown_package_suggests_close_name() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "divvy.yaml", "compute_packages:\n  slurm: {}\n  local: {}\n");
    let store = ConfigStore::from_file(&path).unwrap();

    match store.get("slurn").unwrap_err() {
        DivvyError::UnknownPackage { name, suggestion } => {
            assert_eq!(name, "slurn");
            assert_eq!(suggestion.as_deref(), Some("slurm"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_section_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write(temp.path(), "divvy.yaml", "packages:\n  default: {}\n");

    let err = ConfigStore::from_file(&path).unwrap_err();
    assert!(matches!(err, DivvyError::ConfigFormatError { .. }));
}
