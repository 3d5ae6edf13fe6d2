//! End-to-end behaviour of `ComputingConfiguration`.

use std::fs;

use divvy_cli::compute::ComputingConfiguration;
use divvy_cli::config::ConfigSource;
use divvy_cli::settings::{MergeStrategy, Settings};
use divvy_cli::test_utils::{ConfigFixture, init_test_logging};

fn layer(pairs: &[(&str, &str)]) -> Settings {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

#[test]
fn test_first_override_layer_wins() {
    init_test_logging(None);
    let fixture = ConfigFixture::new().unwrap();
    let template = fixture.write_file("templates/foo.sub", "{FOO}").unwrap();
    let mut compute = fixture.compute().unwrap();
    compute.reset_active_settings();
    compute.active_package_mut().set_submission_template(&template);

    let out = fixture.path().join("out.sub");
    compute
        .write_script(&out, &[layer(&[("foo", "first")]), layer(&[("foo", "second")])])
        .unwrap();

    assert_eq!(fs::read_to_string(&out).unwrap(), "first");
}

#[test]
fn test_write_slurm_script() {
    let fixture = ConfigFixture::new().unwrap();
    let mut compute = fixture.compute().unwrap();
    assert!(compute.activate_package("slurm"));

    let out = fixture.path().join("jobs").join("nested").join("align.sub");
    let job = layer(&[("jobname", "align"), ("code", "run.sh")]);
    let outcome = compute.write_script(&out, &[job]).unwrap();

    assert_eq!(outcome.path.as_deref(), Some(out.as_path()));
    assert!(outcome.unresolved.is_none());
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "#!/bin/bash\n#SBATCH --job-name='align'\n#SBATCH --mem='4000'\n#SBATCH --partition=standard\n\nrun.sh\n"
    );
}

#[test]
fn test_write_does_not_mutate_active_settings() {
    let fixture = ConfigFixture::new().unwrap();
    let mut compute = fixture.compute().unwrap();
    compute.activate_package("slurm");
    let before = compute.active_package().clone();

    compute.render_script(&[layer(&[("mem", "1"), ("code", "x")])]).unwrap();

    assert_eq!(compute.active_package(), &before);
}

#[test]
fn test_update_packages_adds_new_package() {
    let fixture = ConfigFixture::new().unwrap();
    let extra = fixture
        .write_file(
            "site/extra.yaml",
            "compute_packages:\n  gpu:\n    submission_template: gpu.sub\n    gres: gpu:1\n",
        )
        .unwrap();
    let mut compute = fixture.compute().unwrap();

    let report = compute.update_packages(&extra).unwrap();

    assert_eq!(report.packages, ["gpu"]);
    assert!(compute.list_compute_packages().contains("gpu"));
    assert!(compute.activate_package("gpu"));
    assert_eq!(
        compute.active_package().submission_template(),
        Some(fixture.path().join("site").join("gpu.sub").as_path())
    );
}

#[test]
fn test_explicit_source_and_deep_merge() {
    let fixture = ConfigFixture::with_config(
        "compute_packages:\n  default:\n    submission_template: t.sub\n    env:\n      A: '1'\n      B: '2'\n  override:\n    env:\n      B: '3'\n",
    )
    .unwrap();

    let mut compute = ComputingConfiguration::builder()
        .source(ConfigSource::Explicit(fixture.config_path.clone()))
        .merge_strategy(MergeStrategy::Deep)
        .build()
        .unwrap();
    assert_eq!(compute.config_file(), fixture.config_path.as_path());

    compute.activate_package("override");
    let env = compute.active_package().get("env").unwrap();
    assert_eq!(env.get("A").and_then(|v| v.as_str()), Some("1"));
    assert_eq!(env.get("B").and_then(|v| v.as_str()), Some("3"));
}
