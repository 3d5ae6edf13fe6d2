//! `divvy write`

use predicates::prelude::*;
use std::fs;

use divvy_cli::test_utils::ConfigFixture;

use super::divvy;

#[test]
fn test_write_to_stdout() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "--", "--code", "echo hi", "--logfile", "run.log"])
        .assert()
        .success()
        .stdout("#!/bin/bash\n\necho hi | tee run.log\n");
}

#[test]
fn test_write_outfile_with_settings_file() {
    let fixture = ConfigFixture::new().unwrap();
    let settings = fixture
        .write_file("job.yaml", "jobname: from-file\nmem: 16000\ncode: ./run.sh\n")
        .unwrap();
    let out = fixture.path().join("submission").join("job.sub");

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "-p", "slurm", "-s"])
        .arg(&settings)
        .arg("-o")
        .arg(&out)
        .args(["--", "--jobname", "from-cli"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "#!/bin/bash\n#SBATCH --job-name='from-cli'\n#SBATCH --mem='16000'\n#SBATCH --partition=standard\n\n./run.sh\n"
    );
}

#[test]
fn test_write_pairs_without_separator() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "-p", "slurm", "--jobname", "x", "--code", "run.sh"])
        .assert()
        .success()
        .stdout(
            "#!/bin/bash\n#SBATCH --job-name='x'\n#SBATCH --mem='4000'\n#SBATCH --partition=standard\n\nrun.sh\n",
        );
}

#[test]
fn test_write_unresolved_placeholder_warns() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "--", "--code", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("true | tee {LOGFILE}"))
        .stderr(predicate::str::contains("{LOGFILE}"));
}

#[test]
fn test_write_warnings_are_plain_when_piped() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "--code", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("{LOGFILE}"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_write_quiet_hides_warnings() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["-q", "write", "--", "--code", "true"])
        .assert()
        .success()
        .stderr(predicate::str::contains("LOGFILE").not());
}

#[test]
fn test_write_unknown_package() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "-p", "slurn"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Compute package 'slurn' not found"))
        .stderr(predicate::str::contains("Did you mean 'slurm'?"));
}

#[test]
fn test_write_odd_override_pairs() {
    let fixture = ConfigFixture::new().unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "--", "--code"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template override"));
}

#[test]
fn test_write_settings_file_must_be_mapping() {
    let fixture = ConfigFixture::new().unwrap();
    let settings = fixture.write_file("job.yaml", "- just\n- a list\n").unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .args(["write", "-s"])
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings file"));
}

#[test]
fn test_write_package_without_template() {
    let fixture = ConfigFixture::with_config("compute_packages:\n  default:\n    mem: 1\n").unwrap();

    divvy(fixture.path())
        .arg("-c")
        .arg(&fixture.config_path)
        .arg("write")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No submission template"));
}
