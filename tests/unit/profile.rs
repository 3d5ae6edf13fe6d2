//! Activation semantics of the active profile.

use divvy_cli::config::ConfigStore;
use divvy_cli::profile::ActiveProfile;
use divvy_cli::test_utils::ConfigFixture;

fn store() -> (ConfigFixture, ConfigStore) {
    let fixture = ConfigFixture::new().unwrap();
    let store = ConfigStore::from_file(&fixture.config_path).unwrap();
    (fixture, store)
}

#[test]
fn test_every_activated_template_is_absolute() {
    let (fixture, store) = store();

    for name in store.names() {
        let mut profile = ActiveProfile::new();
        assert!(profile.activate(name, &store));
        if let Some(template) = profile.get().submission_template() {
            assert!(template.is_absolute(), "{name}: {}", template.display());
            assert!(template.starts_with(fixture.path()));
        }
    }
}

#[test]
fn test_clean_start_has_no_residue() {
    let (_fixture, store) = store();

    let mut layered = ActiveProfile::new();
    layered.activate("slurm", &store);
    layered.activate("singularity", &store);
    assert!(layered.clean_start("default", &store));

    let mut fresh = ActiveProfile::new();
    fresh.reset();
    fresh.activate("default", &store);

    assert_eq!(layered.get(), fresh.get());
    assert!(!layered.get().contains_key("partition"));
    assert!(!layered.get().contains_key("singularity_args"));
}

#[test]
fn test_unknown_activation_changes_nothing() {
    let (_fixture, store) = store();
    let mut profile = ActiveProfile::new();
    profile.activate("slurm", &store);
    let before = profile.get().clone();

    assert!(!profile.activate("nonexistent", &store));
    assert_eq!(profile.get(), &before);
    assert_eq!(profile.current_package(), Some("slurm"));
}

#[test]
fn test_activation_on_empty_store_fails_softly() {
    let mut profile = ActiveProfile::new();
    assert!(!profile.activate("default", &ConfigStore::new()));
    assert!(profile.is_empty());
}
