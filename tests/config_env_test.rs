//! Environment overrides live in their own test binary: process env is shared
//! by every test in a binary.

use std::env;
use std::path::Path;
use std::sync::OnceLock;

use tempfile::TempDir;

use masthead::config::{local_config_path, Settings};
use masthead::SettingsError;

/// Point the global config layer at an empty directory for this test binary.
fn isolated_config_home() -> &'static Path {
    static CONFIG_HOME: OnceLock<TempDir> = OnceLock::new();
    CONFIG_HOME
        .get_or_init(|| {
            let home = TempDir::new().unwrap();
            env::set_var("XDG_CONFIG_HOME", home.path());
            home
        })
        .path()
}

#[test]
fn given_env_overrides_when_load_then_env_wins_over_local_config() {
    isolated_config_home();
    let dir = TempDir::new().unwrap();
    std::fs::write(
        local_config_path(dir.path()),
        r#"
[validation.title]
max = 80
"#,
    )
    .unwrap();

    env::set_var("MASTHEAD__VALIDATION__TITLE__MAX", "120");
    env::set_var("MASTHEAD__VALIDATION__CONTRIBUTOR_THRESHOLD", "4");
    let settings = Settings::load(Some(dir.path()));

    env::set_var("MASTHEAD__VALIDATION__TITLE__MAX", "lots");
    let invalid = Settings::load(Some(dir.path()));

    env::remove_var("MASTHEAD__VALIDATION__TITLE__MAX");
    env::remove_var("MASTHEAD__VALIDATION__CONTRIBUTOR_THRESHOLD");

    let settings = settings.expect("load settings");
    assert_eq!(settings.validation.title.max, 120);
    assert_eq!(settings.validation.contributor_threshold, 4);
    assert_eq!(settings.validation.title.min, 5);
    assert!(matches!(invalid, Err(SettingsError::Config { .. })));
}
