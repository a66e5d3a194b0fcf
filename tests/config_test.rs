//! Integration tests for Settings layered loading.
//!
//! These tests run against temp directories only and set no MASTHEAD__*
//! variables, so they exercise local config merged over defaults. The global
//! layer is redirected to an empty temp dir so the user's own file is ignored.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use tempfile::TempDir;

use masthead::config::{local_config_path, Settings};
use masthead::{DomainError, SettingsError, ValidationError};

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
#[cfg(target_os = "linux")]
fn given_isolated_config_home_when_resolving_global_path_then_points_inside_it() {
    let home = isolated_config_home();

    let path = masthead::config::global_config_path().expect("global config path");

    assert!(path.starts_with(home));
    assert!(!path.exists());
}

#[test]
fn given_no_local_config_when_load_then_uses_defaults() {
    isolated_config_home();
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_local_config_when_load_then_overrides_only_specified_values() {
    isolated_config_home();
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
[validation]
contributor_threshold = 1

[validation.title]
max = 80
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.validation.contributor_threshold, 1);
    assert_eq!(settings.validation.title.min, 5);
    assert_eq!(settings.validation.title.max, 80);
    assert_eq!(settings.validation.magazine_name.max, 16);
}

#[test]
fn given_loaded_settings_when_building_catalog_then_rules_are_enforced() {
    isolated_config_home();
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        r#"
[validation.title]
min = 10
"#,
    )
    .unwrap();
    let settings = Settings::load(Some(dir.path())).unwrap();
    let mut catalog = settings.catalog();
    let jane = catalog.add_author("Jane Doe").unwrap();
    let vogue = catalog.add_magazine("Vogue", "Fashion").unwrap();

    let result = catalog.add_article(jane, vogue, "Short one");

    assert_eq!(
        result,
        Err(DomainError::Validation(ValidationError::TitleLength {
            len: 9,
            min: 10,
            max: 50
        }))
    );
    assert!(catalog
        .add_article(jane, vogue, "Long enough title")
        .is_ok());
}

#[test]
fn given_inverted_range_in_file_when_loading_then_rejects() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("masthead.toml");
    fs::write(
        &path,
        r#"
[validation.magazine_name]
min = 20
"#,
    )
    .unwrap();

    let result = Settings::from_file(&path);

    assert_eq!(
        result,
        Err(SettingsError::InvalidRange {
            field: "validation.magazine_name",
            min: 20,
            max: 16
        })
    );
}

#[test]
fn given_malformed_toml_when_loading_then_reports_config_error() {
    isolated_config_home();
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[validation\ntitle = ").unwrap();

    let result = Settings::load(Some(dir.path()));

    assert!(matches!(result, Err(SettingsError::Config { .. })));
}

#[test]
fn given_missing_file_when_loading_from_file_then_reports_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::from_file(&dir.path().join("absent.toml"));

    match result {
        Err(SettingsError::Config { message }) => assert!(message.contains("absent.toml")),
        other => panic!("expected config error, got {:?}", other),
    }
}
