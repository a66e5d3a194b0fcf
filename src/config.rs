//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/masthead/masthead.toml`
//! 3. Local config: `<dir>/.masthead.toml`
//! 4. Environment variables: `MASTHEAD__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Catalog, LengthRange, ValidationRules};
use crate::errors::{SettingsError, SettingsResult};

/// Raw length bounds for intermediate parsing (`None` → inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLengthRange {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// Raw validation rules for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawValidationRules {
    pub magazine_name: RawLengthRange,
    pub title: RawLengthRange,
    pub contributor_threshold: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub validation: RawValidationRules,
}

impl RawLengthRange {
    fn apply(&self, base: LengthRange) -> LengthRange {
        LengthRange {
            min: self.min.unwrap_or(base.min),
            max: self.max.unwrap_or(base.max),
        }
    }
}

impl RawValidationRules {
    /// Overlay wins where it specifies a value, otherwise keep base.
    fn apply(&self, base: &ValidationRules) -> ValidationRules {
        ValidationRules {
            magazine_name: self.magazine_name.apply(base.magazine_name),
            title: self.title.apply(base.title),
            contributor_threshold: self
                .contributor_threshold
                .unwrap_or(base.contributor_threshold),
        }
    }
}

/// Unified configuration for masthead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Constraints applied to names, categories and titles
    pub validation: ValidationRules,
}

/// Get the XDG config directory for masthead.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "masthead").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("masthead.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".masthead.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> SettingsResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| SettingsError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Build an empty catalog enforcing these settings.
    pub fn catalog(&self) -> Catalog {
        Catalog::with_rules(self.validation)
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            validation: overlay.validation.apply(&self.validation),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.masthead.toml`
    ///
    /// Every layer overrides only the values it specifies. The merged result
    /// is checked before it is returned.
    pub fn load(local_dir: Option<&Path>) -> SettingsResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.check()?;

        Ok(current)
    }

    /// Load a single TOML file over compiled defaults, without global config
    /// or environment overrides.
    pub fn from_file(path: &Path) -> SettingsResult<Self> {
        let raw = load_raw_settings(path)?;
        let settings = Self::default().merge_with(&raw);
        settings.check()?;
        Ok(settings)
    }

    /// Apply MASTHEAD__* environment variables as explicit overrides.
    ///
    /// e.g. `MASTHEAD__VALIDATION__TITLE__MAX=80`
    fn apply_env_overrides(mut settings: Self) -> SettingsResult<Self> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("MASTHEAD").separator("__"))
            .build()
            .map_err(config_err)?;

        let rules = &mut settings.validation;
        if let Some(val) = env_usize(&config, "validation.magazine_name.min")? {
            rules.magazine_name.min = val;
        }
        if let Some(val) = env_usize(&config, "validation.magazine_name.max")? {
            rules.magazine_name.max = val;
        }
        if let Some(val) = env_usize(&config, "validation.title.min")? {
            rules.title.min = val;
        }
        if let Some(val) = env_usize(&config, "validation.title.max")? {
            rules.title.max = val;
        }
        if let Some(val) = env_usize(&config, "validation.contributor_threshold")? {
            rules.contributor_threshold = val;
        }

        Ok(settings)
    }

    /// Reject empty or inverted length ranges.
    pub fn check(&self) -> SettingsResult<()> {
        let ranges = [
            ("validation.magazine_name", self.validation.magazine_name),
            ("validation.title", self.validation.title),
        ];
        for (field, range) in ranges {
            if range.min == 0 || range.min > range.max {
                return Err(SettingsError::InvalidRange {
                    field,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# masthead configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/masthead/masthead.toml
#   Local:  <dir>/.masthead.toml
#   Env:    MASTHEAD__* environment variables, e.g. MASTHEAD__VALIDATION__TITLE__MAX=80

[validation]
# Authors with more articles than this in one magazine are contributing authors
# contributor_threshold = 2

[validation.magazine_name]
# min = 2
# max = 16

[validation.title]
# min = 5
# max = 50
"#
        .to_string()
    }
}

/// Read an optional unsigned integer; present but unparsable is an error.
fn env_usize(config: &Config, key: &str) -> SettingsResult<Option<usize>> {
    match config.get_string(key) {
        Ok(val) => val
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|e| SettingsError::Config {
                message: format!("{key}={val:?}: {e}"),
            }),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Config {
        message: e.to_string(),
    }
}
