use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::ConfigError, utils::paths};

pub const DEFAULT_CARRY_IN_NAME: &str = "前年からの繰越額";
pub const DEFAULT_CARRY_OUT_NAME: &str = "翌年への繰越額";
pub const DEFAULT_ROOT_ID: &str = "root";
pub const DEFAULT_ROOT_NAME: &str = "総収入";

/// Knobs for validating and converting a funding ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConverterConfig {
    /// Category holding the balance brought forward from the previous year.
    #[serde(default = "ConverterConfig::default_carry_in_name")]
    pub carry_in_name: String,
    /// Category holding the balance carried into the next year.
    #[serde(default = "ConverterConfig::default_carry_out_name")]
    pub carry_out_name: String,
    /// Strip leading ordinals such as `(1) ` from names when merging pages.
    #[serde(default = "ConverterConfig::default_normalize_names")]
    pub normalize_names: bool,
    /// Repair extracted datasets before validation (duplicate names, stray
    /// roots, zero values, missing dates, mixed and empty categories).
    #[serde(default)]
    pub repair_dataset: bool,
    /// Id of the root category that repairs attach orphaned categories to.
    #[serde(default = "ConverterConfig::default_root_id")]
    pub root_id: String,
    /// Name given to the root category when a repair has to create it.
    #[serde(default = "ConverterConfig::default_root_name")]
    pub root_name: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            carry_in_name: Self::default_carry_in_name(),
            carry_out_name: Self::default_carry_out_name(),
            normalize_names: Self::default_normalize_names(),
            repair_dataset: false,
            root_id: Self::default_root_id(),
            root_name: Self::default_root_name(),
        }
    }
}

impl ConverterConfig {
    pub fn default_carry_in_name() -> String {
        DEFAULT_CARRY_IN_NAME.into()
    }

    pub fn default_carry_out_name() -> String {
        DEFAULT_CARRY_OUT_NAME.into()
    }

    pub fn default_normalize_names() -> bool {
        true
    }

    pub fn default_root_id() -> String {
        DEFAULT_ROOT_ID.into()
    }

    pub fn default_root_name() -> String {
        DEFAULT_ROOT_NAME.into()
    }
}

/// Locates and loads the converter configuration.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
    explicit: bool,
}

impl ConfigManager {
    /// Uses the configuration file under the application data directory, if any.
    pub fn new() -> Self {
        Self {
            path: paths::config_file(),
            explicit: false,
        }
    }

    /// Uses a file the caller asked for; it must exist.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    pub fn load(&self) -> Result<ConverterConfig, ConfigError> {
        if !self.path.exists() {
            if self.explicit {
                return Err(ConfigError::NotFound(self.path.clone()));
            }
            return Ok(ConverterConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&data)?;
        tracing::debug!(path = %self.path.display(), "loaded converter configuration");
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_discovered_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager {
            path: temp.path().join("config.json"),
            explicit: false,
        };
        assert_eq!(manager.load().unwrap(), ConverterConfig::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp.path().join("absent.json"));
        assert!(matches!(manager.load(), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "carry_out_name": "翌年への繰越" }"#).unwrap();
        let config = ConfigManager::with_path(&path).load().unwrap();
        assert_eq!(config.carry_out_name, "翌年への繰越");
        assert_eq!(config.carry_in_name, DEFAULT_CARRY_IN_NAME);
        assert!(config.normalize_names);
        assert!(!config.repair_dataset);
        assert_eq!(config.root_id, DEFAULT_ROOT_ID);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "carry_over": "x" }"#).unwrap();
        let err = ConfigManager::with_path(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Serde(_)));
    }
}
