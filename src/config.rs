//! Run configuration for DocCheck

use crate::check::DocCheckMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up in the working directory when no config path is given
pub const CONFIG_FILE_NAME: &str = ".doccheck.toml";

/// Configuration for a documentation check run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    /// How thoroughly documentation is checked
    #[serde(default)]
    pub mode: DocCheckMode,

    /// Report findings as errors and fail the run when any is found
    #[serde(default)]
    pub deny_warnings: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            mode: DocCheckMode::default(),
            deny_warnings: false,
        }
    }
}

impl CheckConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: CheckConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        Ok(config)
    }

    /// Load `.doccheck.toml` from `dir`, or return defaults
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the configuration for a run: an explicit file wins over the
    /// one discovered in `dir`
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Self::load_or_default(dir),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, mode: Option<DocCheckMode>, deny_warnings: bool) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        self.deny_warnings |= deny_warnings;
        self
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }

    /// Write the configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CheckConfig::default();
        assert_eq!(config.mode, DocCheckMode::PresenceOnly);
        assert!(!config.deny_warnings);
    }

    #[test]
    fn test_parse_toml() {
        let config: CheckConfig = toml::from_str("mode = \"consistency\"").unwrap();
        assert_eq!(config.mode, DocCheckMode::Consistency);

        let config: CheckConfig = toml::from_str("").unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = CheckConfig::default().with_overrides(Some(DocCheckMode::Disabled), true);
        assert_eq!(config.mode, DocCheckMode::Disabled);
        assert!(config.deny_warnings);

        let config = CheckConfig::default().with_overrides(None, false);
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_save_and_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            CheckConfig::load_or_default(dir.path()).unwrap(),
            CheckConfig::default()
        );

        let config = CheckConfig {
            mode: DocCheckMode::Consistency,
            deny_warnings: true,
        };
        config.save(&dir.path().join(CONFIG_FILE_NAME)).unwrap();

        assert_eq!(CheckConfig::resolve(None, dir.path()).unwrap(), config);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CheckConfig::resolve(Some(&missing), dir.path()).is_err());
    }
}
