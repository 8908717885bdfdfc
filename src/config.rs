//! Runtime configuration
//!
//! Everything has a default matching a stock Composer/Symfony project, so a
//! config file is only needed to point at a non-standard binary or registry.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SpecError};

pub const ENV_BINARY: &str = "COMPOSER_SPEC_BINARY";
pub const ENV_TIMEOUT_MS: &str = "COMPOSER_SPEC_TIMEOUT_MS";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecConfig {
    /// Program used for `list --format=json`
    pub composer_binary: String,
    /// File whose presence enables the Symfony Flex recipe commands
    pub lock_file: String,
    /// Dependency manifest read by the manifest generator
    pub manifest_file: String,
    pub search_endpoint: String,
    pub search_page_size: u32,
    /// Per external call
    pub timeout_ms: u64,
    /// Working directory for external calls (process cwd if unset)
    pub working_dir: Option<PathBuf>,
}

impl Default for SpecConfig {
    fn default() -> Self {
        Self {
            composer_binary: "composer".to_string(),
            lock_file: "symfony.lock".to_string(),
            manifest_file: "composer.json".to_string(),
            search_endpoint: "https://packagist.org/search.json".to_string(),
            search_page_size: 20,
            timeout_ms: 10_000,
            working_dir: None,
        }
    }
}

impl SpecConfig {
    /// Load a YAML config file. Missing keys keep their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
            .map_err(|e| SpecError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Apply `COMPOSER_SPEC_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(binary) = lookup(ENV_BINARY).filter(|b| !b.trim().is_empty()) {
            self.composer_binary = binary;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = raw.trim().parse().map_err(|_| {
                SpecError::Config(format!("{} must be an integer, got {:?}", ENV_TIMEOUT_MS, raw))
            })?;
        }
        Ok(self)
    }

    /// Manifest path resolved against the working directory
    pub fn manifest_path(&self) -> PathBuf {
        match &self.working_dir {
            Some(dir) => dir.join(&self.manifest_file),
            None => PathBuf::from(&self.manifest_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "composer_binary: /usr/local/bin/composer\ntimeout_ms: 500\n";
        let config = SpecConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.composer_binary, "/usr/local/bin/composer");
        assert_eq!(config.timeout_ms, 500);
        assert_eq!(config.lock_file, "symfony.lock");
        assert_eq!(config.search_page_size, 20);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(SpecConfig::from_yaml_str("  \n").unwrap(), SpecConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_BINARY, "composer2"), (ENV_TIMEOUT_MS, "250")].into();
        let config = SpecConfig::default()
            .with_overrides_from(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.composer_binary, "composer2");
        assert_eq!(config.timeout_ms, 250);
    }

    #[test]
    fn test_bad_timeout_override() {
        let result = SpecConfig::default().with_overrides_from(|k| {
            (k == ENV_TIMEOUT_MS).then(|| "soon".to_string())
        });
        assert!(matches!(result, Err(SpecError::Config(_))));
    }

    #[test]
    fn test_manifest_path() {
        let mut config = SpecConfig::default();
        assert_eq!(config.manifest_path(), PathBuf::from("composer.json"));
        config.working_dir = Some(PathBuf::from("/srv/app"));
        assert_eq!(config.manifest_path(), PathBuf::from("/srv/app/composer.json"));
    }
}
