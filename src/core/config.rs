//! User configuration
//!
//! Resolution order: an explicit `--config` path, then `MLENS_CONFIG`, then
//! `<user config dir>/mlens/config.yaml`, then built-in defaults. Command-line
//! flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::analytics::ValueMode;
use crate::core::generator::ReseedPolicy;
use crate::core::rng::DEFAULT_SEED;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "MLENS_CONFIG";

const APP_DIR: &str = "mlens";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// PRNG seed for dataset generation (default: 42)
    pub seed: u64,

    /// Whether regeneration after a cache clear restarts the PRNG
    pub reseed: ReseedPolicy,

    /// Measure summed by the aggregations
    pub value_mode: ValueMode,

    /// Row limit for `records` listings (default: 20)
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            reseed: ReseedPolicy::default(),
            value_mode: ValueMode::default(),
            default_limit: default_limit(),
        }
    }
}

impl Config {
    /// Parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(content)
    }

    /// `<user config dir>/mlens/config.yaml`, if a home directory is known
    pub fn user_config_path() -> Option<PathBuf> {
        directories::BaseDirs::new().map(|dirs| dirs.config_dir().join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load configuration following the resolution order
    ///
    /// An explicitly named file (flag or environment) must exist; the user
    /// config file is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config from --config");
            return Self::from_file(path);
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            let path = PathBuf::from(path);
            debug!(path = %path.display(), "loading config from {}", CONFIG_ENV);
            return Self::from_file(&path);
        }
        match Self::user_config_path() {
            Some(path) if path.is_file() => {
                debug!(path = %path.display(), "loading user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.reseed, ReseedPolicy::EveryGeneration);
        assert_eq!(config.value_mode, ValueMode::ByValue);
        assert_eq!(config.default_limit, 20);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("seed: 7\nvalue_mode: By Volume\n").unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.value_mode, ValueMode::ByVolume);
        assert_eq!(config.default_limit, 20);
        assert_eq!(Config::from_yaml("   \n").unwrap(), Config::default());
    }

    #[test]
    fn test_reseed_policy_kebab_case() {
        let config = Config::from_yaml("reseed: continue-sequence\n").unwrap();
        assert_eq!(config.reseed, ReseedPolicy::ContinueSequence);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_yaml("sed: 7\n").is_err());
    }

    #[test]
    fn test_from_file_errors_name_path() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("nope.yaml");
        let err = Config::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("nope.yaml"));

        let bad = tmp.path().join("bad.yaml");
        fs::write(&bad, "seed: [1, 2").unwrap();
        assert!(matches!(
            Config::from_file(&bad).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn test_resolve_explicit_path() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        fs::write(&path, "seed: 1234\ndefault_limit: 5\n").unwrap();
        let config = Config::resolve(Some(&path)).unwrap();
        assert_eq!(config.seed, 1234);
        assert_eq!(config.default_limit, 5);
    }
}
