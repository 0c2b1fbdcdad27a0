use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use log::debug;
use thiserror::Error;

/// Name of the config file the CLI looks for in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rusbit-bencode.toml";

/// Limits applied by the decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum nesting of lists and dictionaries.
    pub max_depth: usize,
    /// Maximum declared length of a single byte string, in bytes.
    pub max_string_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_string_len: 64 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Reads `path` if it exists, otherwise falls back to the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            debug!("loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            Self::from_toml_str(&contents)
        } else {
            debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("max_depth = 8").unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.max_string_len, Config::default().max_string_len);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 3\nmax_string_len = 10").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config { max_depth: 3, max_string_len: 10 });
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = \"deep\"").unwrap();
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse(_))));
    }
}
