use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::UserDirs;

use super::GuardConfig;
use crate::error::ConfigError;

impl GuardConfig {
    /// Entry point for binaries: an explicit path when given, otherwise the
    /// default location.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load_or_default()?,
        };
        tracing::debug!(path = %config.config_path.display(), "Config loaded");
        Ok(config)
    }

    /// `~/.lawsage/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))?;
        Ok(home.join(".lawsage").join("config.toml"))
    }

    /// Loads the default config file when it exists, otherwise starts from
    /// defaults. Environment overrides and validation apply either way.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            return Self::load_from(&path);
        }
        let mut config = Self {
            config_path: path,
            ..Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicit config file. A missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                ConfigError::Load(format!("{} does not exist", path.display()))
            }
            _ => ConfigError::Io(e),
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        config.config_path = path.to_path_buf();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML without consulting the environment.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
