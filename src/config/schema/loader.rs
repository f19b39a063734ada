use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// `~/.quillshift`
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        UserDirs::new()
            .map(|u| u.home_dir().join(".quillshift"))
            .ok_or_else(|| ConfigError::Load("could not find home directory".into()))
    }

    /// Load `~/.quillshift/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        Self::load_or_init_in(&Self::default_dir()?)
    }

    pub fn load_or_init_in(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join("config.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        fs::create_dir_all(dir)?;
        let config = Self {
            config_path,
            ..Self::default()
        };
        config.save()?;
        tracing::info!(path = %config.config_path.display(), "Wrote default config");
        Ok(config)
    }

    /// Load an explicit config file. `~` is expanded; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = path.to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned());

        let contents = fs::read_to_string(&expanded).map_err(|e| {
            ConfigError::Load(format!("failed to read {}: {e}", expanded.display()))
        })?;
        let mut config: Self = toml::from_str(&contents).map_err(|e| {
            ConfigError::Load(format!("failed to parse {}: {e}", expanded.display()))
        })?;
        config.config_path = expanded;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("failed to serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
